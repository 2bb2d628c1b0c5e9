use crate::labels::ResolveError;
use omap_mapper::MapError;
use std::borrow::Cow;

/// Errors raised by the account mappers' field transforms.
#[omap_derive::omap_error]
pub enum RecordMapError {
    /// Contract violation reported by the mapper core (e.g. a missing argument).
    #[error("Mapping error{}: {source}", format_context(.context))]
    Mapping { source: MapError, context: Option<Cow<'static, str>> },

    /// A value does not fit the narrower destination field.
    #[error("Narrowing error{}: `{field}` value {value} does not fit", format_context(.context))]
    Narrowing { field: &'static str, value: i64, context: Option<Cow<'static, str>> },

    /// The label resolver failed.
    #[error("Label resolution error{}: {source}", format_context(.context))]
    Resolve { source: ResolveError, context: Option<Cow<'static, str>> },
}
