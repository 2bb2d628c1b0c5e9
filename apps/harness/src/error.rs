use omap::mapper::MapError;
use omap::models::RecordMapError;
use std::borrow::Cow;

/// Errors raised while configuring or running the harness.
#[omap_derive::omap_error]
pub enum HarnessError {
    /// A convention mapper could not be planned for the given record shapes.
    #[error("Convention error{}: {message}", format_context(.context))]
    Convention { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Two mappers disagreed on the same input.
    #[error("Mapper mismatch{}: {message}", format_context(.context))]
    Mismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Mapping error{}: {source}", format_context(.context))]
    Mapping { source: MapError, context: Option<Cow<'static, str>> },

    #[error("Record mapping error{}: {source}", format_context(.context))]
    Record { source: RecordMapError, context: Option<Cow<'static, str>> },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The async runtime could not be started.
    #[error("Runtime error{}: {source}", format_context(.context))]
    Runtime { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal harness error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
