//! # Factory Errors
//!
//! This module defines the [`FactoryError`] enum used by the instance factory for reporting
//! unresolvable construction paths and cache misuse.

use std::borrow::Cow;

/// A specialized [`FactoryError`] enum for instance construction failures.
#[omap_derive::omap_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The requested type has no usable parameterless construction path.
    ///
    /// Raised once, at the first resolution of the type. The failure is cached with the type
    /// and returned again on every later request; it is never retried.
    #[error("Construction error{}: no parameterless construction path for `{type_name}`", format_context(.context))]
    Construction { type_name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A constructor was registered for a type whose procedure was already resolved.
    #[error("Construction procedure already resolved{}: `{type_name}`", format_context(.context))]
    AlreadyResolved { type_name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for cache invariant violations.
    #[error("Internal factory error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
