//! # Mapping Errors
//!
//! This module defines the [`MapError`] enum raised by the mapper contracts themselves.
//! Field-transform failures are not represented here: they belong to each concrete mapper's
//! own error type, which only needs to accept a [`MapError`] through `From`.

use omap_factory::FactoryError;
use std::borrow::Cow;
use std::fmt;

/// Identifies a mapping call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    Source,
    Destination,
}

impl Argument {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialized [`MapError`] enum for mapper contract violations.
#[omap_derive::omap_error]
#[derive(Clone, PartialEq, Eq)]
pub enum MapError {
    /// A required argument was missing.
    ///
    /// Always raised before any destination field is assigned.
    #[error("Null argument{}: `{argument}` must be provided", format_context(.context))]
    NullArgument { argument: Argument, context: Option<Cow<'static, str>> },

    /// The destination could not be constructed before mapping.
    #[error("Destination construction failed{}: {source}", format_context(.context))]
    Construction { source: FactoryError, context: Option<Cow<'static, str>> },
}

impl MapError {
    /// Shorthand for a [`MapError::NullArgument`] without context.
    #[must_use]
    pub const fn null(argument: Argument) -> Self {
        Self::NullArgument { argument, context: None }
    }
}
