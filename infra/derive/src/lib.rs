#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the object mapping infrastructure.
//! Every error enum in the workspace is declared through [`macro@omap_error`], so factory,
//! mapper, harness, and logger failures share one shape: a `thiserror` enum whose variants
//! carry an optional context string.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! omap-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` implementations
///   if an `Internal` variant is present.
/// * **Kind Introspection**: Generates `fn kind(&self) -> &'static str` returning the variant
///   name, used as a structured `tracing` field.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping upstream errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]`, and must also carry a `context` field.
/// 4. Tuple or unit variants are rejected to keep error wiring explicit.
///
/// # Example
///
/// ```rust,ignore
/// use omap_derive::omap_error;
/// use std::borrow::Cow;
///
/// #[omap_error]
/// pub enum FactoryError {
///     #[error("Construction error{}: {type_name}", format_context(.context))]
///     Construction { type_name: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal factory error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn build() -> Result<u8, FactoryError> {
///     Err("unreachable slot state".into()) // Uses From<&str> for Internal
/// }
///
/// let err = build().context("resolving u8").unwrap_err();
/// assert_eq!(err.kind(), "Internal");
/// ```
#[proc_macro_attribute]
pub fn omap_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
