//! # Mapper Contracts
//!
//! One-method capability traits for copying fields from a source value into an existing
//! destination value: [`Mapper`] for synchronous mappings and [`AsyncMapper`] for mappings
//! that must suspend.
//!
//! ## Contract
//!
//! * The source is borrowed read-only and the destination read-write for a single call.
//!   Neither is retained afterwards.
//! * Every contracted destination field is assigned. All other fields keep their values.
//! * Missing arguments are reported as [`MapError::NullArgument`] by the `*_checked` entry
//!   points, before any assignment.
//! * Field-transform failures use the mapper's own error type and propagate unchanged.
//! * Asynchronous mappers stage every await before the first assignment, so cancellation
//!   leaves the destination untouched (see [`AsyncMapper`]).
//!
//! ## Example
//!
//! ```rust
//! use omap_mapper::prelude::*;
//!
//! struct Source { flag: bool, count32: i32 }
//! #[derive(Debug, Default, PartialEq)]
//! struct Destination { flag: bool, count64: i64 }
//!
//! struct Widening;
//!
//! impl Mapper<Source, Destination> for Widening {
//!     type Error = MapError;
//!
//!     fn map(&self, source: &Source, destination: &mut Destination) -> Result<(), MapError> {
//!         destination.flag = source.flag;
//!         destination.count64 = i64::from(source.count32);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), MapError> {
//! let mapped: Destination = Widening.map_new(&Source { flag: true, count32: 42 })?;
//! assert_eq!(mapped, Destination { flag: true, count64: 42 });
//!
//! let missing = Widening.map_checked(None, Some(&mut Destination::default()));
//! assert!(matches!(missing, Err(MapError::NullArgument { argument: Argument::Source, .. })));
//! # Ok(())
//! # }
//! ```

mod adapters;
mod contract;
mod error;
mod extensions;

pub use adapters::{Blocking, FnMapper};
pub use contract::{AsyncMapper, Mapper, require};
pub use error::{Argument, MapError, MapErrorExt};
pub use extensions::{AsyncMapperExt, MapperExt};

pub mod prelude {
    pub use crate::adapters::{Blocking, FnMapper};
    pub use crate::contract::{AsyncMapper, Mapper};
    pub use crate::error::{Argument, MapError, MapErrorExt};
    pub use crate::extensions::{AsyncMapperExt, MapperExt};
}
