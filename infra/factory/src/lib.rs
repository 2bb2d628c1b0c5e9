//! # Instance Factory
//!
//! Produces new instances of statically known types through cached construction procedures.
//!
//! ## Overview
//!
//! Each type gets one construction procedure per path, built on first use and cached for the
//! lifetime of the factory. Later requests reuse it without resolving anything again. Holding a
//! [`Constructor`] handle skips even the cache lookup.
//!
//! ## Construction Paths
//!
//! * **`Default`**: [`create_instance`] accepts any `T: Default`. A type without a
//!   parameterless construction path fails to compile.
//! * **Registered**: [`try_create_instance`] resolves procedures registered with
//!   [`register_constructor`]. An unregistered type fails with [`FactoryError::Construction`]
//!   at its first resolution, and that failure is cached for the type. The two paths are cached
//!   independently: registering a procedure never changes what `create_instance` returns.
//!
//! ## Concurrency
//!
//! The cache is a `parking_lot::RwLock<FxHashMap<TypeId, _>>` of per-type `OnceLock` slots.
//! The map lock is never held while a procedure is built, so concurrent first requests for
//! different types do not serialize, and a type's procedure is built at most once. Cached calls
//! run under a recursive shared lock, so `Default` impls may use the factory themselves.
//!
//! # Example
//!
//! ```rust
//! use omap_factory::{FactoryError, create_instance, register_constructor, try_create_instance};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Draft { title: String }
//!
//! #[derive(Debug, PartialEq)]
//! struct Session { id: u64 }
//!
//! # fn main() -> Result<(), FactoryError> {
//! let draft: Draft = create_instance();
//! assert_eq!(draft, Draft::default());
//!
//! register_constructor(|| Session { id: 7 })?;
//! assert_eq!(try_create_instance::<Session>()?, Session { id: 7 });
//! # Ok(())
//! # }
//! ```

mod constructor;
mod engine;
mod error;
mod global;

pub use constructor::{Constructor, Procedure};
pub use engine::InstanceFactory;
pub use error::{FactoryError, FactoryErrorExt};
pub use global::{constructor, create_instance, global, register_constructor, try_create_instance};

pub mod prelude {
    pub use crate::constructor::Constructor;
    pub use crate::engine::InstanceFactory;
    pub use crate::error::{FactoryError, FactoryErrorExt};
    pub use crate::global::{create_instance, try_create_instance};
}
