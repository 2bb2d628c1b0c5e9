//! Facade crate for omap.
//! Re-exports the instance factory, the mapper contracts and (with `models`) the account mappers.
//! Keep this crate thin: it composes other crates and implements nothing itself.
//!
//! ## Usage
//! - `use omap::prelude::*;` for the traits and factory entry points.
//! - Disable default features to drop the account models.

pub use omap_factory as factory;
pub use omap_mapper as mapper;
#[cfg(feature = "models")]
pub use omap_models as models;

pub mod prelude {
    pub use omap_factory::{Constructor, FactoryError, InstanceFactory};
    pub use omap_factory::{constructor, create_instance, register_constructor, try_create_instance};
    pub use omap_mapper::prelude::*;

    #[cfg(feature = "models")]
    pub use omap_models::{
        AccountRecord, AccountRecordMapper, AccountSnapshot, AccountSnapshotMapper, AccountSource,
        AccountView, AccountViewMapper, LabelResolver, RecordMapError, StaticLabels,
    };
}

/// Build-time enabled features (by Cargo feature).
pub const FEATURES: &[&str] = &[
    #[cfg(feature = "models")]
    "models",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    FEATURES.contains(&name)
}
