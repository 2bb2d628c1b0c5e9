//! # omap Harness
//!
//! Relative throughput of hand-written mappers against a convention-based reference mapper,
//! plus the cost of the instance factory's construction paths.
//!
//! ## Example
//! ```no_run
//! use omap_harness::{Harness, HarnessConfig};
//!
//! let config = HarnessConfig { iterations: 10_000, ..HarnessConfig::default() };
//! let report = Harness::run(&config)?;
//! println!("{report}");
//! # Ok::<(), omap_harness::HarnessError>(())
//! ```

mod config;
mod convention;
mod error;
mod runner;

pub use config::{ConfigLoader, HarnessConfig};
pub use convention::{ConventionMapper, ConventionMapperBuilder};
pub use error::{HarnessError, HarnessErrorExt};
pub use runner::{
    ASYNC_MAPPER, CONSTRUCTOR_CREATE, CONVENTION_MAPPER, CaseReport, DIRECT_DEFAULT,
    EXPLICIT_MAPPER, FACTORY_CREATE, Harness, Report, record_convention, sample_labels,
    sample_source, verify,
};
