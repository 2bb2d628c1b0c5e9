//! # Account Models
//!
//! Concrete record shapes and the explicit mappers between them:
//!
//! * [`AccountRecordMapper`]: [`AccountSource`] → [`AccountRecord`], widening `count32`.
//! * [`AccountSnapshotMapper`]: [`AccountRecord`] → [`AccountSnapshot`], narrowing `count64`.
//! * [`AccountViewMapper`]: [`AccountSource`] → [`AccountView`], resolving a label through a
//!   [`LabelResolver`] before committing.
//!
//! ```rust
//! use chrono::DateTime;
//! use omap_mapper::prelude::*;
//! use omap_models::{AccountRecord, AccountRecordMapper, AccountSource};
//!
//! let source = AccountSource {
//!     flag: true,
//!     created: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
//!     count32: 42,
//!     text: "hello".to_owned(),
//! };
//! let mut record = AccountRecord { revision: 7, ..AccountRecord::default() };
//!
//! AccountRecordMapper.map(&source, &mut record).unwrap();
//! assert_eq!(record.count64, 42);
//! assert_eq!(record.revision, 7);
//! ```

mod error;
mod labels;
mod mappers;
mod records;

pub use error::{RecordMapError, RecordMapErrorExt};
pub use labels::{LabelResolver, ResolveError, ResolveErrorExt, StaticLabels};
pub use mappers::{AccountRecordMapper, AccountSnapshotMapper, AccountViewMapper};
pub use records::{AccountRecord, AccountSnapshot, AccountSource, AccountView};
