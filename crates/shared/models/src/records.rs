//! Record shapes exchanged by the account mappers.
//!
//! All records are plain data: fixed field sets, no behavior, `Default` as their
//! parameterless construction path.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Inbound account data, read-only from a mapper's perspective.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSource {
    pub flag: bool,
    pub created: DateTime<FixedOffset>,
    pub count32: i32,
    pub text: String,
}

/// Stored account representation.
///
/// `revision` is owned by the store and is not part of any mapping contract into this record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub flag: bool,
    pub created: DateTime<FixedOffset>,
    pub count64: i64,
    pub text: String,
    pub revision: u64,
}

/// Compact export of an [`AccountRecord`] with a 32-bit counter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub flag: bool,
    pub count32: i32,
    pub text: String,
}

/// Presentation shape carrying a resolved display label.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub flag: bool,
    pub created: DateTime<FixedOffset>,
    pub count64: i64,
    pub label: String,
}
