use omap_mapper::prelude::*;
use std::borrow::Cow;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub active: bool,
    pub value32: i32,
    pub label: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    pub active: bool,
    pub value64: i64,
    pub label: String,
    pub untouched: u64,
}

/// Explicit widening mapper used across the contract suites.
#[derive(Debug, Default)]
pub struct RowMapper;

impl Mapper<Reading, Row> for RowMapper {
    type Error = MapError;

    fn map(&self, source: &Reading, destination: &mut Row) -> Result<(), MapError> {
        destination.active = source.active;
        destination.value64 = i64::from(source.value32);
        destination.label.clone_from(&source.label);
        Ok(())
    }
}

#[omap_derive::omap_error]
pub enum RowError {
    #[error("Mapping error{}: {source}", format_context(.context))]
    Mapping { source: MapError, context: Option<Cow<'static, str>> },

    #[error("Negative value{}: {value}", format_context(.context))]
    Negative { value: i32, context: Option<Cow<'static, str>> },
}

/// Rejects negative readings before touching the destination.
#[derive(Debug, Default)]
pub struct StrictRowMapper;

impl Mapper<Reading, Row> for StrictRowMapper {
    type Error = RowError;

    fn map(&self, source: &Reading, destination: &mut Row) -> Result<(), RowError> {
        if source.value32 < 0 {
            return Err(RowError::Negative { value: source.value32, context: None });
        }
        RowMapper.map(source, destination)?;
        Ok(())
    }
}

/// Suspends before committing every field at once.
#[derive(Debug)]
pub struct DelayedRowMapper {
    pub delay: Duration,
}

impl AsyncMapper<Reading, Row> for DelayedRowMapper {
    type Error = MapError;

    async fn map_async(&self, source: &Reading, destination: &mut Row) -> Result<(), MapError> {
        tokio::time::sleep(self.delay).await;
        let label = format!("{}@{}ms", source.label, self.delay.as_millis());
        destination.active = source.active;
        destination.value64 = i64::from(source.value32);
        destination.label = label;
        Ok(())
    }
}

#[must_use]
pub fn reading(value32: i32, label: &str) -> Reading {
    Reading { active: true, value32, label: label.to_owned() }
}
