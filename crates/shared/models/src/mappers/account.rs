use omap_mapper::{MapError, Mapper};

use crate::error::RecordMapError;
use crate::records::{AccountRecord, AccountSnapshot, AccountSource};

/// Maps inbound [`AccountSource`] data onto a stored [`AccountRecord`].
///
/// | destination | transform |
/// |---|---|
/// | `flag` | pass-through |
/// | `created` | pass-through |
/// | `count64` | widened from `count32` |
/// | `text` | pass-through |
///
/// `revision` is not part of the contract and keeps its value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountRecordMapper;

impl Mapper<AccountSource, AccountRecord> for AccountRecordMapper {
    type Error = MapError;

    #[inline]
    fn map(&self, source: &AccountSource, destination: &mut AccountRecord) -> Result<(), MapError> {
        destination.flag = source.flag;
        destination.created = source.created;
        destination.count64 = i64::from(source.count32);
        destination.text.clone_from(&source.text);
        Ok(())
    }
}

/// Maps a stored [`AccountRecord`] back to a compact [`AccountSnapshot`].
///
/// `count64` is narrowed to `count32`. The narrowing runs before any assignment, so a value
/// out of `i32` range fails with [`RecordMapError::Narrowing`] and leaves the snapshot as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountSnapshotMapper;

impl Mapper<AccountRecord, AccountSnapshot> for AccountSnapshotMapper {
    type Error = RecordMapError;

    fn map(
        &self,
        source: &AccountRecord,
        destination: &mut AccountSnapshot,
    ) -> Result<(), RecordMapError> {
        let count32 = i32::try_from(source.count64).map_err(|_| RecordMapError::Narrowing {
            field: "count64",
            value: source.count64,
            context: None,
        })?;

        destination.flag = source.flag;
        destination.count32 = count32;
        destination.text.clone_from(&source.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn source() -> AccountSource {
        AccountSource {
            flag: true,
            created: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            count32: 42,
            text: "hello".to_owned(),
        }
    }

    #[test]
    fn text_buffer_is_reused_when_capacity_allows() {
        let mut record = AccountRecord { text: String::with_capacity(64), ..AccountRecord::default() };
        let capacity = record.text.capacity();

        AccountRecordMapper.map(&source(), &mut record).unwrap();

        assert_eq!(record.text, "hello");
        assert_eq!(record.text.capacity(), capacity);
    }

    #[test]
    fn narrowing_accepts_boundaries() {
        let mut snapshot = AccountSnapshot::default();

        for value in [i64::from(i32::MIN), 0, i64::from(i32::MAX)] {
            let record = AccountRecord { count64: value, ..AccountRecord::default() };
            AccountSnapshotMapper.map(&record, &mut snapshot).unwrap();
            assert_eq!(i64::from(snapshot.count32), value);
        }
    }

    #[test]
    fn narrowing_rejects_values_past_boundaries() {
        for value in [i64::from(i32::MIN) - 1, i64::from(i32::MAX) + 1] {
            let record = AccountRecord { count64: value, ..AccountRecord::default() };
            let err = AccountSnapshotMapper.map(&record, &mut AccountSnapshot::default()).unwrap_err();
            assert!(matches!(err, RecordMapError::Narrowing { field: "count64", value: v, .. } if v == value));
        }
    }
}
