pub mod fixtures;

use fixtures::*;
use omap_mapper::prelude::*;
use std::time::Duration;

#[tokio::test]
async fn map_async_commits_all_fields() {
    let mapper = DelayedRowMapper { delay: Duration::from_millis(1) };
    let mut row = Row { untouched: 11, ..Row::default() };

    mapper.map_async(&reading(42, "hello"), &mut row).await.unwrap();

    assert_eq!(row, Row { active: true, value64: 42, label: "hello@1ms".to_owned(), untouched: 11 });
}

#[tokio::test]
async fn map_async_checked_rejects_missing_arguments() {
    let mapper = DelayedRowMapper { delay: Duration::ZERO };
    let mut row = Row::default();

    let missing_source = mapper.map_async_checked(None, Some(&mut row)).await.unwrap_err();
    let missing_destination =
        mapper.map_async_checked(Some(&reading(1, "x")), None).await.unwrap_err();

    assert_eq!(missing_source, MapError::null(Argument::Source));
    assert_eq!(missing_destination, MapError::null(Argument::Destination));
    assert_eq!(row, Row::default());
}

#[tokio::test]
async fn cancelled_mapping_leaves_destination_untouched() {
    let mapper = DelayedRowMapper { delay: Duration::from_secs(5) };
    let mut row = Row { label: "original".to_owned(), untouched: 3, ..Row::default() };

    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        mapper.map_async(&reading(8, "late"), &mut row),
    )
    .await;

    assert!(outcome.is_err(), "mapping should have been cancelled");
    assert_eq!(row, Row { label: "original".to_owned(), untouched: 3, ..Row::default() });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_over_disjoint_pairs_do_not_interfere() {
    let mut handles = Vec::new();

    for i in 0..32_u32 {
        handles.push(tokio::spawn(async move {
            let mapper = DelayedRowMapper { delay: Duration::from_millis(u64::from(i % 4)) };
            let source = reading(i32::try_from(i).unwrap(), &format!("row-{i}"));
            let mut row = Row::default();
            mapper.map_async(&source, &mut row).await.unwrap();
            (i, row)
        }));
    }

    for handle in handles {
        let (i, row) = handle.await.unwrap();
        assert_eq!(row.value64, i64::from(i));
        assert!(row.label.starts_with(&format!("row-{i}@")));
    }
}

#[tokio::test]
async fn blocking_adapter_exposes_sync_mappers() {
    let mapper = Blocking::new(RowMapper);
    let mut row = Row::default();

    mapper.map_async(&reading(2, "sync"), &mut row).await.unwrap();
    assert_eq!(row.value64, 2);

    let err = Blocking(StrictRowMapper).map_async(&reading(-1, "neg"), &mut row).await.unwrap_err();
    assert_eq!(err.kind(), "Negative");
    assert_eq!(row.label, "sync");
}

#[tokio::test]
async fn blocking_adapter_does_nothing_until_polled() {
    let mapper = Blocking::new(RowMapper);
    let mut row = Row::default();

    drop(mapper.map_async(&reading(2, "never"), &mut row));

    assert_eq!(row, Row::default());
}

#[tokio::test]
async fn map_new_async_creates_destination_through_factory() {
    let mapper = DelayedRowMapper { delay: Duration::ZERO };

    let row: Row = mapper.map_new_async(&reading(12, "fresh")).await.unwrap();

    assert_eq!(row.value64, 12);
    assert_eq!(row.untouched, 0);
}
