use chrono::DateTime;
use omap_mapper::prelude::*;
use omap_models::*;
use std::sync::Arc;
use std::time::Duration;

fn source(count32: i32, text: &str) -> AccountSource {
    AccountSource {
        flag: true,
        created: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
        count32,
        text: text.to_owned(),
    }
}

#[tokio::test]
async fn view_mapper_resolves_label_and_commits() {
    let mapper = AccountViewMapper::new(StaticLabels::new().with_label("acme", "ACME Corporation"));
    let mut view = AccountView::default();

    mapper.map_async(&source(42, "acme"), &mut view).await.unwrap();

    assert_eq!(
        view,
        AccountView {
            flag: true,
            created: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            count64: 42,
            label: "ACME Corporation".to_owned(),
        }
    );
}

#[tokio::test]
async fn unknown_key_falls_back_to_text() {
    let mapper = AccountViewMapper::new(StaticLabels::new());
    let mut view = AccountView::default();

    mapper.map_async(&source(1, "plain"), &mut view).await.unwrap();

    assert_eq!(view.label, "plain");
}

#[tokio::test]
async fn resolver_failure_propagates_and_leaves_view_untouched() {
    let mapper = AccountViewMapper::new(StaticLabels::new().offline());
    let before = AccountView { label: "kept".to_owned(), count64: 5, ..AccountView::default() };
    let mut view = before.clone();

    let err = mapper.map_async(&source(1, "acme"), &mut view).await.unwrap_err();

    assert!(matches!(err, RecordMapError::Resolve { source: ResolveError::Unavailable { .. }, .. }));
    assert_eq!(view, before);
}

#[tokio::test]
async fn cancellation_leaves_view_untouched() {
    let labels = StaticLabels::new().with_label("slow", "Slow").with_latency(Duration::from_secs(5));
    let mapper = AccountViewMapper::new(labels);
    let before = AccountView { label: "kept".to_owned(), ..AccountView::default() };
    let mut view = before.clone();

    let outcome =
        tokio::time::timeout(Duration::from_millis(10), mapper.map_async(&source(2, "slow"), &mut view))
            .await;

    assert!(outcome.is_err(), "mapping should have been cancelled");
    assert_eq!(view, before);
}

#[tokio::test]
async fn checked_entry_point_rejects_missing_destination() {
    let mapper = AccountViewMapper::new(StaticLabels::new());

    let err = mapper.map_async_checked(Some(&source(1, "x")), None).await.unwrap_err();

    assert!(matches!(
        err,
        RecordMapError::Mapping {
            source: MapError::NullArgument { argument: Argument::Destination, .. },
            ..
        }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_views_over_disjoint_pairs_do_not_interfere() {
    let labels = (0..16_u32).fold(
        StaticLabels::new().with_latency(Duration::from_millis(2)),
        |labels, i| labels.with_label(format!("key-{i}"), format!("Label {i}")),
    );
    let mapper = Arc::new(AccountViewMapper::new(labels));

    let mut handles = Vec::new();
    for i in 0..32_u32 {
        let mapper = Arc::clone(&mapper);
        handles.push(tokio::spawn(async move {
            let source = source(i32::try_from(i).unwrap(), &format!("key-{i}"));
            let mut view = AccountView::default();
            mapper.map_async(&source, &mut view).await.unwrap();
            (i, view)
        }));
    }

    for handle in handles {
        let (i, view) = handle.await.unwrap();
        assert_eq!(view.count64, i64::from(i));
        let expected = if i < 16 { format!("Label {i}") } else { format!("key-{i}") };
        assert_eq!(view.label, expected);
    }
}

#[tokio::test]
async fn map_new_async_builds_a_fresh_view() {
    let mapper = AccountViewMapper::new(StaticLabels::new().with_label("acme", "ACME"));

    let view: AccountView = mapper.map_new_async(&source(3, "acme")).await.unwrap();

    assert_eq!(view.label, "ACME");
    assert_eq!(view.count64, 3);
}
