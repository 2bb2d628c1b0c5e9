pub mod fixtures;

use fixtures::*;
use omap_factory::{FactoryError, InstanceFactory};
use omap_mapper::prelude::*;
use std::sync::Arc;

#[test]
fn map_assigns_contracted_fields_and_keeps_others() {
    let mut row = Row { untouched: 77, ..Row::default() };

    RowMapper.map(&reading(42, "hello"), &mut row).unwrap();

    assert_eq!(row, Row { active: true, value64: 42, label: "hello".to_owned(), untouched: 77 });
}

#[test]
fn map_checked_rejects_missing_source() {
    let mut row = Row { untouched: 5, ..Row::default() };

    let err = RowMapper.map_checked(None, Some(&mut row)).unwrap_err();

    assert_eq!(err, MapError::null(Argument::Source));
    assert_eq!(row, Row { untouched: 5, ..Row::default() });
}

#[test]
fn map_checked_rejects_missing_destination() {
    let err = RowMapper.map_checked(Some(&reading(1, "a")), None).unwrap_err();

    assert!(matches!(err, MapError::NullArgument { argument: Argument::Destination, .. }));
    assert!(err.to_string().contains("`destination`"));
}

#[test]
fn map_checked_reports_source_first_when_both_missing() {
    let err = RowMapper.map_checked(None, None).unwrap_err();

    assert_eq!(err.kind(), "NullArgument");
    assert!(matches!(err, MapError::NullArgument { argument: Argument::Source, .. }));
}

#[test]
fn null_arguments_convert_into_mapper_errors() {
    let err = StrictRowMapper.map_checked(None, Some(&mut Row::default())).unwrap_err();

    assert!(matches!(
        err,
        RowError::Mapping { source: MapError::NullArgument { argument: Argument::Source, .. }, .. }
    ));
}

#[test]
fn transform_errors_propagate_unchanged() {
    let mut row = Row { label: "before".to_owned(), ..Row::default() };

    let err = StrictRowMapper.map(&reading(-3, "neg"), &mut row).unwrap_err();

    assert!(matches!(err, RowError::Negative { value: -3, .. }));
    assert_eq!(row.label, "before", "failure must precede assignment");
}

#[test]
fn repeated_mapping_is_deterministic() {
    let source = reading(9, "same");
    let mut first = Row::default();
    let mut second = Row::default();

    RowMapper.map(&source, &mut first).unwrap();
    RowMapper.map(&source, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn map_new_builds_destination_through_factory() {
    let factory = InstanceFactory::new();

    let row: Row = RowMapper.map_new_with(&factory, &reading(3, "new")).unwrap();

    assert_eq!(row.value64, 3);
    assert_eq!(row.untouched, 0);
    assert!(factory.is_cached::<Row>());

    let global: Row = RowMapper.map_new(&reading(4, "global")).unwrap();
    assert_eq!(global.label, "global");
}

#[test]
fn map_into_uses_held_constructor() {
    let factory = InstanceFactory::new();
    let constructor = factory.constructor::<Row>();

    let rows: Vec<Row> =
        (0..4).map(|i| RowMapper.map_into(&constructor, &reading(i, "batch")).unwrap()).collect();

    assert_eq!(rows.iter().map(|row| row.value64).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(factory.builds(), 1);
}

#[test]
fn try_map_new_reports_missing_construction_path() {
    struct Opaque;
    struct OpaqueMapper;

    impl Mapper<Reading, Opaque> for OpaqueMapper {
        type Error = MapError;

        fn map(&self, _: &Reading, _: &mut Opaque) -> Result<(), MapError> {
            Ok(())
        }
    }

    let factory = InstanceFactory::new();
    let err = OpaqueMapper.try_map_new_with(&factory, &reading(1, "x")).err().unwrap();

    assert!(matches!(err, MapError::Construction { source: FactoryError::Construction { .. }, .. }));
}

#[test]
fn fn_mapper_and_shared_mappers_satisfy_the_contract() {
    let closure = FnMapper::new(|source: &Reading, destination: &mut Row| {
        destination.value64 = i64::from(source.value32) * 2;
        Ok::<_, MapError>(())
    });
    let shared: Arc<dyn Mapper<Reading, Row, Error = MapError>> = Arc::new(RowMapper);
    let boxed: Box<dyn Mapper<Reading, Row, Error = MapError>> = Box::new(closure);

    let mut row = Row::default();
    shared.map(&reading(5, "arc"), &mut row).unwrap();
    assert_eq!(row.value64, 5);

    boxed.map(&reading(5, "box"), &mut row).unwrap();
    assert_eq!(row.value64, 10);
    assert_eq!(row.label, "arc");

    let by_ref = &RowMapper;
    by_ref.map(&reading(6, "ref"), &mut row).unwrap();
    assert_eq!(row.label, "ref");
}
