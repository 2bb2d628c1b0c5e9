use omap_factory::prelude::*;
use omap_factory::register_constructor;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct AccountDraft {
    flag: bool,
    count64: i64,
    text: String,
}

#[derive(Debug, PartialEq, Eq)]
struct Connection {
    endpoint: &'static str,
}

#[derive(Debug)]
struct Unconstructible;

#[test]
fn create_instance_returns_distinct_default_values() {
    let factory = InstanceFactory::new();

    let mut instances: Vec<AccountDraft> = (0..8).map(|_| factory.create_instance()).collect();
    assert!(instances.iter().all(|draft| *draft == AccountDraft::default()));

    instances[0].count64 = 42;
    instances[1].text.push_str("mutated");

    assert_eq!(instances[0].count64, 42);
    assert!(instances[1].text == "mutated");
    assert!(instances[2..].iter().all(|draft| *draft == AccountDraft::default()));
}

#[test]
fn procedure_is_built_once_per_type() {
    let factory = InstanceFactory::new();

    for _ in 0..100 {
        let _: AccountDraft = factory.create_instance();
        let _: String = factory.create_instance();
    }

    assert_eq!(factory.builds(), 2);
    assert_eq!(factory.len(), 2);
    assert!(factory.is_cached::<AccountDraft>());
    assert!(factory.is_cached::<String>());
}

#[test]
fn constructor_handle_reuses_cached_procedure() {
    let factory = InstanceFactory::new();
    let constructor = factory.constructor::<AccountDraft>();

    let a = constructor.create();
    let b = constructor.clone().create();

    assert_eq!(a, b);
    assert_eq!(factory.builds(), 1);
    assert!(constructor.type_name().ends_with("AccountDraft"));
}

#[test]
fn registered_constructor_is_used_by_try_create() {
    let factory = InstanceFactory::new();
    factory.register_constructor(|| Connection { endpoint: "mem://" }).unwrap();

    let first = factory.try_create_instance::<Connection>().unwrap();
    let second = factory.try_create_instance::<Connection>().unwrap();

    assert_eq!(first, Connection { endpoint: "mem://" });
    assert_eq!(second, first);
    assert_eq!(factory.builds(), 1);
}

#[test]
fn registered_constructor_does_not_replace_default_path() {
    let factory = InstanceFactory::new();
    factory
        .register_constructor(|| AccountDraft { flag: true, count64: 5, text: "seeded".into() })
        .unwrap();

    let created: AccountDraft = factory.create_instance();
    let registered = factory.try_create_instance::<AccountDraft>().unwrap();

    assert_eq!(created, AccountDraft::default());
    assert_eq!(registered.count64, 5);
    assert_eq!(factory.constructor::<AccountDraft>().create(), AccountDraft::default());
    assert_eq!(factory.builds(), 2);
    assert_eq!(factory.len(), 1);
}

#[test]
fn default_path_survives_failed_registered_resolution() {
    let factory = InstanceFactory::new();
    assert!(factory.try_create_instance::<String>().is_err());

    for _ in 0..10 {
        let text: String = factory.create_instance();
        assert!(text.is_empty());
    }

    assert_eq!(factory.builds(), 1);
    assert!(factory.is_cached::<String>());
}

#[test]
fn default_impls_may_create_through_the_factory() {
    #[derive(Debug, Default, PartialEq)]
    struct Leaf(u8);

    #[derive(Debug, PartialEq)]
    struct Branch(Leaf);

    impl Default for Branch {
        fn default() -> Self {
            Self(create_instance())
        }
    }

    for _ in 0..4 {
        let branch: Branch = create_instance();
        assert_eq!(branch, Branch(Leaf(0)));
    }
    assert!(omap_factory::global().is_cached::<Leaf>());
}

#[test]
fn unregistered_type_fails_with_construction_error() {
    let factory = InstanceFactory::new();

    let err = factory.try_create_instance::<Unconstructible>().unwrap_err();

    assert!(matches!(err, FactoryError::Construction { .. }), "unexpected error: {err:?}");
    assert!(err.to_string().contains("Unconstructible"));
    assert!(!factory.is_cached::<Unconstructible>());
}

#[test]
fn construction_failure_is_cached_and_not_retried() {
    let factory = InstanceFactory::new();

    let first = factory.try_create_instance::<Unconstructible>().unwrap_err();
    let second = factory.try_create_instance::<Unconstructible>().unwrap_err();

    assert_eq!(first, second);
    assert_eq!(factory.len(), 1);
    assert_eq!(factory.builds(), 0);
}

#[test]
fn registering_after_resolution_is_rejected() {
    let factory = InstanceFactory::new();
    let _ = factory.try_create_instance::<Unconstructible>();

    let err = factory.register_constructor(|| Unconstructible).unwrap_err();
    assert!(matches!(err, FactoryError::AlreadyResolved { .. }));

    factory.register_constructor(|| Connection { endpoint: "a" }).unwrap();
    let err = factory.register_constructor(|| Connection { endpoint: "b" }).unwrap_err();
    assert!(matches!(err, FactoryError::AlreadyResolved { .. }));
    assert_eq!(factory.try_create_instance::<Connection>().unwrap().endpoint, "a");
}

#[test]
fn context_can_be_attached_to_failures() {
    let factory = InstanceFactory::new();

    let err = factory
        .try_create_instance::<Unconstructible>()
        .context("building harness fixture")
        .unwrap_err();

    assert!(err.to_string().contains("(building harness fixture)"));
    assert_eq!(err.kind(), "Construction");
}

#[test]
fn factories_do_not_share_caches() {
    let left = InstanceFactory::new();
    let right = InstanceFactory::new();

    left.register_constructor(|| Connection { endpoint: "left" }).unwrap();

    assert!(right.try_create_instance::<Connection>().is_err());
    assert_eq!(left.try_create_instance::<Connection>().unwrap().endpoint, "left");
}

#[test]
fn clones_share_one_cache() {
    let factory = InstanceFactory::new();
    let clone = factory.clone();

    let _: AccountDraft = clone.create_instance();

    assert!(factory.is_cached::<AccountDraft>());
    assert_eq!(factory.builds(), 1);
}

#[test]
fn global_factory_serves_free_functions() {
    #[derive(Debug, PartialEq)]
    struct GlobalOnly(u8);

    let draft: AccountDraft = create_instance();
    assert_eq!(draft, AccountDraft::default());
    assert!(omap_factory::global().is_cached::<AccountDraft>());

    register_constructor(|| GlobalOnly(9)).unwrap();
    assert_eq!(try_create_instance::<GlobalOnly>().unwrap(), GlobalOnly(9));
}
