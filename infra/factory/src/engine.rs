use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{trace, warn};

use crate::constructor::Constructor;
use crate::error::FactoryError;

type Erased = Box<dyn Any + Send + Sync>;
type Resolution = Result<Erased, FactoryError>;

/// Per-type cache entry.
///
/// Each `OnceLock` is a per-type initialization guard: concurrent first requests for the same
/// type block on it, while requests for other types never touch it. The `Default` path and the
/// registered path resolve independently, so a registered procedure never changes what
/// [`InstanceFactory::create_instance`] returns.
#[derive(Debug)]
struct Slot {
    type_name: &'static str,
    defaulted: OnceLock<Erased>,
    registered: OnceLock<Resolution>,
}

impl Slot {
    const fn new(type_name: &'static str) -> Self {
        Self { type_name, defaulted: OnceLock::new(), registered: OnceLock::new() }
    }

    fn is_resolved(&self) -> bool {
        self.defaulted.get().is_some() || self.registered.get().is_some()
    }
}

#[derive(Debug, Default)]
struct FactoryInner {
    slots: RwLock<FxHashMap<TypeId, Arc<Slot>>>,
    builds: AtomicUsize,
}

/// A thread-safe instance factory with per-type cached construction procedures.
///
/// Construction procedures are resolved lazily on first use, cached for the lifetime of the
/// factory, and never invalidated. Cloning the factory is cheap and shares the cache.
///
/// Most callers use the process-wide factory through [`create_instance`](crate::create_instance);
/// a dedicated instance is useful for isolation in tests and benchmarks.
///
/// # Example
/// ```rust
/// use omap_factory::InstanceFactory;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Record { count: i64, text: String }
///
/// let factory = InstanceFactory::new();
/// let first: Record = factory.create_instance();
/// let second: Record = factory.create_instance();
///
/// assert_eq!(first, Record::default());
/// assert_eq!(second, Record::default());
/// assert_eq!(factory.builds(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstanceFactory {
    inner: Arc<FactoryInner>,
}

impl InstanceFactory {
    /// Creates a new factory with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new default-constructed `T`.
    ///
    /// The first call for `T` builds and caches its construction procedure; later calls cost one
    /// shared lock, one hash lookup and one indirect call. A type without a parameterless
    /// construction path does not satisfy the `Default` bound and is rejected at compile time.
    ///
    /// Procedures registered with [`InstanceFactory::register_constructor`] are not used here:
    /// the result always equals `T::default()`.
    #[inline]
    #[must_use]
    pub fn create_instance<T>(&self) -> T
    where
        T: Default + 'static,
    {
        {
            // Recursive read: `T::default()` may itself create instances through this factory.
            let slots = self.inner.slots.read_recursive();
            if let Some(constructor) = slots
                .get(&TypeId::of::<T>())
                .and_then(|slot| slot.defaulted.get())
                .and_then(|erased| erased.downcast_ref::<Constructor<T>>())
            {
                return constructor.create();
            }
        }
        self.constructor::<T>().create()
    }

    /// Returns a new instance of `T` using its registered construction procedure.
    ///
    /// # Errors
    /// * [`FactoryError::Construction`] if no construction path was registered for `T` before
    ///   its first resolution. The failure is cached and returned on every later call.
    pub fn try_create_instance<T: 'static>(&self) -> Result<T, FactoryError> {
        self.try_constructor::<T>().map(|constructor| constructor.create())
    }

    /// Returns a handle to the cached `Default`-based construction procedure of `T`.
    ///
    /// # Panics
    /// Never in practice: the slot for `T` only ever holds a `Constructor<T>`.
    #[must_use]
    pub fn constructor<T>(&self) -> Constructor<T>
    where
        T: Default + 'static,
    {
        let slot = self.slot::<T>();
        let erased = slot.defaulted.get_or_init(|| {
            self.record_build(slot.type_name);
            let erased: Erased = Box::new(Constructor::new(T::default));
            erased
        });

        match erased.downcast_ref::<Constructor<T>>() {
            Some(constructor) => constructor.clone(),
            None => unreachable!("slot for `{}` holds a foreign procedure", slot.type_name),
        }
    }

    /// Returns a handle to the registered construction procedure of `T`.
    ///
    /// # Errors
    /// * [`FactoryError::Construction`] if `T` has no registered construction path.
    pub fn try_constructor<T: 'static>(&self) -> Result<Constructor<T>, FactoryError> {
        let slot = self.slot::<T>();
        let resolution = slot.registered.get_or_init(|| {
            let type_name = slot.type_name.into();
            let err = FactoryError::Construction { type_name, context: None };
            warn!(
                instance = slot.type_name,
                error.kind = err.kind(),
                "No parameterless construction path registered"
            );
            Err(err)
        });

        downcast::<T>(resolution)
    }

    /// Registers the construction procedure for `T`, used by
    /// [`InstanceFactory::try_create_instance`].
    ///
    /// Registration must happen before the first registered-path resolution of `T`; the cache is
    /// append-only. The `Default` path of `T` is unaffected.
    ///
    /// # Errors
    /// * [`FactoryError::AlreadyResolved`] if `T` was already resolved, successfully or not.
    pub fn register_constructor<T, F>(&self, procedure: F) -> Result<(), FactoryError>
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let slot = self.slot::<T>();
        let erased: Erased = Box::new(Constructor::new(procedure));

        slot.registered.set(Ok(erased)).map_err(|_| FactoryError::AlreadyResolved {
            type_name: slot.type_name.into(),
            context: None,
        })?;

        self.record_build(slot.type_name);
        Ok(())
    }

    /// Returns `true` if `T` has a successfully resolved construction procedure on either path.
    #[must_use]
    pub fn is_cached<T: 'static>(&self) -> bool {
        self.inner.slots.read().get(&TypeId::of::<T>()).is_some_and(|slot| {
            slot.defaulted.get().is_some() || matches!(slot.registered.get(), Some(Ok(_)))
        })
    }

    /// Returns the number of resolved types, including cached failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.slots.read().values().filter(|slot| slot.is_resolved()).count()
    }

    /// Returns `true` if no type was resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many construction procedures were built over the factory's lifetime.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.inner.builds.load(Ordering::Acquire)
    }

    /// Returns the slot for `T`, inserting an unresolved one if missing.
    ///
    /// The map lock is released before the caller resolves the slot.
    fn slot<T: 'static>(&self) -> Arc<Slot> {
        let id = TypeId::of::<T>();
        if let Some(slot) = self.inner.slots.read_recursive().get(&id) {
            return Arc::clone(slot);
        }

        let mut slots = self.inner.slots.write();
        Arc::clone(slots.entry(id).or_insert_with(|| Arc::new(Slot::new(type_name::<T>()))))
    }

    fn record_build(&self, type_name: &'static str) {
        let builds = self.inner.builds.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(instance = type_name, builds, "Construction procedure built");
    }
}

fn downcast<T: 'static>(resolution: &Resolution) -> Result<Constructor<T>, FactoryError> {
    match resolution {
        Ok(erased) => erased.downcast_ref::<Constructor<T>>().cloned().ok_or_else(|| {
            FactoryError::Internal {
                message: format!("cached procedure does not construct `{}`", type_name::<T>())
                    .into(),
                context: None,
            }
        }),
        Err(err) => Err(err.clone()),
    }
}
