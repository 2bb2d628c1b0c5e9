//! Process-wide factory and its free-function entry points.

use std::sync::LazyLock;

use crate::constructor::Constructor;
use crate::engine::InstanceFactory;
use crate::error::FactoryError;

static GLOBAL: LazyLock<InstanceFactory> = LazyLock::new(InstanceFactory::new);

/// Returns the process-wide [`InstanceFactory`].
#[must_use]
pub fn global() -> &'static InstanceFactory {
    &GLOBAL
}

/// Returns a new default-constructed `T` from the process-wide factory.
///
/// See [`InstanceFactory::create_instance`].
#[inline]
#[must_use]
pub fn create_instance<T>() -> T
where
    T: Default + 'static,
{
    GLOBAL.create_instance()
}

/// Returns a new `T` through its registered construction procedure.
///
/// # Errors
/// * [`FactoryError::Construction`] if no construction path was registered for `T`.
pub fn try_create_instance<T: 'static>() -> Result<T, FactoryError> {
    GLOBAL.try_create_instance()
}

/// Returns a handle to the cached construction procedure of `T`.
#[must_use]
pub fn constructor<T>() -> Constructor<T>
where
    T: Default + 'static,
{
    GLOBAL.constructor()
}

/// Registers the construction procedure of `T` in the process-wide factory.
///
/// # Errors
/// * [`FactoryError::AlreadyResolved`] if `T` was already resolved.
pub fn register_constructor<T, F>(procedure: F) -> Result<(), FactoryError>
where
    T: 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    GLOBAL.register_constructor(procedure)
}
