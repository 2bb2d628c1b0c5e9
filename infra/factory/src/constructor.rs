use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// A cached construction procedure for `T`.
pub type Procedure<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A cheap-to-clone handle to the cached construction procedure of `T`.
///
/// Obtained from [`InstanceFactory::constructor`](crate::InstanceFactory::constructor) or
/// [`InstanceFactory::try_constructor`](crate::InstanceFactory::try_constructor). Holding the
/// handle skips the cache lookup entirely: [`Constructor::create`] is a single indirect call.
pub struct Constructor<T> {
    procedure: Procedure<T>,
}

impl<T: 'static> Constructor<T> {
    pub(crate) fn new(procedure: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self { procedure: Arc::new(procedure) }
    }

    /// Produces a new instance of `T`.
    #[inline]
    #[must_use]
    pub fn create(&self) -> T {
        (self.procedure)()
    }

    /// Returns the shared procedure backing this handle.
    #[must_use]
    pub fn procedure(&self) -> Procedure<T> {
        Arc::clone(&self.procedure)
    }

    /// Returns the fully qualified name of the constructed type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self { procedure: Arc::clone(&self.procedure) }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("type", &type_name::<T>()).finish_non_exhaustive()
    }
}
