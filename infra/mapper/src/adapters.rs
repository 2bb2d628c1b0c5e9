use std::fmt;
use std::future::Future;

use crate::contract::{AsyncMapper, Mapper};
use crate::error::MapError;

/// Exposes a synchronous [`Mapper`] through the [`AsyncMapper`] contract.
///
/// The returned future never suspends: the whole mapping runs on its first poll, so it is
/// either not started or complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blocking<M>(pub M);

impl<M> Blocking<M> {
    pub const fn new(mapper: M) -> Self {
        Self(mapper)
    }

    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<S, D, M> AsyncMapper<S, D> for Blocking<M>
where
    M: Mapper<S, D> + Send + Sync,
    M::Error: Send,
    S: Sync,
    D: Send,
{
    type Error = M::Error;

    fn map_async(
        &self,
        source: &S,
        destination: &mut D,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move { self.0.map(source, destination) }
    }
}

/// A [`Mapper`] backed by a closure performing explicit assignments.
///
/// # Example
/// ```rust
/// use omap_mapper::{FnMapper, MapError, Mapper};
///
/// let widen = FnMapper::new(|source: &i32, destination: &mut i64| {
///     *destination = i64::from(*source);
///     Ok::<_, MapError>(())
/// });
///
/// let mut out = 0_i64;
/// widen.map(&7, &mut out).unwrap();
/// assert_eq!(out, 7);
/// ```
#[derive(Clone, Copy)]
pub struct FnMapper<F>(F);

impl<F> FnMapper<F> {
    pub const fn new(assign: F) -> Self {
        Self(assign)
    }
}

impl<F> fmt::Debug for FnMapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper").finish_non_exhaustive()
    }
}

impl<S, D, E, F> Mapper<S, D> for FnMapper<F>
where
    F: Fn(&S, &mut D) -> Result<(), E>,
    E: From<MapError>,
{
    type Error = E;

    #[inline]
    fn map(&self, source: &S, destination: &mut D) -> Result<(), E> {
        (self.0)(source, destination)
    }
}
