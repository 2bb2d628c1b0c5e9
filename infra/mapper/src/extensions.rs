//! # Mapper Extensions
//!
//! Extension traits combining the mapper contracts with the instance factory: the destination
//! is created through a cached construction procedure, then mapped onto.

use omap_factory::{Constructor, InstanceFactory};
use std::future::Future;

use crate::contract::{AsyncMapper, Mapper};
use crate::error::MapError;

/// Extension methods available on every [`Mapper`].
pub trait MapperExt<S, D>: Mapper<S, D> {
    /// Creates a destination through the process-wide factory and maps onto it.
    ///
    /// # Errors
    /// Returns [`Mapper::Error`] if a field transform fails.
    fn map_new(&self, source: &S) -> Result<D, Self::Error>
    where
        D: Default + 'static,
    {
        self.map_new_with(omap_factory::global(), source)
    }

    /// Creates a destination through `factory` and maps onto it.
    ///
    /// # Errors
    /// Returns [`Mapper::Error`] if a field transform fails.
    fn map_new_with(&self, factory: &InstanceFactory, source: &S) -> Result<D, Self::Error>
    where
        D: Default + 'static,
    {
        let mut destination = factory.create_instance::<D>();
        self.map(source, &mut destination)?;
        Ok(destination)
    }

    /// Creates a destination through a held [`Constructor`] and maps onto it.
    ///
    /// This is the lookup-free entry point for hot loops.
    ///
    /// # Errors
    /// Returns [`Mapper::Error`] if a field transform fails.
    fn map_into(&self, constructor: &Constructor<D>, source: &S) -> Result<D, Self::Error>
    where
        D: 'static,
    {
        let mut destination = constructor.create();
        self.map(source, &mut destination)?;
        Ok(destination)
    }

    /// Creates a destination through its registered construction procedure and maps onto it.
    ///
    /// # Errors
    /// * [`MapError::Construction`] if `D` has no registered construction path.
    /// * Any error of [`Mapper::map`].
    fn try_map_new_with(&self, factory: &InstanceFactory, source: &S) -> Result<D, Self::Error>
    where
        D: 'static,
    {
        let mut destination = factory.try_create_instance::<D>().map_err(MapError::from)?;
        self.map(source, &mut destination)?;
        Ok(destination)
    }
}

impl<S, D, M> MapperExt<S, D> for M where M: Mapper<S, D> + ?Sized {}

/// Extension methods available on every [`AsyncMapper`].
pub trait AsyncMapperExt<S, D>: AsyncMapper<S, D> {
    /// Creates a destination through the process-wide factory and maps onto it.
    ///
    /// The destination is built before the first suspension, so dropping the future never
    /// leaks a partially mapped value to the caller.
    ///
    /// # Errors
    /// Returns [`AsyncMapper::Error`] if a field transform fails.
    fn map_new_async(&self, source: &S) -> impl Future<Output = Result<D, Self::Error>> + Send
    where
        S: Sync,
        D: Default + Send + 'static,
    {
        async move {
            let mut destination = omap_factory::create_instance::<D>();
            self.map_async(source, &mut destination).await?;
            Ok(destination)
        }
    }
}

impl<S, D, M> AsyncMapperExt<S, D> for M where M: AsyncMapper<S, D> {}
