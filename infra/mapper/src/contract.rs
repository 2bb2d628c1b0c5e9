use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Argument, MapError};

/// Copies fields from a source value into an existing destination value.
///
/// A mapper is directional: implementing `Mapper<A, B>` says nothing about `Mapper<B, A>`.
/// Implementations assign every field of their mapping contract and leave every other
/// destination field untouched. They must be deterministic: the same source always produces
/// the same assignments.
///
/// Field transforms that can fail report through [`Mapper::Error`], which is the mapper's own
/// type. The contract never wraps them.
///
/// # Example
/// ```rust
/// use omap_mapper::{MapError, Mapper};
///
/// struct Order { quantity: i32 }
/// #[derive(Default)]
/// struct OrderRow { quantity: i64, note: String }
///
/// struct OrderRowMapper;
///
/// impl Mapper<Order, OrderRow> for OrderRowMapper {
///     type Error = MapError;
///
///     fn map(&self, source: &Order, destination: &mut OrderRow) -> Result<(), MapError> {
///         destination.quantity = i64::from(source.quantity);
///         Ok(())
///     }
/// }
///
/// let mut row = OrderRow { quantity: 0, note: "kept".to_owned() };
/// OrderRowMapper.map(&Order { quantity: 3 }, &mut row).unwrap();
/// assert_eq!((row.quantity, row.note.as_str()), (3, "kept"));
/// ```
pub trait Mapper<S, D> {
    /// Error raised by this mapper's field transforms.
    type Error: From<MapError>;

    /// Assigns every contracted field of `destination` from `source`.
    ///
    /// # Errors
    /// Returns [`Mapper::Error`] if a field transform fails.
    fn map(&self, source: &S, destination: &mut D) -> Result<(), Self::Error>;

    /// Validates optional arguments, then maps.
    ///
    /// # Errors
    /// * [`MapError::NullArgument`] naming the first missing argument (source first), raised
    ///   before any assignment.
    /// * Any error of [`Mapper::map`].
    fn map_checked(
        &self,
        source: Option<&S>,
        destination: Option<&mut D>,
    ) -> Result<(), Self::Error> {
        let (source, destination) = require(source, destination)?;
        self.map(source, destination)
    }
}

/// Asynchronous counterpart of [`Mapper`] for mappings that must suspend, e.g. to await
/// external data needed by a transform.
///
/// Concurrent invocations over different (source, destination) pairs are independent and may
/// interleave freely. Suspension points of one invocation run in program order.
///
/// # Cancellation
///
/// Implementations follow a staged commit: every await happens before the first write to the
/// destination, and all fields are assigned synchronously after the last await. Dropping the
/// future at any suspension point leaves the destination untouched; a completed future leaves
/// it fully mapped.
pub trait AsyncMapper<S, D>: Send + Sync {
    /// Error raised by this mapper's field transforms.
    type Error: From<MapError> + Send;

    /// Assigns every contracted field of `destination` from `source`.
    ///
    /// # Errors
    /// Returns [`AsyncMapper::Error`] if a field transform fails.
    fn map_async(
        &self,
        source: &S,
        destination: &mut D,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Validates optional arguments, then maps.
    ///
    /// # Errors
    /// * [`MapError::NullArgument`] naming the first missing argument (source first), raised
    ///   before any suspension or assignment.
    /// * Any error of [`AsyncMapper::map_async`].
    fn map_async_checked(
        &self,
        source: Option<&S>,
        destination: Option<&mut D>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send
    where
        S: Sync,
        D: Send,
    {
        async move {
            let (source, destination) = require(source, destination)?;
            self.map_async(source, destination).await
        }
    }
}

/// Resolves optional mapping arguments, checking the source first.
///
/// # Errors
/// * [`MapError::NullArgument`] naming the missing argument.
pub fn require<'s, 'd, S, D>(
    source: Option<&'s S>,
    destination: Option<&'d mut D>,
) -> Result<(&'s S, &'d mut D), MapError> {
    let Some(source) = source else {
        debug!(argument = %Argument::Source, "Rejected mapping call");
        return Err(MapError::null(Argument::Source));
    };
    let Some(destination) = destination else {
        debug!(argument = %Argument::Destination, "Rejected mapping call");
        return Err(MapError::null(Argument::Destination));
    };
    Ok((source, destination))
}

// --- Forwarding ---

impl<S, D, M> Mapper<S, D> for &M
where
    M: Mapper<S, D> + ?Sized,
{
    type Error = M::Error;

    #[inline]
    fn map(&self, source: &S, destination: &mut D) -> Result<(), Self::Error> {
        (**self).map(source, destination)
    }
}

impl<S, D, M> Mapper<S, D> for Box<M>
where
    M: Mapper<S, D> + ?Sized,
{
    type Error = M::Error;

    #[inline]
    fn map(&self, source: &S, destination: &mut D) -> Result<(), Self::Error> {
        (**self).map(source, destination)
    }
}

impl<S, D, M> Mapper<S, D> for Arc<M>
where
    M: Mapper<S, D> + ?Sized,
{
    type Error = M::Error;

    #[inline]
    fn map(&self, source: &S, destination: &mut D) -> Result<(), Self::Error> {
        (**self).map(source, destination)
    }
}

impl<S, D, M> AsyncMapper<S, D> for &M
where
    M: AsyncMapper<S, D>,
{
    type Error = M::Error;

    fn map_async(
        &self,
        source: &S,
        destination: &mut D,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).map_async(source, destination)
    }
}

impl<S, D, M> AsyncMapper<S, D> for Arc<M>
where
    M: AsyncMapper<S, D>,
{
    type Error = M::Error;

    fn map_async(
        &self,
        source: &S,
        destination: &mut D,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).map_async(source, destination)
    }
}
