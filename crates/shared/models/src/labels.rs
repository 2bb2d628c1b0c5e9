//! # Label Resolution
//!
//! External data source awaited by [`AccountViewMapper`](crate::AccountViewMapper): it turns an
//! account's text key into a display label.

use fxhash::FxHashMap;
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Errors raised by [`LabelResolver`] implementations.
#[omap_derive::omap_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The resolver backend is not reachable.
    #[error("Label backend unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Resolves display labels by key.
pub trait LabelResolver: Send + Sync {
    /// Returns the label for `key`, or `None` if the key is unknown.
    ///
    /// # Errors
    /// Returns [`ResolveError`] if the backend cannot answer.
    fn resolve(&self, key: &str) -> impl Future<Output = Result<Option<String>, ResolveError>> + Send;
}

impl<R: LabelResolver> LabelResolver for Arc<R> {
    fn resolve(&self, key: &str) -> impl Future<Output = Result<Option<String>, ResolveError>> + Send {
        (**self).resolve(key)
    }
}

/// In-memory label table with optional artificial latency.
///
/// # Example
/// ```rust
/// use omap_models::{LabelResolver, StaticLabels};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let labels = StaticLabels::new().with_label("acme", "ACME Corporation");
/// assert_eq!(labels.resolve("acme").await.unwrap().as_deref(), Some("ACME Corporation"));
/// assert_eq!(labels.resolve("other").await.unwrap(), None);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLabels {
    labels: Arc<FxHashMap<String, String>>,
    latency: Duration,
    offline: bool,
}

impl StaticLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label for `key`.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.labels).insert(key.into(), label.into());
        self
    }

    /// Delays every lookup by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every lookup fail with [`ResolveError::Unavailable`].
    #[must_use]
    pub const fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl LabelResolver for StaticLabels {
    async fn resolve(&self, key: &str) -> Result<Option<String>, ResolveError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline {
            return Err(ResolveError::Unavailable { message: "label table offline".into(), context: None });
        }

        let label = self.labels.get(key).cloned();
        trace!(key, hit = label.is_some(), "Label lookup");
        Ok(label)
    }
}
