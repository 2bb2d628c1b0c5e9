use omap_mapper::AsyncMapper;

use crate::error::RecordMapError;
use crate::labels::LabelResolver;
use crate::records::{AccountSource, AccountView};

/// Maps [`AccountSource`] onto an [`AccountView`], resolving the display label asynchronously.
///
/// | destination | transform |
/// |---|---|
/// | `flag` | pass-through |
/// | `created` | pass-through |
/// | `count64` | widened from `count32` |
/// | `label` | resolved from `text`, falling back to `text` itself |
///
/// The label lookup is the only suspension point and completes before the first assignment.
/// Cancelling the returned future leaves the view untouched.
#[derive(Debug, Clone)]
pub struct AccountViewMapper<R> {
    resolver: R,
}

impl<R: LabelResolver> AccountViewMapper<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: LabelResolver> AsyncMapper<AccountSource, AccountView> for AccountViewMapper<R> {
    type Error = RecordMapError;

    async fn map_async(
        &self,
        source: &AccountSource,
        destination: &mut AccountView,
    ) -> Result<(), RecordMapError> {
        let label = self.resolver.resolve(&source.text).await?;

        // Commit: no awaits past this point.
        destination.flag = source.flag;
        destination.created = source.created;
        destination.count64 = i64::from(source.count32);
        destination.label = label.unwrap_or_else(|| source.text.clone());
        Ok(())
    }
}
