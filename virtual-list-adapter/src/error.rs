use alloc::string::String;

use thiserror::Error;

/// Failure to realize one item through a [`crate::RenderBoundary`].
///
/// The pool logs it, counts it in [`crate::SyncStats::failed`] and retries the key on the next
/// sync. It never surfaces through the list API.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("item content was rejected: {0}")]
    Rejected(String),

    #[error("render surface is detached")]
    Detached,
}

/// Invalid list configuration, reported when the list is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero estimate collapses every offset to zero and would realize the entire list.
    #[error("estimated_item_height must be greater than zero")]
    ZeroEstimatedItemHeight,
}
