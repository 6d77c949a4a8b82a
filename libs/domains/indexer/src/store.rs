use async_trait::async_trait;

use crate::error::IndexResult;
use crate::models::{CollectionInfo, CollectionSpec, FieldMatch, PointBatch};

/// Transport to the remote vector database.
///
/// Implementations must classify failures: a missing collection is
/// `IndexError::CollectionNotFound`, a duplicate create is
/// `IndexError::CollectionExists`, anything else from the wire is
/// `IndexError::Transport`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStoreClient: Send + Sync {
    /// Fetch collection metadata
    async fn get_collection(&self, name: &str) -> IndexResult<CollectionInfo>;

    /// Create a collection with the given vector parameters
    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> IndexResult<()>;

    /// Drop a collection and every point in it
    async fn delete_collection(&self, name: &str) -> IndexResult<()>;

    /// Insert or overwrite points, keyed by id.
    ///
    /// With `wait` the call returns only once the store has applied the write.
    async fn upsert(&self, name: &str, batch: PointBatch, wait: bool) -> IndexResult<()>;

    /// Delete every point whose payload matches `filter`
    async fn delete_by_filter(&self, name: &str, filter: FieldMatch, wait: bool)
    -> IndexResult<()>;
}
