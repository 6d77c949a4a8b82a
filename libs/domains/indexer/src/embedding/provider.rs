use async_trait::async_trait;

use crate::error::IndexResult;
use crate::models::ContentSection;

/// Trait for embedding generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector this provider produces
    fn dimension(&self) -> u32;

    /// Fill `embedding` on every section in a single batched call.
    ///
    /// Either every section comes back embedded or the call fails with
    /// `IndexError::Embedding`.
    async fn embed_sections(
        &self,
        sections: Vec<ContentSection>,
    ) -> IndexResult<Vec<ContentSection>>;
}
