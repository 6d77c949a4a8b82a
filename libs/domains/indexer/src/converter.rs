use async_trait::async_trait;

use crate::error::IndexResult;
use crate::models::ContentSection;

/// Turns a raw file into ordered content sections.
///
/// Returned sections have no embedding yet. An empty or degenerate file may
/// legitimately produce no sections. Malformed input fails with
/// `IndexError::Conversion`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
        category: &str,
    ) -> IndexResult<Vec<ContentSection>>;
}
