use std::sync::Arc;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_parse};
use tracing::{debug, info, instrument, warn};

use crate::converter::DocumentConverter;
use crate::embedding::EmbeddingProvider;
use crate::error::{IndexError, IndexResult};
use crate::models::{
    CollectionInfo, CollectionSpec, ContentSection, DistanceMetric, FieldMatch, IndexedFile,
    PointBatch,
};
use crate::store::VectorStoreClient;

/// Write-path tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Wait for the store to apply upserts and deletes before returning
    pub wait: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { wait: true }
    }
}

impl FromEnv for IndexOptions {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            wait: env_parse("INDEX_WAIT", true)?,
        })
    }
}

/// The synchronization operations callers depend on
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Make sure the collection exists with the provider's dimension and cosine distance
    async fn ensure_search_index(&self, index_name: &str) -> IndexResult<()>;

    /// Convert, embed and upsert every section of `file`
    async fn add_to_index(&self, index_name: &str, file: IndexedFile) -> IndexResult<()>;

    /// Remove every section whose `sourcefile` equals `filename`
    async fn delete_from_index(&self, index_name: &str, filename: Option<&str>)
    -> IndexResult<()>;

    /// Drop the collection and everything in it
    async fn delete_search_index(&self, index_name: &str) -> IndexResult<()>;
}

/// Keeps a vector collection in sync with ingested files.
///
/// `add_to_index` and `delete_from_index` never create the collection: call
/// `ensure_search_index` first. Against a missing collection they fail with
/// `IndexError::CollectionNotFound`.
///
/// Calls for different files are independent. Calls for the same file are
/// not serialized here; the store's last-write-wins semantics decide.
pub struct VectorIndex<S: VectorStoreClient> {
    store: Arc<S>,
    embeddings: Arc<dyn EmbeddingProvider>,
    converter: Arc<dyn DocumentConverter>,
    options: IndexOptions,
}

impl<S: VectorStoreClient> Clone for VectorIndex<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            embeddings: Arc::clone(&self.embeddings),
            converter: Arc::clone(&self.converter),
            options: self.options,
        }
    }
}

impl<S: VectorStoreClient> VectorIndex<S> {
    pub fn new(
        store: S,
        embeddings: Arc<dyn EmbeddingProvider>,
        converter: Arc<dyn DocumentConverter>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            embeddings,
            converter,
            options: IndexOptions::default(),
        }
    }

    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self), fields(index = %index_name))]
    pub async fn ensure_search_index(&self, index_name: &str) -> IndexResult<()> {
        validate_index_name(index_name)?;

        let expected = u64::from(self.embeddings.dimension());

        match self.store.get_collection(index_name).await {
            Ok(info) => {
                check_schema(&info, expected)?;
                debug!("Search index \"{}\" already exists", index_name);
                Ok(())
            }
            Err(IndexError::CollectionNotFound(_)) => {
                if expected == 0 {
                    return Err(IndexError::Config(
                        "Embedding provider reports a zero vector dimension".to_string(),
                    ));
                }

                info!(vector_size = expected, "Creating search index \"{}\"", index_name);

                match self
                    .store
                    .create_collection(index_name, CollectionSpec::cosine(expected))
                    .await
                {
                    Err(IndexError::CollectionExists(_)) => {
                        debug!("Search index \"{}\" was created concurrently", index_name);
                        let info = self.store.get_collection(index_name).await?;
                        check_schema(&info, expected)
                    }
                    other => other,
                }
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, file), fields(index = %index_name, filename = %file.filename))]
    pub async fn add_to_index(&self, index_name: &str, file: IndexedFile) -> IndexResult<()> {
        validate_index_name(index_name)?;
        let filename = require_filename(Some(file.filename.as_str()))?;

        let sections = self
            .converter
            .convert(filename, &file.data, &file.content_type, &file.category)
            .await?;

        if sections.is_empty() {
            // Nothing to write, but a missing collection is still an error
            self.store.get_collection(index_name).await?;
            info!(sections = 0, "Indexed 0 sections from file \"{}\"", filename);
            return Ok(());
        }

        let expected = sections.len();
        let embedded = self.embeddings.embed_sections(sections).await?;
        let batch = build_batch(embedded, expected, self.embeddings.dimension())?;
        let count = batch.len();

        self.store
            .upsert(index_name, batch, self.options.wait)
            .await?;

        info!(
            sections = count,
            "Indexed {} sections from file \"{}\"", count, filename
        );
        Ok(())
    }

    #[instrument(skip(self), fields(index = %index_name))]
    pub async fn delete_from_index(
        &self,
        index_name: &str,
        filename: Option<&str>,
    ) -> IndexResult<()> {
        validate_index_name(index_name)?;
        let filename = require_filename(filename)?;

        self.store
            .delete_by_filter(index_name, FieldMatch::sourcefile(filename), self.options.wait)
            .await?;

        debug!("Deleted sections of file \"{}\"", filename);
        Ok(())
    }

    #[instrument(skip(self), fields(index = %index_name))]
    pub async fn delete_search_index(&self, index_name: &str) -> IndexResult<()> {
        validate_index_name(index_name)?;

        self.store.delete_collection(index_name).await?;

        info!("Deleted search index \"{}\"", index_name);
        Ok(())
    }
}

#[async_trait]
impl<S: VectorStoreClient> SearchIndex for VectorIndex<S> {
    async fn ensure_search_index(&self, index_name: &str) -> IndexResult<()> {
        VectorIndex::ensure_search_index(self, index_name).await
    }

    async fn add_to_index(&self, index_name: &str, file: IndexedFile) -> IndexResult<()> {
        VectorIndex::add_to_index(self, index_name, file).await
    }

    async fn delete_from_index(
        &self,
        index_name: &str,
        filename: Option<&str>,
    ) -> IndexResult<()> {
        VectorIndex::delete_from_index(self, index_name, filename).await
    }

    async fn delete_search_index(&self, index_name: &str) -> IndexResult<()> {
        VectorIndex::delete_search_index(self, index_name).await
    }
}

fn validate_index_name(index_name: &str) -> IndexResult<()> {
    if index_name.trim().is_empty() {
        return Err(IndexError::Validation(
            "Index name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// An existing collection must match what this index would have created
fn check_schema(info: &CollectionInfo, expected: u64) -> IndexResult<()> {
    if info.vector_size != expected || info.distance != DistanceMetric::Cosine {
        warn!(
            existing_size = info.vector_size,
            existing_distance = ?info.distance,
            expected,
            "Search index does not match the embedding provider"
        );
        return Err(IndexError::Validation(format!(
            "Search index \"{}\" has {} dimensions with {:?} distance, expected {} with Cosine",
            info.name, info.vector_size, info.distance, expected
        )));
    }
    Ok(())
}

fn require_filename(filename: Option<&str>) -> IndexResult<&str> {
    filename
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| IndexError::Validation("A filename is required".to_string()))
}

/// Turn embedded sections into one upsert batch, or fail without writing anything
fn build_batch(
    sections: Vec<ContentSection>,
    expected: usize,
    dimension: u32,
) -> IndexResult<PointBatch> {
    if sections.len() != expected {
        return Err(IndexError::Embedding(format!(
            "Provider returned {} sections, expected {}",
            sections.len(),
            expected
        )));
    }

    let mut batch = PointBatch::with_capacity(sections.len());
    for section in sections {
        let payload = section.payload();
        let vector = section.embedding.ok_or_else(|| {
            IndexError::Embedding(format!("Section {} has no embedding", section.id))
        })?;

        if vector.len() != dimension as usize {
            return Err(IndexError::Embedding(format!(
                "Section {} has {} dimensions, expected {}",
                section.id,
                vector.len(),
                dimension
            )));
        }

        batch.push(section.id, vector, payload);
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::MockDocumentConverter;
    use crate::embedding::MockEmbeddingProvider;
    use crate::store::MockVectorStoreClient;
    use mockall::Sequence;

    const DIM: u32 = 4;

    fn collection_info(name: &str) -> CollectionInfo {
        CollectionInfo {
            name: name.to_string(),
            vector_size: u64::from(DIM),
            distance: DistanceMetric::Cosine,
            points_count: 0,
        }
    }

    fn sections(filename: &str, count: usize) -> Vec<ContentSection> {
        (0..count)
            .map(|i| {
                ContentSection::new(format!("{filename}-{i}"), format!("section {i}"), filename)
                    .with_category("manual")
                    .with_sourcepage(format!("{filename}#page={}", i + 1))
            })
            .collect()
    }

    fn converter_returning(count: usize) -> MockDocumentConverter {
        let mut converter = MockDocumentConverter::new();
        converter
            .expect_convert()
            .returning(move |filename, _, _, _| Ok(sections(filename, count)));
        converter
    }

    fn working_embeddings() -> MockEmbeddingProvider {
        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings.expect_embed_sections().returning(|sections| {
            Ok(sections
                .into_iter()
                .map(|s| s.with_embedding(vec![0.5; DIM as usize]))
                .collect())
        });
        embeddings
    }

    fn index(
        store: MockVectorStoreClient,
        embeddings: MockEmbeddingProvider,
        converter: MockDocumentConverter,
    ) -> VectorIndex<MockVectorStoreClient> {
        VectorIndex::new(store, Arc::new(embeddings), Arc::new(converter))
    }

    fn pdf(name: &str) -> IndexedFile {
        IndexedFile::new(name, b"%PDF-1.7".to_vec())
            .with_content_type("application/pdf")
            .with_category("manual")
    }

    #[tokio::test]
    async fn test_ensure_creates_missing_collection() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .times(1)
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));
        store
            .expect_create_collection()
            .withf(|name, spec| {
                name == "docs"
                    && spec.vector_size == u64::from(DIM)
                    && spec.distance == DistanceMetric::Cosine
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        index.ensure_search_index("docs").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_is_noop_when_collection_exists() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .times(2)
            .returning(|name| Ok(collection_info(name)));
        store.expect_create_collection().times(0);

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        index.ensure_search_index("docs").await.unwrap();
        index.ensure_search_index("docs").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_propagates_transport_errors() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .returning(|_| Err(IndexError::Transport("Collection not found".to_string())));
        store.expect_create_collection().times(0);

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        let err = index.ensure_search_index("docs").await.unwrap_err();

        assert!(matches!(err, IndexError::Transport(_)));
    }

    #[tokio::test]
    async fn test_ensure_accepts_concurrent_creation() {
        let mut seq = Sequence::new();
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));
        store
            .expect_create_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name, _| Err(IndexError::CollectionExists(name.to_string())));
        store
            .expect_get_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name| Ok(collection_info(name)));

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        index.ensure_search_index("docs").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_rejects_concurrent_creation_with_other_schema() {
        let mut seq = Sequence::new();
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));
        store
            .expect_create_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name, _| Err(IndexError::CollectionExists(name.to_string())));
        store
            .expect_get_collection()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name| {
                Ok(CollectionInfo {
                    vector_size: 1536,
                    ..collection_info(name)
                })
            });

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        let err = index.ensure_search_index("docs").await.unwrap_err();

        assert!(matches!(err, IndexError::Validation(_)));
    }

    #[tokio::test]
    async fn test_ensure_rejects_existing_collection_with_wrong_size() {
        let mut store = MockVectorStoreClient::new();
        store.expect_get_collection().times(1).returning(|name| {
            Ok(CollectionInfo {
                vector_size: 3,
                ..collection_info(name)
            })
        });
        store.expect_create_collection().times(0);

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        let err = index.ensure_search_index("docs").await.unwrap_err();

        assert!(matches!(err, IndexError::Validation(ref msg) if msg.contains("3 dimensions")));
    }

    #[tokio::test]
    async fn test_ensure_rejects_existing_collection_with_wrong_distance() {
        let mut store = MockVectorStoreClient::new();
        store.expect_get_collection().times(1).returning(|name| {
            Ok(CollectionInfo {
                distance: DistanceMetric::Euclidean,
                ..collection_info(name)
            })
        });
        store.expect_create_collection().times(0);

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        let err = index.ensure_search_index("docs").await.unwrap_err();

        assert!(matches!(err, IndexError::Validation(ref msg) if msg.contains("Euclidean")));
    }

    #[tokio::test]
    async fn test_ensure_propagates_create_failures() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));
        store
            .expect_create_collection()
            .returning(|_, _| Err(IndexError::Transport("permission denied".to_string())));

        let index = index(store, working_embeddings(), MockDocumentConverter::new());
        let err = index.ensure_search_index("docs").await.unwrap_err();

        assert!(matches!(err, IndexError::Transport(_)));
    }

    #[tokio::test]
    async fn test_add_upserts_one_batch_per_file() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_upsert()
            .withf(|name, batch, wait| {
                name == "docs"
                    && *wait
                    && batch.ids() == ["f.pdf-0", "f.pdf-1", "f.pdf-2"]
                    && batch.vectors().len() == 3
                    && batch.vectors().iter().all(|v| v.len() == DIM as usize)
                    && batch.payloads().len() == 3
                    && batch.payloads().iter().enumerate().all(|(i, p)| {
                        p.content == format!("section {i}")
                            && p.category == "manual"
                            && p.sourcepage == format!("f.pdf#page={}", i + 1)
                            && p.sourcefile == "f.pdf"
                    })
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings
            .expect_embed_sections()
            .withf(|sections| sections.len() == 3)
            .times(1)
            .returning(|sections| {
                Ok(sections
                    .into_iter()
                    .map(|s| s.with_embedding(vec![0.1; DIM as usize]))
                    .collect())
            });

        let index = index(store, embeddings, converter_returning(3));
        index.add_to_index("docs", pdf("f.pdf")).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_passes_file_fields_to_converter() {
        let mut converter = MockDocumentConverter::new();
        converter
            .expect_convert()
            .withf(|filename, data, content_type, category| {
                filename == "f.pdf"
                    && data == b"%PDF-1.7"
                    && content_type == "application/pdf"
                    && category == "manual"
            })
            .times(1)
            .returning(|filename, _, _, _| Ok(sections(filename, 1)));

        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(1).returning(|_, _, _| Ok(()));

        let index = index(store, working_embeddings(), converter);
        index.add_to_index("docs", pdf("f.pdf")).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_empty_file_skips_embedding_and_upsert() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .times(1)
            .returning(|name| Ok(collection_info(name)));
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_embed_sections().times(0);

        let index = index(store, embeddings, converter_returning(0));
        index
            .add_to_index("docs", IndexedFile::new("empty.txt", Vec::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_empty_file_still_requires_collection() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_get_collection()
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));
        store.expect_upsert().times(0);

        let index = index(store, MockEmbeddingProvider::new(), converter_returning(0));
        let err = index
            .add_to_index("docs", IndexedFile::new("empty.txt", Vec::new()))
            .await
            .unwrap_err();

        assert!(err.is_collection_not_found());
    }

    #[tokio::test]
    async fn test_add_embedding_failure_prevents_upsert() {
        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings
            .expect_embed_sections()
            .returning(|_| Err(IndexError::Embedding("model overloaded".to_string())));

        let index = index(store, embeddings, converter_returning(3));
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(matches!(err, IndexError::Embedding(msg) if msg == "model overloaded"));
    }

    #[tokio::test]
    async fn test_add_rejects_partially_embedded_batch() {
        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings.expect_embed_sections().returning(|sections| {
            Ok(sections
                .into_iter()
                .enumerate()
                .map(|(i, s)| {
                    if i == 1 {
                        s
                    } else {
                        s.with_embedding(vec![0.1; DIM as usize])
                    }
                })
                .collect())
        });

        let index = index(store, embeddings, converter_returning(3));
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(matches!(err, IndexError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_add_rejects_wrong_dimension() {
        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings.expect_embed_sections().returning(|sections| {
            Ok(sections
                .into_iter()
                .map(|s| s.with_embedding(vec![0.1; 3]))
                .collect())
        });

        let index = index(store, embeddings, converter_returning(2));
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(matches!(err, IndexError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_add_rejects_dropped_sections() {
        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_dimension().return_const(DIM);
        embeddings.expect_embed_sections().returning(|sections| {
            Ok(sections
                .into_iter()
                .take(1)
                .map(|s| s.with_embedding(vec![0.1; DIM as usize]))
                .collect())
        });

        let index = index(store, embeddings, converter_returning(3));
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(matches!(err, IndexError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_add_propagates_conversion_errors() {
        let mut converter = MockDocumentConverter::new();
        converter
            .expect_convert()
            .returning(|_, _, _, _| Err(IndexError::Conversion("truncated PDF".to_string())));

        let mut store = MockVectorStoreClient::new();
        store.expect_upsert().times(0);

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings.expect_embed_sections().times(0);

        let index = index(store, embeddings, converter);
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(matches!(err, IndexError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_add_surfaces_missing_collection() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_upsert()
            .returning(|name, _, _| Err(IndexError::CollectionNotFound(name.to_string())));

        let index = index(store, working_embeddings(), converter_returning(1));
        let err = index.add_to_index("docs", pdf("f.pdf")).await.unwrap_err();

        assert!(err.is_collection_not_found());
    }

    #[tokio::test]
    async fn test_add_honours_wait_option() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_upsert()
            .withf(|_, _, wait| !*wait)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let index = index(store, working_embeddings(), converter_returning(1))
            .with_options(IndexOptions { wait: false });
        index.add_to_index("docs", pdf("f.pdf")).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_rejects_blank_filename() {
        let mut converter = MockDocumentConverter::new();
        converter.expect_convert().times(0);

        let index = index(
            MockVectorStoreClient::new(),
            MockEmbeddingProvider::new(),
            converter,
        );
        let err = index
            .add_to_index("docs", IndexedFile::new("  ", b"data".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, IndexError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_requires_filename() {
        let mut store = MockVectorStoreClient::new();
        store.expect_delete_by_filter().times(0);

        let index = index(store, MockEmbeddingProvider::new(), MockDocumentConverter::new());

        let err = index.delete_from_index("docs", None).await.unwrap_err();
        assert!(matches!(err, IndexError::Validation(_)));

        let err = index.delete_from_index("docs", Some("")).await.unwrap_err();
        assert!(matches!(err, IndexError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_filters_on_sourcefile() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_delete_by_filter()
            .withf(|name, filter, wait| {
                name == "docs" && *filter == FieldMatch::new("sourcefile", "f.pdf") && *wait
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let index = index(store, MockEmbeddingProvider::new(), MockDocumentConverter::new());
        index.delete_from_index("docs", Some("f.pdf")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_search_index_surfaces_not_found() {
        let mut store = MockVectorStoreClient::new();
        store
            .expect_delete_collection()
            .times(1)
            .returning(|name| Err(IndexError::CollectionNotFound(name.to_string())));

        let index = index(store, MockEmbeddingProvider::new(), MockDocumentConverter::new());
        let err = index.delete_search_index("docs").await.unwrap_err();

        assert!(err.is_collection_not_found());
    }

    #[tokio::test]
    async fn test_blank_index_name_is_rejected_before_store_calls() {
        let mut store = MockVectorStoreClient::new();
        store.expect_get_collection().times(0);
        store.expect_delete_collection().times(0);
        store.expect_delete_by_filter().times(0);

        let index = index(store, MockEmbeddingProvider::new(), MockDocumentConverter::new());

        for result in [
            index.ensure_search_index(" ").await,
            index.delete_search_index("").await,
            index.delete_from_index("", Some("f.pdf")).await,
        ] {
            assert!(matches!(result, Err(IndexError::Validation(_))));
        }
    }

    #[test]
    fn test_index_options_from_env() {
        temp_env::with_var("INDEX_WAIT", Some("false"), || {
            assert_eq!(IndexOptions::from_env().unwrap(), IndexOptions { wait: false });
        });

        temp_env::with_var_unset("INDEX_WAIT", || {
            assert_eq!(IndexOptions::from_env().unwrap(), IndexOptions::default());
        });
    }
}
