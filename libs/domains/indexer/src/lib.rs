//! Index Synchronization Library
//!
//! Keeps a vector collection consistent with a corpus of ingested files:
//! create the collection if absent, upsert a file's sections when it is
//! added, delete them by source file when it is removed.
//!
//! # Architecture
//!
//! ```text
//!                ┌──────────────┐
//!                │ VectorIndex  │  ← ensure / add / delete / drop
//!                └──────┬───────┘
//!        ┌──────────────┼──────────────────┐
//! ┌──────▼───────┐ ┌────▼──────────────┐ ┌─▼─────────────────┐
//! │ Document     │ │ EmbeddingProvider │ │ VectorStoreClient │
//! │ Converter    │ │    (trait)        │ │    (trait)        │
//! └──────────────┘ └────┬──────────────┘ └─┬─────────────────┘
//!                  ┌────▼──────────┐  ┌────▼──────────┐
//!                  │OpenAIProvider │  │ QdrantStore   │
//!                  └───────────────┘  │ InMemoryStore │
//!                                     └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use core_config::FromEnv;
//! use domain_indexer::{
//!     ContentSection, DocumentConverter, IndexOptions, IndexResult, IndexedFile,
//!     OpenAIProvider, QdrantConfig, QdrantStore, VectorIndex,
//! };
//!
//! struct WholeFile;
//!
//! #[async_trait::async_trait]
//! impl DocumentConverter for WholeFile {
//!     async fn convert(
//!         &self,
//!         filename: &str,
//!         data: &[u8],
//!         _content_type: &str,
//!         category: &str,
//!     ) -> IndexResult<Vec<ContentSection>> {
//!         let text = String::from_utf8_lossy(data).into_owned();
//!         Ok(vec![
//!             ContentSection::new(format!("{filename}-0"), text, filename).with_category(category),
//!         ])
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = QdrantStore::new(QdrantConfig::from_env()?)?;
//! let index = VectorIndex::new(store, Arc::new(OpenAIProvider::from_env()?), Arc::new(WholeFile))
//!     .with_options(IndexOptions::from_env()?);
//!
//! index.ensure_search_index("handbook").await?;
//! index
//!     .add_to_index("handbook", IndexedFile::new("intro.txt", b"Welcome".to_vec()))
//!     .await?;
//! index.delete_from_index("handbook", Some("intro.txt")).await?;
//! # Ok(())
//! # }
//! ```

pub mod converter;
pub mod embedding;
pub mod error;
pub mod index;
pub mod memory;
pub mod models;
pub mod qdrant;
pub mod store;

// Re-export commonly used types
pub use converter::DocumentConverter;
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{ErrorKind, IndexError, IndexResult};
pub use index::{IndexOptions, SearchIndex, VectorIndex};
pub use memory::{InMemoryStore, StoredPoint};
pub use models::{
    CollectionInfo, CollectionSpec, ContentSection, DistanceMetric, EmbeddingModel, FieldMatch,
    IndexedFile, PointBatch, SOURCEFILE_FIELD, SectionPayload,
};
pub use qdrant::{QdrantConfig, QdrantStore};
pub use store::VectorStoreClient;
