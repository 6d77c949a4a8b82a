use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Payload field holding the originating file of a section
pub const SOURCEFILE_FIELD: &str = "sourcefile";

/// A file handed to the indexer. Lives for the duration of one `add_to_index` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    pub filename: String,
    pub data: Vec<u8>,
    /// Content-type hint, e.g. `application/pdf`
    pub content_type: String,
    pub category: String,
}

impl IndexedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
            content_type: "application/octet-stream".to_string(),
            category: String::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// One addressable chunk of a document.
///
/// `id` must be unique within an index and stable across re-indexing of the
/// same logical section; upserts are keyed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: String,
    pub content: String,
    pub category: String,
    /// Locator within the source file, e.g. `report.pdf#page=3`
    pub sourcepage: String,
    pub sourcefile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl ContentSection {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        sourcefile: impl Into<String>,
    ) -> Self {
        let sourcefile = sourcefile.into();
        Self {
            id: id.into(),
            content: content.into(),
            category: String::new(),
            sourcepage: sourcefile.clone(),
            sourcefile,
            embedding: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sourcepage(mut self, sourcepage: impl Into<String>) -> Self {
        self.sourcepage = sourcepage.into();
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn payload(&self) -> SectionPayload {
        SectionPayload {
            content: self.content.clone(),
            category: self.category.clone(),
            sourcepage: self.sourcepage.clone(),
            sourcefile: self.sourcefile.clone(),
        }
    }
}

/// Payload stored next to each vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPayload {
    pub content: String,
    pub category: String,
    pub sourcepage: String,
    pub sourcefile: String,
}

impl SectionPayload {
    /// Value of a payload field by name, as used by filter deletes
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "content" => Some(&self.content),
            "category" => Some(&self.category),
            "sourcepage" => Some(&self.sourcepage),
            SOURCEFILE_FIELD => Some(&self.sourcefile),
            _ => None,
        }
    }
}

/// Parallel ids / vectors / payloads for a single batched upsert.
///
/// The three sequences always have the same length; position `i` in each
/// describes the same section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBatch {
    ids: Vec<String>,
    vectors: Vec<Vec<f32>>,
    payloads: Vec<SectionPayload>,
}

impl PointBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            vectors: Vec::with_capacity(capacity),
            payloads: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, id: String, vector: Vec<f32>, payload: SectionPayload) {
        self.ids.push(id);
        self.vectors.push(vector);
        self.payloads.push(payload);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn payloads(&self) -> &[SectionPayload] {
        &self.payloads
    }

    pub fn into_points(self) -> impl Iterator<Item = (String, Vec<f32>, SectionPayload)> {
        self.ids
            .into_iter()
            .zip(self.vectors)
            .zip(self.payloads)
            .map(|((id, vector), payload)| (id, vector, payload))
    }
}

/// Equality match on a single payload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: String,
    pub value: String,
}

impl FieldMatch {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn sourcefile(filename: impl Into<String>) -> Self {
        Self::new(SOURCEFILE_FIELD, filename)
    }

    pub fn matches(&self, payload: &SectionPayload) -> bool {
        payload.field(&self.field) == Some(self.value.as_str())
    }
}

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

/// Parameters a collection is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    pub vector_size: u64,
    pub distance: DistanceMetric,
}

impl CollectionSpec {
    pub fn cosine(vector_size: u64) -> Self {
        Self {
            vector_size,
            distance: DistanceMetric::Cosine,
        }
    }
}

/// Collection metadata as reported by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub vector_size: u64,
    pub distance: DistanceMetric,
    pub points_count: u64,
}

/// Supported OpenAI embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingModel {
    #[default]
    TextEmbedding3Small,
    TextEmbedding3Large,
    TextEmbeddingAda002,
    /// `text-embedding-3-small` shortened to the given dimension
    Custom(u32),
}

impl EmbeddingModel {
    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small | EmbeddingModel::Custom(_) => {
                "text-embedding-3-small"
            }
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }

    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
            EmbeddingModel::Custom(dim) => *dim,
        }
    }
}

impl FromStr for EmbeddingModel {
    type Err = String;

    /// Accepts a model name, or `text-embedding-3-small:<dim>` for a shortened vector
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text-embedding-3-small" => Ok(EmbeddingModel::TextEmbedding3Small),
            "text-embedding-3-large" => Ok(EmbeddingModel::TextEmbedding3Large),
            "text-embedding-ada-002" => Ok(EmbeddingModel::TextEmbeddingAda002),
            other => match other.strip_prefix("text-embedding-3-small:") {
                Some(dim) => dim
                    .parse()
                    .map(EmbeddingModel::Custom)
                    .map_err(|e| format!("invalid dimension '{}': {}", dim, e)),
                None => Err(format!("unknown embedding model '{}'", other)),
            },
        }
    }
}
