use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{IndexError, IndexResult};
use crate::models::{ContentSection, EmbeddingModel};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound the embeddings endpoint accepts for `input` in one request
const MAX_INPUTS_PER_REQUEST: usize = 2048;

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: EmbeddingModel,
    pub max_batch_size: usize,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: EmbeddingModel::default(),
            max_batch_size: MAX_INPUTS_PER_REQUEST,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    /// Cap the number of inputs per request, clamped to what the API accepts
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.clamp(1, MAX_INPUTS_PER_REQUEST);
        self
    }
}

impl FromEnv for OpenAIConfig {
    /// Requires OPENAI_API_KEY; OPENAI_BASE_URL and OPENAI_EMBEDDING_MODEL are optional
    fn from_env() -> Result<Self, ConfigError> {
        let model_name = env_or_default("OPENAI_EMBEDDING_MODEL", "text-embedding-3-small");
        let model: EmbeddingModel = model_name
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "OPENAI_EMBEDDING_MODEL".to_string(),
                details,
            })?;

        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            model,
            max_batch_size: MAX_INPUTS_PER_REQUEST,
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> IndexResult<Self> {
        Ok(Self::new(OpenAIConfig::from_env()?))
    }

    /// Embed `texts` in as many requests as the batch limit requires,
    /// preserving input order across requests
    async fn embed_texts(&self, texts: &[String]) -> IndexResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.max_batch_size.max(1)) {
            vectors.extend(self.embed_request(chunk).await?);
        }
        Ok(vectors)
    }

    async fn embed_request(&self, texts: &[String]) -> IndexResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let dimensions = match self.config.model {
            EmbeddingModel::Custom(dim) => Some(dim),
            _ => None,
        };

        let request = EmbeddingRequest {
            model: self.config.model.model_name(),
            input: texts,
            dimensions,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(IndexError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let mut data = response.json::<EmbeddingResponse>().await?.data;
        if data.len() != expected {
            return Err(IndexError::Embedding(format!(
                "OpenAI returned {} embeddings for {} inputs",
                data.len(),
                expected
            )));
        }

        // The API does not promise response order
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn dimension(&self) -> u32 {
        self.config.model.dimension()
    }

    async fn embed_sections(
        &self,
        sections: Vec<ContentSection>,
    ) -> IndexResult<Vec<ContentSection>> {
        if sections.is_empty() {
            return Ok(sections);
        }

        let texts: Vec<String> = sections.iter().map(|s| s.content.clone()).collect();
        let vectors = self.embed_texts(&texts).await?;

        Ok(sections
            .into_iter()
            .zip(vectors)
            .map(|(section, vector)| section.with_embedding(vector))
            .collect())
    }
}
