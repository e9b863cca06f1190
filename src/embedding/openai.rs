//! OpenAI embedding provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Embedding, EmbeddingProvider};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::{self, RetryPolicy};

/// The largest batch the embeddings endpoint accepts.
pub const EMBED_BATCH_SIZE: usize = 2048;

/// Model names served by this provider.
pub const MODELS: &[&str] = &[
    "text-embedding-ada-002",
    "text-embedding-3-small",
    "text-embedding-3-large",
];

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Embedding provider backed by the OpenAI embeddings API.
#[derive(Debug)]
pub struct OpenAiEmbedding {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Embedding,
}

impl OpenAiEmbedding {
    /// Creates a provider for `model` authenticated with `api_key`.
    #[must_use]
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            url: EMBEDDINGS_URL.to_string(),
            retry: RetryPolicy::embedding(),
        }
    }

    /// Point the provider at an OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// The model this provider embeds with.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Registry entry: builds the provider from configuration.
pub(super) fn build(model: &str, config: &Config) -> Result<Arc<dyn EmbeddingProvider>> {
    let api_key = config
        .openai_api_key()
        .ok_or_else(|| Error::Config("OPENAI_API_KEY is required for OpenAI embedding models".to_string()))?;

    Ok(Arc::new(OpenAiEmbedding::new(api_key, model)))
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedding {
    fn batch_limit(&self) -> usize {
        EMBED_BATCH_SIZE
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.len() > EMBED_BATCH_SIZE {
            return Err(Error::BatchTooLarge {
                size: texts.len(),
                limit: EMBED_BATCH_SIZE,
            });
        }

        // Embedded newlines degrade embedding quality for older models.
        let input: Vec<String> = texts.iter().map(|text| text.replace('\n', " ")).collect();
        let request = EmbeddingsRequest {
            model: &self.model,
            input: &input,
        };

        let response: EmbeddingsResponse = retry::with_retry(&self.retry, "embedding", || async {
            let response = self
                .client
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;

            Ok(response.json().await?)
        })
        .await?;

        // The API does not promise response order; restore input order.
        let mut rows = response.data;
        rows.sort_unstable_by_key(|row| row.index);

        Ok(rows.into_iter().map(|row| row.embedding).collect())
    }
}
