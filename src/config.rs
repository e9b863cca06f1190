//! Process configuration from environment variables.
//!
//! # Environment Variables
//!
//! - `EMBEDDING_MODEL_NAME` (default: `text-embedding-ada-002`)
//! - `VECTOR_STORE_PROVIDER_NAME` (default: `pinecone`)
//! - `CHUNK_SIZE` (default: `500`)
//! - `MIN_TOKENS_PER_CHUNK` / `MAX_TOKENS_PER_CHUNK` (defaults: `50` / `200`)
//! - `MAX_CONCURRENT_BATCHES` (default: `10`)
//! - `TOKEN_ENCODING_NAME` (default: `cl100k_base`)
//! - `OPENAI_API_KEY`, `PINECONE_API_KEY`, `PINECONE_INDEX_HOST`,
//!   `PINECONE_NAMESPACE` (no defaults)
//!
//! Numeric variables that fail to parse are a startup error, not a silent
//! fallback.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::PipelineOptions;

/// Default embedding model.
pub const EMBEDDING_MODEL_DEFAULT: &str = "text-embedding-ada-002";

/// Default vector store provider.
pub const VECTOR_STORE_DEFAULT: &str = "pinecone";

/// Default byte size of raw input partitions.
pub const CHUNK_SIZE_DEFAULT: usize = 500;

/// Default cap on in-flight embed-and-upsert batches.
pub const MAX_CONCURRENT_BATCHES_DEFAULT: usize = 10;

const ENV_EMBEDDING_MODEL: &str = "EMBEDDING_MODEL_NAME";
const ENV_VECTOR_STORE: &str = "VECTOR_STORE_PROVIDER_NAME";
const ENV_CHUNK_SIZE: &str = "CHUNK_SIZE";
const ENV_MIN_TOKENS: &str = "MIN_TOKENS_PER_CHUNK";
const ENV_MAX_TOKENS: &str = "MAX_TOKENS_PER_CHUNK";
const ENV_MAX_CONCURRENT_BATCHES: &str = "MAX_CONCURRENT_BATCHES";
const ENV_TOKEN_ENCODING: &str = "TOKEN_ENCODING_NAME";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_PINECONE_API_KEY: &str = "PINECONE_API_KEY";
const ENV_PINECONE_INDEX_HOST: &str = "PINECONE_INDEX_HOST";
const ENV_PINECONE_NAMESPACE: &str = "PINECONE_NAMESPACE";

/// Runtime configuration for the pipeline and its providers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    embedding_model: String,
    vector_store: String,
    chunk_size: usize,
    min_tokens: usize,
    max_tokens: usize,
    max_concurrent_batches: usize,
    token_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinecone_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinecone_index_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinecone_namespace: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an injected variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a numeric variable fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            embedding_model: lookup(ENV_EMBEDDING_MODEL)
                .unwrap_or_else(|| EMBEDDING_MODEL_DEFAULT.to_string()),
            vector_store: lookup(ENV_VECTOR_STORE).unwrap_or_else(|| VECTOR_STORE_DEFAULT.to_string()),
            chunk_size: parse_count(ENV_CHUNK_SIZE, lookup(ENV_CHUNK_SIZE), CHUNK_SIZE_DEFAULT)?,
            min_tokens: parse_count(
                ENV_MIN_TOKENS,
                lookup(ENV_MIN_TOKENS),
                crate::stream::resize::MIN_TOKENS_DEFAULT,
            )?,
            max_tokens: parse_count(
                ENV_MAX_TOKENS,
                lookup(ENV_MAX_TOKENS),
                crate::stream::resize::MAX_TOKENS_DEFAULT,
            )?,
            max_concurrent_batches: parse_count(
                ENV_MAX_CONCURRENT_BATCHES,
                lookup(ENV_MAX_CONCURRENT_BATCHES),
                MAX_CONCURRENT_BATCHES_DEFAULT,
            )?,
            token_encoding: lookup(ENV_TOKEN_ENCODING)
                .unwrap_or_else(|| crate::tokenizer::TOKEN_ENCODING_DEFAULT.to_string()),
            openai_api_key: lookup(ENV_OPENAI_API_KEY),
            pinecone_api_key: lookup(ENV_PINECONE_API_KEY),
            pinecone_index_host: lookup(ENV_PINECONE_INDEX_HOST),
            pinecone_namespace: lookup(ENV_PINECONE_NAMESPACE),
        })
    }

    /// Get the embedding model name.
    #[must_use]
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Get the vector store provider name.
    #[must_use]
    pub fn vector_store(&self) -> &str {
        &self.vector_store
    }

    /// Get the byte size of raw input partitions.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the minimum tokens per chunk.
    #[must_use]
    pub const fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    /// Get the maximum tokens per chunk.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Get the cap on in-flight batches.
    #[must_use]
    pub const fn max_concurrent_batches(&self) -> usize {
        self.max_concurrent_batches
    }

    /// Get the token encoding name.
    #[must_use]
    pub fn token_encoding(&self) -> &str {
        &self.token_encoding
    }

    /// Get the OpenAI API key, if configured.
    #[must_use]
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    /// Get the Pinecone API key, if configured.
    #[must_use]
    pub fn pinecone_api_key(&self) -> Option<&str> {
        self.pinecone_api_key.as_deref()
    }

    /// Get the Pinecone index host, if configured.
    #[must_use]
    pub fn pinecone_index_host(&self) -> Option<&str> {
        self.pinecone_index_host.as_deref()
    }

    /// Get the Pinecone namespace, if configured.
    #[must_use]
    pub fn pinecone_namespace(&self) -> Option<&str> {
        self.pinecone_namespace.as_deref()
    }

    /// Derives pipeline options from this configuration.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_min_tokens(self.min_tokens)
            .with_max_tokens(self.max_tokens)
            .with_token_encoding(&self.token_encoding)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None).expect("defaults parse")
    }
}

fn parse_count(key: &str, value: Option<String>, default: usize) -> Result<usize> {
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed: usize = value
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a positive integer, got {value:?}")))?;

    if parsed == 0 {
        return Err(Error::Config(format!("{key} must be at least one")));
    }

    Ok(parsed)
}
