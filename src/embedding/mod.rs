//! Embedding providers and their model-name registry.

pub mod openai;

pub use openai::OpenAiEmbedding;

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;

use crate::config::Config;
use crate::error::{Error, Result};

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// Turns batches of texts into embedding vectors.
///
/// Implementations must tolerate concurrent calls up to the sink's
/// concurrency cap.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// The largest batch a single call accepts.
    fn batch_limit(&self) -> usize;

    /// Embeds a batch of texts, one vector per text, in input order.
    ///
    /// # Errors
    ///
    /// Returns `Error::BatchTooLarge` for oversized batches and `Error::Http`
    /// once the retry budget for transient failures is spent.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

/// A factory constructing a provider for a model name from configuration.
pub type ProviderBuilder = fn(&str, &Config) -> Result<Arc<dyn EmbeddingProvider>>;

fn builders() -> HashMap<&'static str, ProviderBuilder> {
    let mut builders: HashMap<&'static str, ProviderBuilder> = HashMap::new();

    for model in openai::MODELS {
        builders.insert(*model, openai::build);
    }

    builders
}

/// Constructs the embedding provider registered for `model`.
///
/// # Errors
///
/// Returns `Error::UnknownEmbeddingModel` for unregistered model names and
/// `Error::Config` when the provider's credentials are missing.
pub fn provider_for_model(model: &str, config: &Config) -> Result<Arc<dyn EmbeddingProvider>> {
    let build = builders()
        .get(model)
        .copied()
        .ok_or_else(|| Error::UnknownEmbeddingModel(model.to_string()))?;

    build(model, config)
}

/// Model names with a registered provider.
#[must_use]
pub fn model_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = builders().keys().copied().collect();
    names.sort_unstable();
    names
}
