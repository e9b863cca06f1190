//! Vector store clients and their provider-name registry.

pub mod pinecone;

pub use pinecone::PineconeStore;

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::embedding::Embedding;
use crate::error::{Error, Result};

/// Free-form metadata stored alongside a vector.
pub type VectorMetadata = serde_json::Map<String, serde_json::Value>;

/// A vector record ready for upsert.
///
/// The `id` is `"{prefix}:{start}-{end}"`, locating the embedded text by its
/// byte span in the source document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredVector {
    pub id: String,
    pub vector: Embedding,
    pub metadata: VectorMetadata,
}

impl StoredVector {
    /// Formats the record id for a document prefix and byte span.
    #[must_use]
    pub fn id_for(prefix: &str, start: u64, end: u64) -> String {
        format!("{prefix}:{start}-{end}")
    }
}

/// Updates or inserts vector records into a database.
///
/// Implementations must tolerate concurrent calls up to the sink's
/// concurrency cap.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// The largest batch a single upsert accepts.
    fn batch_limit(&self) -> usize;

    /// Upserts a batch of records.
    ///
    /// # Errors
    ///
    /// Returns `Error::BatchTooLarge` for oversized batches and `Error::Http`
    /// once the retry budget for transient failures is spent.
    async fn upsert_batch(&self, vectors: &[StoredVector]) -> Result<()>;
}

/// A factory constructing a store from configuration.
pub type StoreBuilder = fn(&Config) -> Result<Arc<dyn VectorStore>>;

fn builders() -> HashMap<&'static str, StoreBuilder> {
    let mut builders: HashMap<&'static str, StoreBuilder> = HashMap::new();
    builders.insert("pinecone", pinecone::build);
    builders
}

/// Constructs the vector store registered under `name`.
///
/// # Errors
///
/// Returns `Error::UnknownVectorStore` for unregistered provider names and
/// `Error::Config` when the provider's credentials are missing.
pub fn store_for_provider(name: &str, config: &Config) -> Result<Arc<dyn VectorStore>> {
    let build = builders()
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownVectorStore(name.to_string()))?;

    build(config)
}
