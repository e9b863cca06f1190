//! Pinecone vector store client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::{StoredVector, VectorMetadata, VectorStore};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::{self, RetryPolicy};

/// The largest batch a single upsert request accepts.
pub const UPSERT_BATCH_SIZE: usize = 100;

/// Vector store backed by a Pinecone index's data-plane host.
///
/// The index itself is provisioned out of band; this client only upserts.
#[derive(Debug)]
pub struct PineconeStore {
    client: reqwest::Client,
    api_key: String,
    upsert_url: String,
    namespace: Option<String>,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<WireVector<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

/// Pinecone's wire shape names the embedding `values`.
#[derive(Serialize)]
struct WireVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a VectorMetadata,
}

impl PineconeStore {
    /// Creates a client for an index's data-plane host.
    #[must_use]
    pub fn new(api_key: &str, index_host: &str) -> Self {
        let host = index_host.trim_end_matches('/');
        let upsert_url = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}/vectors/upsert")
        } else {
            format!("https://{host}/vectors/upsert")
        };

        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            upsert_url,
            namespace: None,
            retry: RetryPolicy::upsert(),
        }
    }

    /// Scope upserts to a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// The URL upserts are posted to.
    #[must_use]
    pub fn upsert_url(&self) -> &str {
        &self.upsert_url
    }
}

/// Registry entry: builds the store from configuration.
pub(super) fn build(config: &Config) -> Result<Arc<dyn VectorStore>> {
    let api_key = config
        .pinecone_api_key()
        .ok_or_else(|| Error::Config("PINECONE_API_KEY is required for the pinecone store".to_string()))?;
    let index_host = config
        .pinecone_index_host()
        .ok_or_else(|| Error::Config("PINECONE_INDEX_HOST is required for the pinecone store".to_string()))?;

    let mut store = PineconeStore::new(api_key, index_host);

    if let Some(namespace) = config.pinecone_namespace() {
        store = store.with_namespace(namespace);
    }

    Ok(Arc::new(store))
}

#[async_trait]
impl VectorStore for PineconeStore {
    fn batch_limit(&self) -> usize {
        UPSERT_BATCH_SIZE
    }

    async fn upsert_batch(&self, vectors: &[StoredVector]) -> Result<()> {
        if vectors.len() > UPSERT_BATCH_SIZE {
            return Err(Error::BatchTooLarge {
                size: vectors.len(),
                limit: UPSERT_BATCH_SIZE,
            });
        }

        let request = UpsertRequest {
            vectors: vectors
                .iter()
                .map(|vector| WireVector {
                    id: &vector.id,
                    values: &vector.vector,
                    metadata: &vector.metadata,
                })
                .collect(),
            namespace: self.namespace.as_deref(),
        };

        retry::with_retry(&self.retry, "upsert", || async {
            self.client
                .post(&self.upsert_url)
                .header("Api-Key", &self.api_key)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;

            Ok(())
        })
        .await
    }
}
