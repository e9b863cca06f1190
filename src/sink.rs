//! Concurrent batch sink: embed decoded chunks and upsert the vectors.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::chunk::DecodedChunk;
use crate::embedding::EmbeddingProvider;
use crate::error::{Error, Result};
use crate::vector::{StoredVector, VectorMetadata, VectorStore};

/// Groups an iterator's items into vectors of at most `size`.
///
/// The final batch holds whatever remains and may be smaller.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn batched<I>(iter: I, size: usize) -> impl Iterator<Item = Vec<I::Item>>
where
    I: IntoIterator,
{
    assert!(size >= 1, "batch size must be at least one");

    let mut iter = iter.into_iter();

    core::iter::from_fn(move || {
        let batch: Vec<_> = iter.by_ref().take(size).collect();
        (!batch.is_empty()).then_some(batch)
    })
}

/// Drives a decoded chunk stream through batched embedding and upserting
/// with bounded concurrency.
///
/// Batches run as independent tasks capped by a semaphore; the producer
/// blocks on permit acquisition, which is the backpressure mechanism.
/// Completion order between in-flight batches is not preserved; every
/// record's id carries its own byte span, so ordering is invisible to the
/// store. The first failure stops intake, in-flight batches are awaited, and
/// that error is returned. There is no partial-commit recovery.
pub struct BatchSink {
    embedding: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    max_concurrent_batches: usize,
    batch_size: Option<usize>,
}

impl Debug for BatchSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchSink")
            .field("max_concurrent_batches", &self.max_concurrent_batches)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl BatchSink {
    /// Creates a sink over an embedding provider and a vector store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when `max_concurrent_batches` is zero.
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        max_concurrent_batches: usize,
    ) -> Result<Self> {
        if max_concurrent_batches == 0 {
            return Err(Error::Config("max concurrent batches must be at least one".to_string()));
        }

        Ok(Self {
            embedding,
            store,
            max_concurrent_batches,
            batch_size: None,
        })
    }

    /// Override the batch size; it may not exceed either provider limit.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// The batch size the sink will use.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when an explicit batch size is zero or above
    /// a provider limit.
    pub fn batch_size(&self) -> Result<usize> {
        let limit = self.embedding.batch_limit().min(self.store.batch_limit());

        match self.batch_size {
            None => Ok(limit),
            Some(0) => Err(Error::Config("batch size must be at least one".to_string())),
            Some(size) if size > limit => Err(Error::Config(format!(
                "batch size {size} exceeds the provider limit of {limit}"
            ))),
            Some(size) => Ok(size),
        }
    }

    /// Embeds and upserts every chunk of the stream.
    ///
    /// Record ids are `"{prefix}:{start}-{end}"`; `metadata` is attached to
    /// every record.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline, embedding, or upsert error after waiting
    /// out the batches already in flight.
    pub async fn run<I>(&self, chunks: I, prefix: &str, metadata: VectorMetadata) -> Result<()>
    where
        I: IntoIterator<Item = Result<DecodedChunk>>,
    {
        let batch_size = self.batch_size()?;
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_batches));
        let mut tasks: JoinSet<Result<()>> = JoinSet::new();
        let mut first_error: Option<Error> = None;

        'intake: for batch in batched(chunks, batch_size) {
            let mut ready = Vec::with_capacity(batch.len());

            for item in batch {
                match item {
                    Ok(chunk) => ready.push(chunk),
                    Err(err) => {
                        first_error.get_or_insert(err);
                        break 'intake;
                    }
                }
            }

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore is never closed");

            while let Some(joined) = tasks.try_join_next() {
                record_failure(joined, &mut first_error);
            }

            if first_error.is_some() {
                break;
            }

            let embedding = Arc::clone(&self.embedding);
            let store = Arc::clone(&self.store);
            let prefix = prefix.to_string();
            let metadata = metadata.clone();

            tasks.spawn(async move {
                let _permit = permit;
                embed_and_upsert(&ready, &prefix, metadata, &*embedding, &*store).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            record_failure(joined, &mut first_error);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Embeds one batch and upserts the resulting records.
async fn embed_and_upsert(
    chunks: &[DecodedChunk],
    prefix: &str,
    metadata: VectorMetadata,
    embedding: &dyn EmbeddingProvider,
    store: &dyn VectorStore,
) -> Result<()> {
    if chunks.is_empty() {
        return Ok(());
    }

    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text().to_string()).collect();
    let embeddings = embedding.embed_batch(&texts).await?;

    let vectors: Vec<StoredVector> = embeddings
        .into_iter()
        .zip(chunks)
        .map(|(vector, chunk)| StoredVector {
            id: StoredVector::id_for(prefix, chunk.start(), chunk.end()),
            vector,
            metadata: metadata.clone(),
        })
        .collect();

    store.upsert_batch(&vectors).await
}

fn record_failure(joined: core::result::Result<Result<()>, tokio::task::JoinError>, first_error: &mut Option<Error>) {
    let failure = match joined {
        Ok(Ok(())) => return,
        Ok(Err(err)) => err,
        Err(join_err) => Error::BatchTask(join_err.to_string()),
    };

    if first_error.is_none() {
        *first_error = Some(failure);
    } else {
        tracing::warn!(error = %failure, "additional batch failure after abort");
    }
}
