//! Error types for chunk-mill.

use thiserror::Error;

/// Structured error types for chunk-mill.
#[derive(Error, Debug)]
pub enum Error {
    /// Bytes that are neither valid UTF-8 nor a trailing truncation.
    #[error("invalid UTF-8 at byte {byte} of the source document")]
    Utf8 { byte: u64 },

    #[error("chunk stream and start offsets differ in length")]
    StartsMismatch,

    #[error("unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("unknown token encoding: {0}")]
    UnknownTokenEncoding(String),

    #[error("tokenizer failed: {0}")]
    Tokenizer(String),

    #[error("unknown embedding model: {0}")]
    UnknownEmbeddingModel(String),

    #[error("unknown vector store provider: {0}")]
    UnknownVectorStore(String),

    #[error("batch of {size} exceeds provider limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("batch task failed: {0}")]
    BatchTask(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Alias for a `Result` with a chunk-mill `Error`.
pub type Result<T> = core::result::Result<T, Error>;
