//! The `chunk-mill` library converts arbitrary byte ranges of a text
//! document into token-bounded chunks suitable for embedding and vector
//! storage.
//!
//! An upstream object store partitions uploads into fixed-size byte ranges,
//! which may arrive out of order, non-contiguously, or not at all. The
//! pipeline wraps those ranges with offset metadata, decodes them while
//! healing multi-byte characters split across contiguous partitions, moves
//! words split across partitions forward, and re-chunks the text into token
//! windows cut at sentence delimiters. Every emitted chunk carries the exact
//! byte span it occupies in the original document.
//!
//! ```
//! use chunk_mill::{Pipeline, PipelineOptions};
//!
//! let options = PipelineOptions::default()
//!     .with_min_tokens(1)
//!     .with_max_tokens(20);
//! let pipeline = Pipeline::new(options)?;
//!
//! let document = "One sentence. And another one after it.";
//! let ranges = vec![
//!     (document.as_bytes()[..16].to_vec(), 0),
//!     (document.as_bytes()[16..].to_vec(), 16),
//! ];
//!
//! let chunks = pipeline.run(ranges).collect::<chunk_mill::Result<Vec<_>>>()?;
//! let rejoined: String = chunks.iter().map(|chunk| chunk.text()).collect();
//! assert_eq!(rejoined, document);
//! # Ok::<(), chunk_mill::Error>(())
//! ```

pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod retry;
pub mod sequence;
pub mod sink;
pub mod stream;
pub mod tokenizer;
pub mod utf8;
pub mod vector;

pub use chunk::{DecodedChunk, EncodedChunk, Encoding};
pub use config::Config;
pub use error::{Error, Result};
pub use options::PipelineOptions;
pub use pipeline::Pipeline;
pub use sequence::CharSet;
pub use sink::BatchSink;
pub use tokenizer::{Token, Tokenizer};
