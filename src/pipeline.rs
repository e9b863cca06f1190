//! The composed chunk transformation pipeline.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::chunk::{DecodedChunk, EncodedChunk, Encoding};
use crate::error::Result;
use crate::options::PipelineOptions;
use crate::stream::{SplitCharHealer, SplitWordHealer, TokenResizer};
use crate::tokenizer::{self, Tokenizer};

/// Composes the transformation stages over raw byte ranges of a document:
/// wrap, split-character healing, split-word healing, token resizing.
///
/// The pipeline is lazy; nothing is processed until the returned iterator is
/// driven.
pub struct Pipeline {
    tokenizer: Arc<dyn Tokenizer>,
    options: PipelineOptions,
}

impl Debug for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Builds a pipeline, resolving the tokenizer from the options' token
    /// encoding name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for inconsistent options and
    /// `Error::UnknownTokenEncoding` for an unregistered encoding name.
    pub fn new(options: PipelineOptions) -> Result<Self> {
        options.validate()?;
        let tokenizer = tokenizer::for_encoding(options.token_encoding())?;

        Ok(Self { tokenizer, options })
    }

    /// Builds a pipeline around an injected tokenizer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for inconsistent options.
    pub fn with_tokenizer(options: PipelineOptions, tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        options.validate()?;

        Ok(Self { tokenizer, options })
    }

    /// The pipeline's tokenizer.
    #[must_use]
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// The pipeline's options.
    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs the full pipeline over `(bytes, start_offset)` ranges of a
    /// single document.
    ///
    /// Ranges may arrive out of order, non-contiguously, or with gaps;
    /// stage-local carries are healed across contiguous neighbors and
    /// dropped at gaps.
    pub fn run<R>(&self, ranges: R) -> impl Iterator<Item = Result<DecodedChunk>> + use<R>
    where
        R: IntoIterator<Item = (Vec<u8>, u64)>,
    {
        let encoded = ranges
            .into_iter()
            .map(|(data, start)| Ok(EncodedChunk::new(data, start, Encoding::Utf8)));

        let decoded = SplitCharHealer::new(encoded);
        let healed = SplitWordHealer::with_delimiters(decoded, self.options.word_delimiters().clone());

        TokenResizer::with_bounds(
            healed,
            Arc::clone(&self.tokenizer),
            self.options.min_tokens(),
            self.options.max_tokens(),
            self.options.preferred_delimiters().clone(),
        )
    }
}
