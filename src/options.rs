//! Configuration options for the chunk pipeline.
//!
//! [`PipelineOptions`] consolidates the tunable knobs of the transformation
//! stages into one builder-style structure.
//!
//! ```
//! use chunk_mill::PipelineOptions;
//!
//! let options = PipelineOptions::default()
//!     .with_min_tokens(15)
//!     .with_max_tokens(25);
//! assert_eq!(options.min_tokens(), 15);
//! ```

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sequence::CharSet;
use crate::stream::resize::{MAX_TOKENS_DEFAULT, MIN_TOKENS_DEFAULT, PREFERRED_DELIMITERS_DEFAULT};
use crate::stream::words::WORD_DELIMITERS_DEFAULT;
use crate::tokenizer::TOKEN_ENCODING_DEFAULT;

/// Unified configuration for the chunk transformation pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Minimum tokens per resized chunk.
    min_tokens: usize,

    /// Maximum tokens per resized chunk.
    max_tokens: usize,

    /// Token encoding name for the resizer's tokenizer.
    token_encoding: String,

    /// Characters that delimit words for the split-word healer.
    word_delimiters: CharSet,

    /// Characters the resizer prefers to cut at.
    preferred_delimiters: CharSet,
}

impl PipelineOptions {
    /// Creates options with explicit token bounds and the default
    /// delimiters.
    #[must_use]
    pub fn new(min_tokens: usize, max_tokens: usize) -> Self {
        Self {
            min_tokens,
            max_tokens,
            ..Self::default()
        }
    }

    /// Set the minimum tokens per chunk.
    #[must_use]
    pub const fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Set the maximum tokens per chunk.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the token encoding name.
    #[must_use]
    pub fn with_token_encoding(mut self, name: &str) -> Self {
        self.token_encoding = name.to_string();
        self
    }

    /// Set the word delimiter set.
    #[must_use]
    pub fn with_word_delimiters(mut self, delimiters: CharSet) -> Self {
        self.word_delimiters = delimiters;
        self
    }

    /// Set the preferred cut delimiter set.
    #[must_use]
    pub fn with_preferred_delimiters(mut self, delimiters: CharSet) -> Self {
        self.preferred_delimiters = delimiters;
        self
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

    /// Get the token encoding name.
    #[must_use]
    pub fn token_encoding(&self) -> &str {
        &self.token_encoding
    }

    /// Get the word delimiter set.
    #[must_use]
    pub const fn word_delimiters(&self) -> &CharSet {
        &self.word_delimiters
    }

    /// Get the preferred cut delimiter set.
    #[must_use]
    pub const fn preferred_delimiters(&self) -> &CharSet {
        &self.preferred_delimiters
    }

    /// Checks the options for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the token bounds are zero or inverted.
    pub fn validate(&self) -> Result<()> {
        if self.min_tokens == 0 {
            return Err(Error::Config("minimum tokens per chunk must be at least one".to_string()));
        }

        if self.min_tokens > self.max_tokens {
            return Err(Error::Config(format!(
                "minimum tokens per chunk ({}) exceeds maximum ({})",
                self.min_tokens, self.max_tokens
            )));
        }

        Ok(())
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_tokens: MIN_TOKENS_DEFAULT,
            max_tokens: MAX_TOKENS_DEFAULT,
            token_encoding: TOKEN_ENCODING_DEFAULT.to_string(),
            word_delimiters: CharSet::new(WORD_DELIMITERS_DEFAULT),
            preferred_delimiters: CharSet::new(PREFERRED_DELIMITERS_DEFAULT),
        }
    }
}

impl Display for PipelineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokens={}..={}, encoding={}",
            self.min_tokens, self.max_tokens, self.token_encoding
        )
    }
}
