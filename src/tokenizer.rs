//! BPE tokenizer abstraction and the tiktoken-backed default.
//!
//! The resizer stage counts and cuts in tokens, so it takes a tokenizer as
//! an injected dependency rather than reaching for a global. The default
//! adapter wraps a `tiktoken-rs` encoding; text that happens to contain
//! special-token sequences is encoded as ordinary bytes.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use crate::error::{Error, Result};

/// A single BPE token id.
pub type Token = u32;

/// Default token encoding name.
pub const TOKEN_ENCODING_DEFAULT: &str = "cl100k_base";

/// Named encodings the registry can construct.
const ENCODINGS: &[(&str, fn() -> anyhow::Result<CoreBPE>)] = &[
    ("cl100k_base", tiktoken_rs::cl100k_base),
    ("o200k_base", tiktoken_rs::o200k_base),
    ("p50k_base", tiktoken_rs::p50k_base),
    ("r50k_base", tiktoken_rs::r50k_base),
];

/// Encodes text to token ids and back.
///
/// Implementations must round-trip: `decode(encode(s)) == s` for any `s` the
/// pipeline produces.
pub trait Tokenizer: Send + Sync {
    /// Encodes `text`, treating special-token sequences as ordinary bytes.
    fn encode(&self, text: &str) -> Vec<Token>;

    /// Decodes token ids back to text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Tokenizer` if the ids do not decode to valid text.
    fn decode(&self, tokens: &[Token]) -> Result<String>;

    /// Number of tokens `text` encodes to.
    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// A byte-pair encoding tokenizer backed by `tiktoken-rs`.
pub struct Bpe {
    bpe: CoreBPE,
    name: String,
}

impl Debug for Bpe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bpe").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Bpe {
    /// Constructs the tokenizer for a named encoding.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownTokenEncoding` for names outside the registry
    /// and `Error::Tokenizer` if the encoding data fails to load.
    pub fn new(name: &str) -> Result<Self> {
        let build = ENCODINGS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, build)| build)
            .ok_or_else(|| Error::UnknownTokenEncoding(name.to_string()))?;

        let bpe = build().map_err(|err| Error::Tokenizer(err.to_string()))?;

        Ok(Self {
            bpe,
            name: name.to_string(),
        })
    }

    /// The encoding's registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Tokenizer for Bpe {
    fn encode(&self, text: &str) -> Vec<Token> {
        self.bpe.encode_ordinary(text)
    }

    fn decode(&self, tokens: &[Token]) -> Result<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|err| Error::Tokenizer(err.to_string()))
    }
}

/// Constructs a shared tokenizer for a named encoding.
///
/// # Errors
///
/// Returns `Error::UnknownTokenEncoding` for unregistered names.
pub fn for_encoding(name: &str) -> Result<Arc<dyn Tokenizer>> {
    Ok(Arc::new(Bpe::new(name)?))
}

/// Names of the encodings the registry can construct.
#[must_use]
pub fn encoding_names() -> Vec<&'static str> {
    ENCODINGS.iter().map(|(name, _)| *name).collect()
}
