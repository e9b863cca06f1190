//! Chunk value types and their source-document offsets.
//!
//! A chunk carries a half-open byte span `[start, end)` locating it in the
//! original document. Offsets are always measured in *encoded* bytes, so for
//! a [`DecodedChunk`] the span length equals the UTF-8 byte length of the
//! text, not its character count. Chunks are immutable once constructed and
//! every transformation stage emits fresh ones.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Text encoding of a chunk's bytes.
///
/// UTF-8 is the only supported encoding; the variant exists so the wire
/// format stays explicit about it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
}

impl Encoding {
    /// Canonical name of the encoding.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("utf-8") || name.eq_ignore_ascii_case("utf8") {
            Ok(Self::Utf8)
        } else {
            Err(Error::UnsupportedEncoding(name.to_string()))
        }
    }
}

/// An encoded chunk of document bytes.
#[derive(Clone, Debug)]
pub struct EncodedChunk {
    data: Vec<u8>,
    start: u64,
    end: u64,
    encoding: Encoding,
}

/// Equality compares the bytes and their span; `encoding` is informational.
impl PartialEq for EncodedChunk {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.start == other.start && self.end == other.end
    }
}

impl Eq for EncodedChunk {}

impl EncodedChunk {
    /// Creates a chunk spanning `start..start + data.len()`.
    #[must_use]
    pub fn new(data: Vec<u8>, start: u64, encoding: Encoding) -> Self {
        let end = start + data.len() as u64;

        Self {
            data,
            start,
            end,
            encoding,
        }
    }

    /// The encoded bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of the chunk in the original document.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Byte offset one past the chunk in the original document.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// The chunk's encoding.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Length of the chunk in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the chunk holds no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the chunk, returning its bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// A decoded chunk of document text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecodedChunk {
    text: String,
    start: u64,
    end: u64,
    encoding: Encoding,
}

/// Equality compares the text and its span; `encoding` is informational.
impl PartialEq for DecodedChunk {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.start == other.start && self.end == other.end
    }
}

impl Eq for DecodedChunk {}

impl DecodedChunk {
    /// Creates a chunk spanning `start..start + text.len()` encoded bytes.
    #[must_use]
    pub fn new(text: String, start: u64, encoding: Encoding) -> Self {
        let end = start + text.len() as u64;

        Self {
            text,
            start,
            end,
            encoding,
        }
    }

    /// The decoded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the chunk in the original document.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Byte offset one past the chunk in the original document.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// The encoding the offsets are measured in.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Length of the chunk's text in encoded bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Consumes the chunk, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for DecodedChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}) {}", self.start, self.end, self.text)
    }
}
