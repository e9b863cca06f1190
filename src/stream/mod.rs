//! Lazy chunk streams and their transformation stages.
//!
//! A stream is an ordinary iterator of `Result` chunk items. Errors travel
//! through the stages like any other item and fuse the stage that meets
//! them, so a fatal decode failure surfaces exactly once at the consumer.
//! Streams are single-pass: construct, compose, then consume.
//!
//! The stages compose left to right:
//!
//! ```text
//! byte ranges -> wrap -> SplitCharHealer -> SplitWordHealer -> TokenResizer
//! ```

pub mod decode;
pub mod resize;
pub mod words;

pub use decode::SplitCharHealer;
pub use resize::TokenResizer;
pub use words::SplitWordHealer;

use crate::chunk::{DecodedChunk, EncodedChunk, Encoding};
use crate::error::{Error, Result};

/// Wraps raw byte chunks into an encoded stream with contiguous numbering:
/// the first chunk begins at `start` and each next chunk begins where the
/// previous one ended.
pub fn encoded<R>(raw: R, start: u64, encoding: Encoding) -> impl Iterator<Item = Result<EncodedChunk>>
where
    R: IntoIterator<Item = Vec<u8>>,
{
    let mut next_start = start;

    raw.into_iter().map(move |data| {
        let chunk = EncodedChunk::new(data, next_start, encoding);
        next_start = chunk.end();
        Ok(chunk)
    })
}

/// Wraps raw byte chunks into an encoded stream with an explicit start
/// offset per chunk.
///
/// The two iterators must have the same length; a mismatch ends the stream
/// with [`Error::StartsMismatch`].
pub fn encoded_at<R, S>(
    raw: R,
    starts: S,
    encoding: Encoding,
) -> impl Iterator<Item = Result<EncodedChunk>>
where
    R: IntoIterator<Item = Vec<u8>>,
    S: IntoIterator<Item = u64>,
{
    let mut raw = raw.into_iter();
    let mut starts = starts.into_iter();
    let mut fused = false;

    core::iter::from_fn(move || {
        if fused {
            return None;
        }

        match (raw.next(), starts.next()) {
            (None, None) => None,
            (Some(data), Some(start)) => Some(Ok(EncodedChunk::new(data, start, encoding))),
            _ => {
                fused = true;
                Some(Err(Error::StartsMismatch))
            }
        }
    })
}

/// Wraps raw text chunks into a decoded stream with contiguous numbering in
/// encoded bytes.
pub fn decoded<R>(raw: R, start: u64, encoding: Encoding) -> impl Iterator<Item = Result<DecodedChunk>>
where
    R: IntoIterator<Item = String>,
{
    let mut next_start = start;

    raw.into_iter().map(move |text| {
        let chunk = DecodedChunk::new(text, next_start, encoding);
        next_start = chunk.end();
        Ok(chunk)
    })
}

/// Wraps raw text chunks into a decoded stream with an explicit start offset
/// per chunk.
///
/// The two iterators must have the same length; a mismatch ends the stream
/// with [`Error::StartsMismatch`].
pub fn decoded_at<R, S>(
    raw: R,
    starts: S,
    encoding: Encoding,
) -> impl Iterator<Item = Result<DecodedChunk>>
where
    R: IntoIterator<Item = String>,
    S: IntoIterator<Item = u64>,
{
    let mut raw = raw.into_iter();
    let mut starts = starts.into_iter();
    let mut fused = false;

    core::iter::from_fn(move || {
        if fused {
            return None;
        }

        match (raw.next(), starts.next()) {
            (None, None) => None,
            (Some(text), Some(start)) => Some(Ok(DecodedChunk::new(text, start, encoding))),
            _ => {
                fused = true;
                Some(Err(Error::StartsMismatch))
            }
        }
    })
}
