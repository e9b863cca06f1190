//! Split-character healing decoder: encoded chunks in, decoded chunks out.

use core::mem;

use crate::chunk::{DecodedChunk, EncodedChunk};
use crate::error::{Error, Result};
use crate::utf8;

/// Decodes an encoded chunk stream into text chunks, healing multi-byte
/// characters split across contiguous chunks.
///
/// Bytes that end a chunk mid-character are carried over and prepended to
/// the next chunk, provided that chunk starts exactly where the carry left
/// off. When the next chunk is missing or misaligned the carry is dropped,
/// the stage resynchronizes on the new chunk's stated offset, and any orphan
/// continuation bytes at the front of that chunk are discarded with it. A
/// carry left at end-of-stream has no successor and is likewise dropped.
///
/// Invalid bytes that are *not* a trailing truncation are a fatal stream
/// error.
#[derive(Debug)]
pub struct SplitCharHealer<I> {
    inner: I,
    carry: Vec<u8>,
    next_start: u64,
    fused: bool,
}

impl<I> SplitCharHealer<I>
where
    I: Iterator<Item = Result<EncodedChunk>>,
{
    /// Wraps an encoded chunk stream.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            carry: Vec::new(),
            next_start: 0,
            fused: false,
        }
    }

    /// Decodes one input chunk, returning the healed text chunk if the input
    /// yielded any complete characters.
    fn heal(&mut self, chunk: &EncodedChunk) -> Result<Option<DecodedChunk>> {
        let mut work = if chunk.start() == self.next_start + self.carry.len() as u64 {
            let mut work = mem::take(&mut self.carry);
            work.extend_from_slice(chunk.data());
            work
        } else {
            if !self.carry.is_empty() {
                tracing::debug!(
                    expected = self.next_start + self.carry.len() as u64,
                    found = chunk.start(),
                    "noncontiguous chunk; dropping carried bytes"
                );
            }
            self.carry.clear();
            self.next_start = chunk.start();
            utf8::lstrip_continuation(chunk.data()).to_vec()
        };

        let split = utf8::truncation_point(&work);

        if split < work.len() {
            self.carry = work.split_off(split);
        }

        if work.is_empty() {
            return Ok(None);
        }

        let text = match simdutf8::compat::from_utf8(&work) {
            Ok(text) => text.to_string(),
            Err(err) => {
                return Err(Error::Utf8 {
                    byte: self.next_start + err.valid_up_to() as u64,
                });
            }
        };

        let decoded = DecodedChunk::new(text, self.next_start, chunk.encoding());
        self.next_start = decoded.end();

        Ok(Some(decoded))
    }
}

impl<I> Iterator for SplitCharHealer<I>
where
    I: Iterator<Item = Result<EncodedChunk>>,
{
    type Item = Result<DecodedChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        loop {
            let chunk = match self.inner.next() {
                Some(Ok(chunk)) => chunk,
                Some(Err(err)) => {
                    self.fused = true;
                    return Some(Err(err));
                }
                None => {
                    // An incomplete character with no successor.
                    self.carry.clear();
                    return None;
                }
            };

            match self.heal(&chunk) {
                Ok(Some(decoded)) => return Some(Ok(decoded)),
                Ok(None) => {}
                Err(err) => {
                    self.fused = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
