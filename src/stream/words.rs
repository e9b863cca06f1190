//! Split-word healing stage: moves partial words forward to the next chunk.

use core::mem;

use crate::chunk::DecodedChunk;
use crate::error::Result;
use crate::sequence::{self, CharSet};

/// Default word delimiters: common punctuation plus ASCII whitespace
/// controls.
pub const WORD_DELIMITERS_DEFAULT: &str = " .,;:!?-\u{2014}\t\n\r\u{c}\u{b}";

/// Repairs words split across chunk boundaries by moving the partial word at
/// the end of a chunk onto the front of the next contiguous chunk.
///
/// When the next chunk is missing or misaligned the carried partial word is
/// dropped. On such a resynchronization in the middle of a document the
/// partial word at the *front* of the new chunk is also dropped, up to the
/// first delimiter: its beginning lived in a chunk that never arrived. A
/// stream starting at offset zero has no left neighbor, so its first word is
/// genuine content and kept.
///
/// Chunks that come out empty or all-whitespace are suppressed, though their
/// span still advances the offset cursor.
#[derive(Debug)]
pub struct SplitWordHealer<I> {
    inner: I,
    delimiters: CharSet,
    prefix: String,
    next_start: u64,
    fused: bool,
}

impl<I> SplitWordHealer<I>
where
    I: Iterator<Item = Result<DecodedChunk>>,
{
    /// Wraps a decoded chunk stream with the default word delimiters.
    pub fn new(inner: I) -> Self {
        Self::with_delimiters(inner, CharSet::new(WORD_DELIMITERS_DEFAULT))
    }

    /// Wraps a decoded chunk stream with a custom delimiter set.
    pub fn with_delimiters(inner: I, delimiters: CharSet) -> Self {
        Self {
            inner,
            delimiters,
            prefix: String::new(),
            next_start: 0,
            fused: false,
        }
    }

    /// Heals one input chunk, returning the chunk to emit if any.
    fn heal(&mut self, chunk: DecodedChunk) -> Option<DecodedChunk> {
        let contiguous = chunk.start() == self.next_start + self.prefix.len() as u64;

        if !contiguous {
            if !self.prefix.is_empty() {
                tracing::debug!(
                    expected = self.next_start + self.prefix.len() as u64,
                    found = chunk.start(),
                    "noncontiguous chunk; dropping carried partial word"
                );
            }
            self.prefix.clear();
            self.next_start = chunk.start();
        }

        // Resynchronizing mid-document means the chunk's first partial word
        // lost its beginning along with the missing neighbor.
        let missing_prefix = !contiguous && self.next_start > 0;

        let encoding = chunk.encoding();
        let chunk_end = chunk.end();
        let mut text = mem::take(&mut self.prefix);
        text.push_str(chunk.text());

        let first = if missing_prefix {
            sequence::find_any(&text, &self.delimiters)
        } else {
            None
        };

        if let Some((index, ch)) = sequence::rfind_any(&text, &self.delimiters) {
            self.prefix = text.split_off(index + ch.len_utf8());
        }

        let end = chunk_end - self.prefix.len() as u64;

        if let Some((index, _)) = first {
            if index > 0 {
                self.next_start += index as u64;
                text.drain(..index);
            }
        }

        let emit = if text.is_empty() || text.chars().all(char::is_whitespace) {
            None
        } else {
            Some(DecodedChunk::new(text, self.next_start, encoding))
        };

        self.next_start = end;
        emit
    }
}

impl<I> Iterator for SplitWordHealer<I>
where
    I: Iterator<Item = Result<DecodedChunk>>,
{
    type Item = Result<DecodedChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        loop {
            match self.inner.next() {
                Some(Ok(chunk)) => {
                    if let Some(healed) = self.heal(chunk) {
                        return Some(Ok(healed));
                    }
                }
                Some(Err(err)) => {
                    self.fused = true;
                    return Some(Err(err));
                }
                // A residual partial word has no right neighbor to join.
                None => return None,
            }
        }
    }
}
