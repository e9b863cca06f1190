//! Token-count resizing stage: re-chunks a stream into token windows.

use core::fmt::{self, Debug, Formatter};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::chunk::DecodedChunk;
use crate::error::Result;
use crate::sequence::{self, CharSet};
use crate::tokenizer::{Token, Tokenizer};

/// Default minimum tokens per resized chunk.
pub const MIN_TOKENS_DEFAULT: usize = 50;

/// Default maximum tokens per resized chunk.
pub const MAX_TOKENS_DEFAULT: usize = 200;

/// Default preferred cut points: sentence punctuation and newline.
pub const PREFERRED_DELIMITERS_DEFAULT: &str = ".!?\n";

/// Resizes a decoded chunk stream so every emitted chunk holds between a
/// minimum and maximum number of tokens, preferring to cut at sentence
/// delimiters.
///
/// Short chunks accumulate until the minimum is reached; long runs are cut
/// at the latest preferred delimiter within the first `max_tokens` worth of
/// text, provided the cut leaves at least `min_tokens` behind. Tokens
/// remaining below the minimum are carried to the next contiguous chunk, or
/// dropped when the next chunk is misaligned or the stream ends.
pub struct TokenResizer<I> {
    inner: I,
    tokenizer: Arc<dyn Tokenizer>,
    min_tokens: usize,
    max_tokens: usize,
    preferred: CharSet,
    leftover: VecDeque<Token>,
    next_start: u64,
    ready: VecDeque<DecodedChunk>,
    fused: bool,
}

impl<I> TokenResizer<I>
where
    I: Iterator<Item = Result<DecodedChunk>>,
{
    /// Wraps a decoded chunk stream with default bounds and delimiters.
    pub fn new(inner: I, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_bounds(
            inner,
            tokenizer,
            MIN_TOKENS_DEFAULT,
            MAX_TOKENS_DEFAULT,
            CharSet::new(PREFERRED_DELIMITERS_DEFAULT),
        )
    }

    /// Wraps a decoded chunk stream with explicit bounds and delimiters.
    pub fn with_bounds(
        inner: I,
        tokenizer: Arc<dyn Tokenizer>,
        min_tokens: usize,
        max_tokens: usize,
        preferred: CharSet,
    ) -> Self {
        Self {
            inner,
            tokenizer,
            min_tokens,
            max_tokens,
            preferred,
            leftover: VecDeque::new(),
            next_start: 0,
            ready: VecDeque::new(),
            fused: false,
        }
    }

    /// Folds one input chunk into the leftover tokens and drains every full
    /// window into the ready queue.
    fn resize(&mut self, chunk: &DecodedChunk) -> Result<()> {
        // The carry's byte length is only observable by decoding it back to
        // text; leftover token ids do not map to byte counts directly.
        let carried_bytes = if self.leftover.is_empty() {
            0
        } else {
            let carried: Vec<Token> = self.leftover.iter().copied().collect();
            self.tokenizer.decode(&carried)?.len() as u64
        };

        if chunk.start() != self.next_start + carried_bytes {
            if !self.leftover.is_empty() {
                tracing::debug!(
                    expected = self.next_start + carried_bytes,
                    found = chunk.start(),
                    "noncontiguous chunk; dropping leftover tokens"
                );
            }
            self.leftover.clear();
            self.next_start = chunk.start();
        }

        self.leftover.extend(self.tokenizer.encode(chunk.text()));

        while self.leftover.len() >= self.min_tokens {
            let take = self.max_tokens.min(self.leftover.len());
            let head: Vec<Token> = self.leftover.drain(..take).collect();
            let mut text = self.tokenizer.decode(&head)?;

            if let Some((index, ch)) = sequence::rfind_any(&text, &self.preferred) {
                let cut = index + ch.len_utf8();

                if self.tokenizer.count(&text[..cut]) >= self.min_tokens {
                    let rest = text.split_off(cut);
                    // Re-encode the remainder rather than slicing `head`:
                    // the BPE encoding of `rest` on its own is not a suffix
                    // of the encoding of the full window.
                    for token in self.tokenizer.encode(&rest).into_iter().rev() {
                        self.leftover.push_front(token);
                    }
                }
            }

            let resized = DecodedChunk::new(text, self.next_start, chunk.encoding());
            self.next_start = resized.end();
            self.ready.push_back(resized);
        }

        Ok(())
    }
}

impl<I> Debug for TokenResizer<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResizer")
            .field("min_tokens", &self.min_tokens)
            .field("max_tokens", &self.max_tokens)
            .field("preferred", &self.preferred)
            .field("next_start", &self.next_start)
            .finish_non_exhaustive()
    }
}

impl<I> Iterator for TokenResizer<I>
where
    I: Iterator<Item = Result<DecodedChunk>>,
{
    type Item = Result<DecodedChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }

            if self.fused {
                return None;
            }

            match self.inner.next() {
                Some(Ok(chunk)) => {
                    if let Err(err) = self.resize(&chunk) {
                        self.fused = true;
                        return Some(Err(err));
                    }
                }
                Some(Err(err)) => {
                    self.fused = true;
                    return Some(Err(err));
                }
                None => {
                    // Leftovers below the minimum have nowhere to go.
                    self.leftover.clear();
                    self.fused = true;
                    return None;
                }
            }
        }
    }
}
