//! Any-of-set character search over text.
//!
//! The healer and resizer stages cut text at delimiter characters. Both scan
//! for the first or last occurrence of any member of a small set, so the set
//! is prebuilt into an ASCII bitmap with spillover for the occasional
//! non-ASCII member (the default word delimiters include an em dash).

use core::fmt::{self, Display, Formatter};
use core::ops::Range;

use serde::{Deserialize, Serialize};

/// A set of delimiter characters, optimized for membership tests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CharSet {
    source: String,
    ascii: u128,
    other: Vec<char>,
}

impl CharSet {
    /// Builds a set from the characters of `chars`.
    #[must_use]
    pub fn new(chars: &str) -> Self {
        let mut ascii = 0u128;
        let mut other = Vec::new();

        for ch in chars.chars() {
            if ch.is_ascii() {
                ascii |= 1 << (ch as u32);
            } else if !other.contains(&ch) {
                other.push(ch);
            }
        }

        Self {
            source: chars.to_string(),
            ascii,
            other,
        }
    }

    /// Whether `ch` is a member of the set.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii & (1 << (ch as u32)) != 0
        } else {
            self.other.contains(&ch)
        }
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ascii == 0 && self.other.is_empty()
    }

    /// The characters the set was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<&str> for CharSet {
    fn from(chars: &str) -> Self {
        Self::new(chars)
    }
}

impl From<String> for CharSet {
    fn from(chars: String) -> Self {
        Self::new(&chars)
    }
}

impl From<CharSet> for String {
    fn from(set: CharSet) -> Self {
        set.source
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.source)
    }
}

/// Byte index and character of the first occurrence of any set member.
#[must_use]
pub fn find_any(text: &str, set: &CharSet) -> Option<(usize, char)> {
    if set.is_empty() {
        return None;
    }
    text.char_indices().find(|&(_, ch)| set.contains(ch))
}

/// Byte index and character of the last occurrence of any set member.
#[must_use]
pub fn rfind_any(text: &str, set: &CharSet) -> Option<(usize, char)> {
    if set.is_empty() {
        return None;
    }
    text.char_indices().rev().find(|&(_, ch)| set.contains(ch))
}

/// [`find_any`] restricted to `range`, returning absolute byte indices.
///
/// The range bounds must fall on character boundaries.
#[must_use]
pub fn find_any_within(text: &str, set: &CharSet, range: Range<usize>) -> Option<(usize, char)> {
    find_any(&text[range.clone()], set).map(|(index, ch)| (range.start + index, ch))
}

/// [`rfind_any`] restricted to `range`, returning absolute byte indices.
///
/// The range bounds must fall on character boundaries.
#[must_use]
pub fn rfind_any_within(text: &str, set: &CharSet, range: Range<usize>) -> Option<(usize, char)> {
    rfind_any(&text[range.clone()], set).map(|(index, ch)| (range.start + index, ch))
}
