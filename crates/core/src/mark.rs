use std::borrow::Cow;

use crate::token::Token;
use crate::types::{MatchingBlock, Marker};

/// A copy of a source where every matched byte was overwritten with the marker.
///
/// Marking happens in place, so `len()` always equals the length of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSource {
    bytes: Vec<u8>,
}

impl MarkedSource {
    pub fn unmarked(source: &str) -> Self {
        Self {
            bytes: source.as_bytes().to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Overwrites the bytes of every token in `tokens`. Spans running past the end are cut.
    pub fn mark_tokens<'a>(&mut self, tokens: impl IntoIterator<Item = &'a Token>, marker: Marker) {
        let len = self.bytes.len();
        for token in tokens {
            let start = token.start_byte().min(len);
            let end = token.end_byte().min(len);
            if start < end {
                self.bytes[start..end].fill(marker.as_byte());
            }
        }
    }
}

/// Marks, on both sides, the source bytes of every token inside a matching block.
pub fn mark_matches(
    tokens_a: &[Token],
    tokens_b: &[Token],
    source_a: &str,
    source_b: &str,
    blocks: &[MatchingBlock],
    marker: Marker,
) -> (MarkedSource, MarkedSource) {
    let mut marked_a = MarkedSource::unmarked(source_a);
    let mut marked_b = MarkedSource::unmarked(source_b);
    for block in blocks {
        marked_a.mark_tokens(block_tokens(tokens_a, block.a, block.len), marker);
        marked_b.mark_tokens(block_tokens(tokens_b, block.b, block.len), marker);
    }
    (marked_a, marked_b)
}

fn block_tokens(tokens: &[Token], start: usize, len: usize) -> &[Token] {
    let start = start.min(tokens.len());
    let end = start.saturating_add(len).min(tokens.len());
    &tokens[start..end]
}
