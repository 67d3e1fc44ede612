use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// One syntax-tree node of interest: its grammar kind and the byte span it covers in the
/// source it was taken from.
///
/// Equality and hashing only look at `kind`. Two `identifier` nodes at different places (or
/// with different names) are the same token, which is what lets the aligner find renamed
/// copies. A token also compares equal to a bare `&str` holding its kind.
#[derive(Debug, Clone)]
pub struct Token {
    kind: String,
    start_byte: usize,
    end_byte: usize,
}

impl Token {
    pub fn new(kind: impl Into<String>, span: Range<usize>) -> Self {
        debug_assert!(span.start <= span.end, "token span must not be reversed");
        Self {
            kind: kind.into(),
            start_byte: span.start,
            end_byte: span.end,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn span(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    pub fn start_byte(&self) -> usize {
        self.start_byte
    }

    pub fn end_byte(&self) -> usize {
        self.end_byte
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

// Hash/Eq agree with `str`, so maps keyed by tokens can be queried by kind.
impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.kind
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.kind == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.kind == *other
    }
}

impl PartialEq<Token> for str {
    fn eq(&self, other: &Token) -> bool {
        self == other.kind
    }
}

impl PartialEq<Token> for &str {
    fn eq(&self, other: &Token) -> bool {
        *self == other.kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)
    }
}
