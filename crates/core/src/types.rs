use std::collections::HashSet;

use crate::error::{Error, Result};

/// Lowest plagiarism ratio a scan may be asked to report; anything below is noise.
pub const MIN_THRESHOLD: f64 = 0.3;

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// A run of `len` pairwise equal tokens starting at `a` in the first sequence and at `b` in
/// the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub ratio: f64,
    pub blocks: Vec<MatchingBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Record only the deepest accepted node of each first-child chain.
    pub child_only: bool,
    /// `None` keeps every node, `Some(true)` only named nodes, `Some(false)` only anonymous ones.
    pub is_named: Option<bool>,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            child_only: false,
            is_named: Some(true),
        }
    }
}

impl TokenizeOptions {
    pub(crate) fn accepts(&self, is_named: bool) -> bool {
        self.is_named.is_none_or(|want| want == is_named)
    }
}

/// The character matched bytes are overwritten with. Always ASCII so marking never changes
/// the byte length of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker(u8);

impl Marker {
    pub fn new(ch: char) -> Result<Self> {
        if ch.is_ascii() {
            Ok(Self(ch as u8))
        } else {
            Err(Error::InvalidMarker(ch))
        }
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self(b'@')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub start_tokens: String,
    pub end_tokens: String,
    /// Escape the source text for HTML; delimiters are always written raw.
    pub html_encoded: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            start_tokens: "{".to_string(),
            end_tokens: "}".to_string(),
            html_encoded: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub tokenize: TokenizeOptions,
    pub marker: Marker,
    pub render: RenderOptions,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub threshold: f64,
    pub tokenize: TokenizeOptions,
    pub ignore_dirs: HashSet<String>,
    pub max_file_size: Option<u64>,
    pub respect_gitignore: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold: MIN_THRESHOLD,
            tokenize: TokenizeOptions::default(),
            ignore_dirs: default_ignore_dirs(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE_BYTES),
            respect_gitignore: true,
        }
    }
}

impl ScanOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(MIN_THRESHOLD..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

pub fn default_ignore_dirs() -> HashSet<String> {
    [
        ".git",
        ".hg",
        ".svn",
        "node_modules",
        "__pycache__",
        ".venv",
        "venv",
        "target",
        "dist",
        "build",
        ".cache",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub candidate_files: u64,
    pub compared_pairs: u64,
    pub skipped_unsupported: u64,
    pub skipped_empty: u64,
    pub failed_files: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileMatch {
    pub project: String,
    pub project_title: String,
    pub file: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file: String,
    /// Mean ratio of `matches`; 0 when nothing met the threshold.
    pub ratio: f64,
    pub matches: Vec<FileMatch>,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectScan {
    pub files: Vec<FileReport>,
    /// Ids of projects that could not be (fully) compared.
    pub failures: Vec<String>,
    pub stats: ScanStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedComparison {
    pub ratio: f64,
    pub first_file: String,
    pub second_file: String,
}
