mod align;
mod compare;
mod error;
mod language;
mod mark;
mod render;
mod scan;
mod syntax;
mod token;
mod tokenize;
mod types;

pub use align::{align, similarity_ratio};

pub use compare::{Comparison, compare_project_files, compare_sources, compare_token_streams};

pub use error::{Error, Result};

pub use language::{LanguageRegistry, SupportedLanguage};

pub use mark::{MarkedSource, mark_matches};

pub use render::render_marked;

pub use scan::{DirectoryProject, ProjectSource, scan_project};

pub use syntax::SyntaxCursor;

pub use token::Token;

pub use tokenize::{tokenize, tokenize_source};

pub use types::{
    Alignment, CompareOptions, DEFAULT_MAX_FILE_SIZE_BYTES, FileMatch, FileReport,
    MIN_THRESHOLD, Marker, MatchingBlock, ProjectScan, RenderOptions, RenderedComparison,
    ScanOptions, ScanStats, TokenizeOptions, default_ignore_dirs,
};
