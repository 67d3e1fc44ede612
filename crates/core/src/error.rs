use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("project root {0} is not a directory")]
    NotADirectory(String),
    #[error("{path}: no such file in project")]
    FileNotFound { path: String },
    #[error("{path}: file is larger than {limit} bytes")]
    FileTooLarge { path: String, limit: u64 },
    #[error("{path}: binary file")]
    BinaryFile { path: String },
    #[error("{path}: content is not valid UTF-8")]
    InvalidUtf8 { path: String },
    #[error("{path}: file type is not supported")]
    UnsupportedFile { path: String },
    #[error("cannot compare {first} with {second}: files are written in different languages")]
    LanguageMismatch { first: String, second: String },
    #[error("cannot compare files within the same project ({0})")]
    SameProject(String),
    #[error("threshold must be within 0.3..=1, got {0}")]
    InvalidThreshold(f64),
    #[error("marker must be a single ASCII character, got {0:?}")]
    InvalidMarker(char),
    #[error("failed to load the {language} grammar: {source}")]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },
    #[error("parser gave up on {language} source")]
    ParseAborted { language: &'static str },
}

impl Error {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
