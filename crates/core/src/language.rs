use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tree_sitter::{Language, Parser, Tree};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    Python,
    JavaScript,
}

impl SupportedLanguage {
    pub const ALL: [Self; 2] = [Self::Python, Self::JavaScript];

    pub fn name(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
        }
    }

    fn default_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Python => &["py"],
            Self::JavaScript => &["js"],
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Python => 0,
            Self::JavaScript => 1,
        }
    }

    fn load_grammar(self) -> Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// Maps file extensions to languages and hands out grammars, each built on first use.
///
/// Construct one at startup and share it by reference; lookups never fail, unknown
/// extensions simply resolve to `None`.
#[derive(Debug)]
pub struct LanguageRegistry {
    extensions: HashMap<String, SupportedLanguage>,
    grammars: [OnceLock<Language>; SupportedLanguage::ALL.len()],
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut extensions = HashMap::new();
        for language in SupportedLanguage::ALL {
            for ext in language.default_extensions() {
                extensions.insert((*ext).to_string(), language);
            }
        }
        Self {
            extensions,
            grammars: [OnceLock::new(), OnceLock::new()],
        }
    }

    pub fn with_extension(mut self, ext: &str, language: SupportedLanguage) -> Self {
        self.extensions
            .insert(normalize_extension(ext).to_string(), language);
        self
    }

    /// Accepts `".py"` as well as `"py"`.
    pub fn resolve_extension(&self, ext: &str) -> Option<SupportedLanguage> {
        self.extensions.get(normalize_extension(ext)).copied()
    }

    pub fn resolve_path(&self, path: &str) -> Option<SupportedLanguage> {
        let ext = Path::new(path).extension()?.to_str()?;
        self.resolve_extension(ext)
    }

    pub fn grammar(&self, language: SupportedLanguage) -> &Language {
        self.grammars[language.slot()].get_or_init(|| language.load_grammar())
    }

    /// Parses `source` with the grammar registered for `ext`.
    ///
    /// Returns `Ok(None)` when the extension is not supported. Syntax errors do not fail the
    /// parse; they show up as `ERROR`/`MISSING` nodes in the tree.
    pub fn parse(&self, source: &str, ext: &str) -> Result<Option<Tree>> {
        let Some(language) = self.resolve_extension(ext) else {
            return Ok(None);
        };
        self.parse_as(source, language).map(Some)
    }

    pub fn parse_as(&self, source: &str, language: SupportedLanguage) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(self.grammar(language))
            .map_err(|source| Error::Grammar {
                language: language.name(),
                source,
            })?;
        parser
            .parse(source.as_bytes(), None)
            .ok_or(Error::ParseAborted {
                language: language.name(),
            })
    }
}

fn normalize_extension(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}
