#[cfg(test)]
mod tests;

use tracing::debug;

use crate::align::align;
use crate::error::{Error, Result};
use crate::language::LanguageRegistry;
use crate::mark::{MarkedSource, mark_matches};
use crate::render::render_marked;
use crate::scan::ProjectSource;
use crate::token::Token;
use crate::tokenize::tokenize;
use crate::types::{CompareOptions, MatchingBlock, Marker, RenderOptions, RenderedComparison};

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub ratio: f64,
    pub blocks: Vec<MatchingBlock>,
    pub first: MarkedSource,
    pub second: MarkedSource,
}

impl Comparison {
    pub fn render(
        &self,
        first_source: &str,
        second_source: &str,
        marker: Marker,
        options: &RenderOptions,
    ) -> RenderedComparison {
        RenderedComparison {
            ratio: self.ratio,
            first_file: render_marked(first_source, &self.first, marker, options),
            second_file: render_marked(second_source, &self.second, marker, options),
        }
    }
}

/// Aligns two token streams and marks the matched regions of both sources.
pub fn compare_token_streams(
    tokens_a: &[Token],
    tokens_b: &[Token],
    source_a: &str,
    source_b: &str,
    marker: Marker,
) -> Comparison {
    let alignment = align(tokens_a, tokens_b);
    let (first, second) = mark_matches(
        tokens_a,
        tokens_b,
        source_a,
        source_b,
        &alignment.blocks,
        marker,
    );
    Comparison {
        ratio: alignment.ratio,
        blocks: alignment.blocks,
        first,
        second,
    }
}

/// Parses both sources as `ext` and compares them; `Ok(None)` when `ext` is unsupported.
pub fn compare_sources(
    registry: &LanguageRegistry,
    first: &str,
    second: &str,
    ext: &str,
    options: &CompareOptions,
) -> Result<Option<Comparison>> {
    let (Some(first_tree), Some(second_tree)) =
        (registry.parse(first, ext)?, registry.parse(second, ext)?)
    else {
        return Ok(None);
    };
    let first_tokens = tokenize(&mut first_tree.walk(), options.tokenize);
    let second_tokens = tokenize(&mut second_tree.walk(), options.tokenize);
    let comparison =
        compare_token_streams(&first_tokens, &second_tokens, first, second, options.marker);
    debug!(
        first_tokens = first_tokens.len(),
        second_tokens = second_tokens.len(),
        blocks = comparison.blocks.len(),
        ratio = comparison.ratio,
        "compared sources"
    );
    Ok(Some(comparison))
}

/// Compares one file of `first_project` with one file of `second_project` and renders both
/// with the matched regions delimited.
pub fn compare_project_files(
    registry: &LanguageRegistry,
    first_project: &dyn ProjectSource,
    first_file: &str,
    second_project: &dyn ProjectSource,
    second_file: &str,
    options: &CompareOptions,
) -> Result<RenderedComparison> {
    if first_project.id() == second_project.id() {
        return Err(Error::SameProject(first_project.id().to_string()));
    }

    let first_language =
        registry
            .resolve_path(first_file)
            .ok_or_else(|| Error::UnsupportedFile {
                path: first_file.to_string(),
            })?;
    let second_language =
        registry
            .resolve_path(second_file)
            .ok_or_else(|| Error::UnsupportedFile {
                path: second_file.to_string(),
            })?;
    if first_language != second_language {
        return Err(Error::LanguageMismatch {
            first: first_file.to_string(),
            second: second_file.to_string(),
        });
    }

    let first_source = first_project.read_text(first_file)?;
    let second_source = second_project.read_text(second_file)?;

    let first_tree = registry.parse_as(&first_source, first_language)?;
    let second_tree = registry.parse_as(&second_source, second_language)?;
    let first_tokens = tokenize(&mut first_tree.walk(), options.tokenize);
    let second_tokens = tokenize(&mut second_tree.walk(), options.tokenize);

    let comparison = compare_token_streams(
        &first_tokens,
        &second_tokens,
        &first_source,
        &second_source,
        options.marker,
    );
    debug!(
        first = %format_args!("{}:{first_file}", first_project.id()),
        second = %format_args!("{}:{second_file}", second_project.id()),
        ratio = comparison.ratio,
        "compared project files"
    );
    Ok(comparison.render(
        &first_source,
        &second_source,
        options.marker,
        &options.render,
    ))
}
