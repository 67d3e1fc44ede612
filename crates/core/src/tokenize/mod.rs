
use crate::error::Result;
use crate::language::LanguageRegistry;
use crate::syntax::SyntaxCursor;
use crate::token::Token;
use crate::types::TokenizeOptions;

/// Walks the tree under `cursor` in document order and collects the nodes selected by
/// `options`.
///
/// Every node reached from the start position or by stepping to a next sibling opens a
/// chain that follows first children down to a leaf. With `child_only` only the deepest
/// accepted node of each chain is kept; otherwise every accepted node is. The cursor ends
/// up back at the node it started on (or the topmost node it could climb to).
pub fn tokenize<C>(cursor: &mut C, options: TokenizeOptions) -> Vec<Token>
where
    C: SyntaxCursor + ?Sized,
{
    let mut tokens = Vec::new();
    let mut depth = 0usize;

    loop {
        let mut deepest = None;
        loop {
            if options.accepts(cursor.is_named()) {
                let token = Token::new(cursor.node_kind(), cursor.byte_range());
                if options.child_only {
                    deepest = Some(token);
                } else {
                    tokens.push(token);
                }
            }
            if !cursor.goto_first_child() {
                break;
            }
            depth += 1;
        }
        tokens.extend(deepest);

        loop {
            // Siblings of the starting node are outside the subtree we were asked for.
            if depth > 0 && cursor.goto_next_sibling() {
                break;
            }
            if depth == 0 || !cursor.goto_parent() {
                return tokens;
            }
            depth -= 1;
        }
    }
}

/// Parses and tokenizes `source`; `Ok(None)` when `ext` is not a supported language.
pub fn tokenize_source(
    registry: &LanguageRegistry,
    source: &str,
    ext: &str,
    options: TokenizeOptions,
) -> Result<Option<Vec<Token>>> {
    let Some(tree) = registry.parse(source, ext)? else {
        return Ok(None);
    };
    let mut cursor = tree.walk();
    Ok(Some(tokenize(&mut cursor, options)))
}
