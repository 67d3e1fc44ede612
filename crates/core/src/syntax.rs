use std::ops::Range;

use tree_sitter::TreeCursor;

/// The handful of cursor moves and node queries the tokenizer needs from a syntax tree.
///
/// The cursor always sits on one node; `goto_*` return `false` and stay put when the move
/// is impossible.
pub trait SyntaxCursor {
    fn goto_first_child(&mut self) -> bool;
    fn goto_next_sibling(&mut self) -> bool;
    fn goto_parent(&mut self) -> bool;
    fn node_kind(&self) -> &str;
    fn byte_range(&self) -> Range<usize>;
    fn is_named(&self) -> bool;
}

impl SyntaxCursor for TreeCursor<'_> {
    fn goto_first_child(&mut self) -> bool {
        TreeCursor::goto_first_child(self)
    }

    fn goto_next_sibling(&mut self) -> bool {
        TreeCursor::goto_next_sibling(self)
    }

    fn goto_parent(&mut self) -> bool {
        TreeCursor::goto_parent(self)
    }

    fn node_kind(&self) -> &str {
        self.node().kind()
    }

    fn byte_range(&self) -> Range<usize> {
        self.node().byte_range()
    }

    fn is_named(&self) -> bool {
        self.node().is_named()
    }
}
