//! Locating the call expression under a document position.
//!
//! Pure tree search, no UI side effects, so it can be tested against
//! literal source strings and coordinates.

use tree_sitter::{Node, Tree, TreeCursor};

use crate::surface::Position;

/// Parser-convention coordinates: 1-indexed line, 0-indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// A call expression with its textual span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    pub start: LineCol,
    pub end: LineCol,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl CallNode {
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    fn from_node(node: Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start: LineCol {
                line: start.row + 1,
                col: start.column,
            },
            end: LineCol {
                line: end.row + 1,
                col: end.column,
            },
            start_offset: node.start_byte(),
            end_offset: node.end_byte(),
        }
    }

    /// Lines are inclusive; columns bound the position only on the boundary
    /// lines, and inclusively there.
    fn contains(&self, pos: Position) -> bool {
        let line = pos.line + 1;
        if line < self.start.line || line > self.end.line {
            return false;
        }
        if line == self.start.line && pos.col < self.start.col {
            return false;
        }
        if line == self.end.line && pos.col > self.end.col {
            return false;
        }
        true
    }
}

/// The smallest call expression enclosing `pos`, by textual length.
///
/// Strictly-smaller wins, so ties keep the first node visited. Smallest
/// length approximates innermost nesting; the heuristic is kept as-is.
pub fn smallest_call_at(tree: &Tree, pos: Position) -> Option<CallNode> {
    let mut smallest: Option<CallNode> = None;
    let mut cursor = tree.walk();
    visit(&mut cursor, &mut |node| {
        if node.kind() != "call_expression" {
            return;
        }
        let call = CallNode::from_node(node);
        if !call.contains(pos) {
            return;
        }
        if smallest.as_ref().is_none_or(|best| call.len() < best.len()) {
            smallest = Some(call);
        }
    });
    smallest
}

fn visit(cursor: &mut TreeCursor, f: &mut impl FnMut(Node)) {
    loop {
        f(cursor.node());
        if cursor.goto_first_child() {
            visit(cursor, f);
            cursor.goto_parent();
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
}
