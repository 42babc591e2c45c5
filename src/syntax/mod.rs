//! Parsing cartridge scripts with Tree-sitter
//!
//! The scripting language is fixed, so its grammar is linked statically.

mod calls;

pub use calls::{CallNode, LineCol, smallest_call_at};

use tree_sitter::{Parser, Tree};

/// Parser oracle for the cartridge scripting language.
pub struct ScriptParser {
    parser: Parser,
}

impl ScriptParser {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let language = tree_sitter::Language::new(tree_sitter_javascript::LANGUAGE);
        parser
            .set_language(&language)
            .map_err(|e| format!("Failed to load scripting grammar: {}", e))?;
        Ok(Self { parser })
    }

    /// Parse a full source text. Source containing syntax errors yields
    /// `None`; code is transiently invalid while the user types, and
    /// callers treat that as "nothing to inspect".
    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        let tree = self.parser.parse(source, None)?;
        if tree.root_node().has_error() {
            return None;
        }
        Some(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_source_parses() {
        let mut parser = ScriptParser::new().unwrap();
        assert!(parser.parse("draw = () => { circle(64, 48, 12) }").is_some());
    }

    #[test]
    fn broken_source_is_swallowed() {
        let mut parser = ScriptParser::new().unwrap();
        assert!(parser.parse("draw = (() => {").is_none());
    }
}
