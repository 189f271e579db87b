use crate::error::Error;
use log::trace;
use tree_sitter::{Node, Parser, Tree};

/// Thin wrapper around a tree-sitter parser configured for Python.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self, Error> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse `source` into a syntax tree. Malformed input is fatal: a tree
    /// containing error or missing nodes is rejected rather than walked.
    pub fn parse(&mut self, source: &str) -> Result<Tree, Error> {
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or(Error::Parse { line: 1 })?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(Error::Parse { line });
        }

        trace!("parsed {} bytes of python source", source.len());
        Ok(tree)
    }
}

fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if let Some(line) = first_error_line(child) {
                return Some(line);
            }
        }
    }
    None
}
