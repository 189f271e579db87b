//! Tree walk over parsed Python source, producing one `DocRecord` per
//! module/class/function declaration and per import statement.

use crate::docstring;
use crate::error::Error;
use crate::parser::PythonParser;
use crate::record::{Category, DocRecord};
use log::{debug, warn};
use std::io::{self, Write};
use tree_sitter::Node;

/// Body text used when a declaration carries no docstring.
pub const UNDOCUMENTED: &str = "**UNDOCUMENTED**";

/// Optional side-channel destination for raw import names. Writes are
/// best-effort; a failed write never aborts extraction.
pub trait ImportSink {
    fn append_line(&mut self, line: &str) -> io::Result<()>;
}

impl<W: Write> ImportSink for W {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        self.write_all(line.as_bytes())
    }
}

/// Parse `source` and collect documentation records in discovery order.
/// Malformed source is fatal: no records, no sink output for later nodes.
pub fn extract(
    source: &str,
    sink: Option<&mut dyn ImportSink>,
) -> Result<Vec<DocRecord>, Error> {
    let mut parser = PythonParser::new()?;
    let tree = parser.parse(source)?;

    let mut walker = Walker {
        source,
        lines: source.lines().collect(),
        sink,
        records: Vec::new(),
    };
    walker.walk(tree.root_node());
    debug!("extracted {} records", walker.records.len());
    Ok(walker.records)
}

fn classify(node: Node) -> Option<Category> {
    match node.kind() {
        "module" => Some(Category::Module),
        "class_definition" => Some(Category::Class),
        "function_definition" => {
            let is_async = node.child(0).is_some_and(|c| c.kind() == "async");
            Some(if is_async {
                Category::AsyncFunction
            } else {
                Category::Function
            })
        }
        "import_statement" => Some(Category::Import),
        "import_from_statement" | "future_import_statement" => Some(Category::ImportFrom),
        _ => None,
    }
}

struct Walker<'src, 'snk> {
    source: &'src str,
    lines: Vec<&'src str>,
    sink: Option<&'snk mut dyn ImportSink>,
    records: Vec<DocRecord>,
}

impl Walker<'_, '_> {
    fn walk(&mut self, node: Node) {
        match classify(node) {
            Some(category) if category.is_import() => self.import(node, category),
            Some(category) => self.declaration(node, category),
            None => {}
        }
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                self.walk(child);
            }
        }
    }

    fn declaration(&mut self, node: Node, category: Category) {
        let name = node.child_by_field_name("name").map(|n| self.text(n));
        let decl_line = node.start_position().row + 1;

        // The module node is its own statement container; definitions keep
        // theirs in the `body` field.
        let container = match category {
            Category::Module => Some(node),
            _ => node.child_by_field_name("body"),
        };
        let first_stmt = container.and_then(first_statement);
        // An empty or whitespace-only docstring counts as missing.
        let doc = first_stmt
            .and_then(|stmt| self.docstring_of(stmt))
            .filter(|doc| !doc.is_empty())
            .unwrap_or_else(|| UNDOCUMENTED.to_string());

        let (line, body) = match category {
            Category::Module => (0, doc),
            Category::Class => (decl_line, doc),
            _ => {
                // Anchor at the first body statement so multi-line parameter
                // lists sort under the line their docstring starts on.
                let anchor = first_stmt
                    .map(|stmt| stmt.start_position().row + 1)
                    .unwrap_or(decl_line);
                let header = docstring::dedent(&self.declaration_header(decl_line, anchor));
                (anchor, format!("```python\n{header}\n```\n{doc}"))
            }
        };

        self.records.push(DocRecord {
            category,
            name,
            line,
            body,
        });
    }

    /// Literal source of a declaration header: the declaration line alone
    /// when the first body statement shares it, otherwise the declaration
    /// line through the line before the anchor.
    fn declaration_header(&self, decl_line: usize, anchor: usize) -> String {
        let (start, end) = if decl_line == anchor {
            (decl_line - 1, anchor)
        } else {
            (decl_line - 1, anchor - 1)
        };
        let end = end.min(self.lines.len());
        let start = start.min(end);
        self.lines[start..end].join("\n")
    }

    fn import(&mut self, node: Node, category: Category) {
        let name = match node.kind() {
            "import_statement" => self.plain_import_names(node),
            "future_import_statement" => "__future__".to_string(),
            _ => self.from_import_module(node),
        };

        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.append_line(&format!("├{name}\n")) {
                warn!("import sink write failed: {}", e);
            }
        }

        self.records.push(DocRecord {
            category,
            name: Some(name),
            line: 0,
            body: String::new(),
        });
    }

    /// `import a.b, c as d` → `a.b,c` (full dotted paths, aliases dropped).
    fn plain_import_names(&self, node: Node) -> String {
        let mut names = Vec::new();
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                match child.kind() {
                    "dotted_name" => names.push(self.text(child)),
                    "aliased_import" => {
                        if let Some(target) = child.child_by_field_name("name") {
                            names.push(self.text(target));
                        }
                    }
                    _ => {}
                }
            }
        }
        names.join(",")
    }

    /// Module path of a `from ... import ...` statement; `?` when the syntax
    /// names no module (e.g. `from . import x`).
    fn from_import_module(&self, node: Node) -> String {
        match node.child_by_field_name("module_name") {
            Some(module) if module.kind() == "relative_import" => {
                for i in 0..module.named_child_count() {
                    if let Some(child) = module.named_child(i) {
                        if child.kind() == "dotted_name" {
                            return self.text(child);
                        }
                    }
                }
                "?".to_string()
            }
            Some(module) => self.text(module),
            None => "?".to_string(),
        }
    }

    fn docstring_of(&self, stmt: Node) -> Option<String> {
        if stmt.kind() != "expression_statement" || stmt.named_child_count() != 1 {
            return None;
        }
        let mut expr = stmt.named_child(0)?;
        // A docstring may be wrapped in parentheses; unwrap them the way
        // Python's ast does before deciding the statement is not a docstring.
        while expr.kind() == "parenthesized_expression" {
            expr = first_statement(expr)?;
        }
        let raw = match expr.kind() {
            "string" => self.string_content(expr)?,
            "concatenated_string" => {
                let mut parts = String::new();
                for i in 0..expr.named_child_count() {
                    let child = expr.named_child(i)?;
                    match child.kind() {
                        "string" => parts.push_str(&self.string_content(child)?),
                        "comment" => {}
                        _ => return None,
                    }
                }
                parts
            }
            _ => return None,
        };
        Some(docstring::clean(&raw))
    }

    /// Raw text between a string literal's delimiters. f-strings and bytes
    /// literals are not docstrings and yield `None`. Escape sequences are
    /// kept verbatim (`\n` stays two characters), not interpreted.
    fn string_content(&self, string: Node) -> Option<String> {
        let mut open = None;
        let mut close = None;
        for i in 0..string.child_count() {
            if let Some(child) = string.child(i) {
                match child.kind() {
                    "string_start" => open = Some(child),
                    "string_end" => close = Some(child),
                    "interpolation" => return None,
                    _ => {}
                }
            }
        }
        let (open, close) = (open?, close?);
        let prefix = self.text(open);
        if prefix.chars().any(|c| matches!(c, 'f' | 'F' | 'b' | 'B')) {
            return None;
        }
        self.source
            .get(open.end_byte()..close.start_byte())
            .map(str::to_string)
    }

    fn text(&self, node: Node) -> String {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
            .to_string()
    }
}

fn first_statement<'t>(container: Node<'t>) -> Option<Node<'t>> {
    for i in 0..container.named_child_count() {
        if let Some(child) = container.named_child(i) {
            if child.kind() != "comment" {
                return Some(child);
            }
        }
    }
    None
}
