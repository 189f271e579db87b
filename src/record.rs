/// The closed set of node kinds that produce documentation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Module,
    Class,
    Function,
    AsyncFunction,
    ImportFrom,
    Import,
}

impl Category {
    /// Section ordering used as the primary sort key. Function-like and
    /// import-like categories share a group.
    pub fn group(&self) -> u8 {
        match self {
            Category::Module => 0,
            Category::Class => 1,
            Category::Function | Category::AsyncFunction => 2,
            Category::ImportFrom | Category::Import => 3,
        }
    }

    /// Markdown heading literal for declaration categories. The leading
    /// newline on non-module headings separates sections in the output.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Module => "# Module",
            Category::Class => "\n## Class",
            Category::Function => "\n### Function",
            Category::AsyncFunction => "\n### Async Function",
            Category::ImportFrom | Category::Import => "## Imports",
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Category::ImportFrom | Category::Import)
    }
}

/// One extracted declaration or import statement. Records are built once by
/// the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRecord {
    pub category: Category,
    /// Declaration name; `None` for the module record, whose display name is
    /// supplied by the renderer's caller.
    pub name: Option<String>,
    /// Anchor line (1-based). Always 0 for imports and the module record.
    pub line: usize,
    /// Cleaned docstring (or the undocumented sentinel), prefixed with the
    /// fenced signature block for function-like categories. Empty for imports.
    pub body: String,
}
