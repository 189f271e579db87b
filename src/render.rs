//! Orders extracted records and streams their markdown rendition.

use crate::record::{Category, DocRecord};
use log::debug;
use std::collections::VecDeque;

/// Sort records into section order and return a lazy chunk stream. The sort
/// is stable, so records tied on `(group, line)` keep extraction order; this
/// is what keeps imports (all at line 0) in discovery order.
pub fn render(mut records: Vec<DocRecord>, fallback_name: &str) -> MarkdownStream {
    records.sort_by_key(|r| (r.category.group(), r.line));
    debug!("rendering {} records", records.len());
    MarkdownStream {
        records: records.into_iter(),
        fallback: fallback_name.to_string(),
        first_import: true,
        queued: VecDeque::new(),
    }
}

/// Pull-based chunk iterator. Chunks are produced one record at a time, so a
/// caller can start printing before the document is fully generated.
pub struct MarkdownStream {
    records: std::vec::IntoIter<DocRecord>,
    fallback: String,
    first_import: bool,
    queued: VecDeque<String>,
}

impl Iterator for MarkdownStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(chunk) = self.queued.pop_front() {
            return Some(chunk);
        }

        let record = self.records.next()?;
        let name = record.name.as_deref().unwrap_or(&self.fallback);
        match record.category {
            Category::Module => {
                self.queued.push_back(format!("# Module '{name}'\n"));
            }
            category if category.is_import() => {
                if self.first_import {
                    self.first_import = false;
                    self.queued.push_back("## Imports\n".to_string());
                }
                self.queued.push_back(format!("* {name}"));
            }
            category => {
                let line = match record.line {
                    0 => "?".to_string(),
                    n => n.to_string(),
                };
                self.queued
                    .push_back(format!("{} '{name}'\nline {line}\n\n", category.heading()));
            }
        }
        self.queued.push_back(format!("{}\n", record.body));
        self.queued.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category, name: Option<&str>, line: usize, body: &str) -> DocRecord {
        DocRecord {
            category,
            name: name.map(str::to_string),
            line,
            body: body.to_string(),
        }
    }

    fn rendered(records: Vec<DocRecord>, fallback: &str) -> String {
        render(records, fallback).collect()
    }

    #[test]
    fn module_then_imports() {
        let out = rendered(
            vec![
                record(Category::Module, None, 0, "Module doc"),
                record(Category::Import, Some("os"), 0, ""),
            ],
            "fallback",
        );
        assert_eq!(out, "# Module 'fallback'\nModule doc\n## Imports\n* os\n");
    }

    #[test]
    fn module_record_uses_fallback_name() {
        let out = rendered(vec![record(Category::Module, None, 0, "doc")], "sample");
        assert!(out.starts_with("# Module 'sample'\n"));
    }

    #[test]
    fn imports_heading_appears_exactly_once() {
        let out = rendered(
            vec![
                record(Category::Import, Some("os"), 0, ""),
                record(Category::ImportFrom, Some("a.b"), 0, ""),
                record(Category::Import, Some("sys"), 0, ""),
            ],
            "m",
        );
        assert_eq!(out.matches("## Imports").count(), 1);
        assert_eq!(out, "## Imports\n* os\n* a.b\n* sys\n");
    }

    #[test]
    fn classes_precede_functions_regardless_of_line() {
        let out = rendered(
            vec![
                record(Category::Function, Some("f"), 1, "fbody"),
                record(Category::Class, Some("C"), 10, "cbody"),
            ],
            "m",
        );
        let class_at = out.find("## Class 'C'").unwrap();
        let func_at = out.find("### Function 'f'").unwrap();
        assert!(class_at < func_at);
    }

    #[test]
    fn records_sort_by_line_within_a_group() {
        let out = rendered(
            vec![
                record(Category::Function, Some("late"), 30, ""),
                record(Category::AsyncFunction, Some("early"), 3, ""),
            ],
            "m",
        );
        assert!(out.find("'early'").unwrap() < out.find("'late'").unwrap());
    }

    #[test]
    fn function_heading_carries_line_number() {
        let out = rendered(
            vec![record(Category::AsyncFunction, Some("fetch"), 7, "body")],
            "m",
        );
        assert_eq!(out, "\n### Async Function 'fetch'\nline 7\n\nbody\n");
    }

    #[test]
    fn zero_line_renders_question_mark() {
        let out = rendered(vec![record(Category::Class, Some("C"), 0, "")], "m");
        assert!(out.contains("line ?\n"));
    }

    #[test]
    fn chunks_are_produced_incrementally() {
        let mut stream = render(
            vec![
                record(Category::Module, None, 0, "doc"),
                record(Category::Class, Some("C"), 2, "cdoc"),
            ],
            "m",
        );
        assert_eq!(stream.next().as_deref(), Some("# Module 'm'\n"));
        assert_eq!(stream.next().as_deref(), Some("doc\n"));
        assert_eq!(stream.next().as_deref(), Some("\n## Class 'C'\nline 2\n\n"));
        assert_eq!(stream.next().as_deref(), Some("cdoc\n"));
        assert_eq!(stream.next(), None);
    }
}
