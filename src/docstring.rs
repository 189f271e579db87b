//! Whitespace normalization for docstrings and declaration headers.
//!
//! `clean` follows the same rules CPython's `inspect.cleandoc` applies to
//! docstrings; `dedent` follows `textwrap.dedent`. Both are total: malformed
//! indentation falls through as-is instead of failing.

/// Normalize a raw docstring: expand tabs, strip the first line's leading
/// whitespace, remove the common margin of the remaining lines, and drop
/// leading and trailing blank lines.
pub fn clean(doc: &str) -> String {
    let doc = expand_tabs(doc);
    let mut lines: Vec<String> = doc.split('\n').map(String::from).collect();

    let mut margin = usize::MAX;
    for line in &lines[1..] {
        let content = line.trim_start().len();
        if content > 0 {
            margin = margin.min(line.len() - content);
        }
    }

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if margin < usize::MAX {
        for line in lines.iter_mut().skip(1) {
            *line = line.get(margin..).unwrap_or("").to_string();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }

    lines.join("\n")
}

/// Remove the whitespace prefix common to all non-blank lines.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<String> = None;
    for line in text.split('\n') {
        let stripped = line.trim_start();
        if stripped.is_empty() {
            continue;
        }
        let indent = &line[..line.len() - stripped.len()];
        margin = Some(match margin {
            None => indent.to_string(),
            Some(current) => common_prefix(&current, indent),
        });
    }

    let margin = margin.unwrap_or_default();
    if margin.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| line.strip_prefix(margin.as_str()).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

/// Column-aware tab expansion (tab stops every 8 columns), matching
/// `str.expandtabs`.
fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = 8 - col % 8;
                out.extend(std::iter::repeat_n(' ', spaces));
                col += spaces;
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            _ => {
                out.push(ch);
                col += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_single_line_keeps_trailing_space() {
        assert_eq!(clean(" Module documentation "), "Module documentation ");
    }

    #[test]
    fn clean_strips_margin_from_continuation_lines() {
        let raw = " typical docstring\n        - Args:\n            - a (str): input\n    ";
        assert_eq!(
            clean(raw),
            "typical docstring\n- Args:\n    - a (str): input"
        );
    }

    #[test]
    fn clean_drops_surrounding_blank_lines() {
        assert_eq!(clean("\n    first\n    second\n\n"), "first\nsecond");
    }

    #[test]
    fn clean_expands_tabs() {
        assert_eq!(clean("doc\n\tindented"), "doc\nindented");
    }

    #[test]
    fn dedent_removes_common_indent() {
        assert_eq!(dedent("    def f():\n        pass"), "def f():\n    pass");
    }

    #[test]
    fn dedent_leaves_flush_text_alone() {
        assert_eq!(dedent("def f(\n    a,\n):"), "def f(\n    a,\n):");
    }

    #[test]
    fn dedent_mixed_depths() {
        assert_eq!(dedent("  a\n    b\n  c"), "a\n  b\nc");
    }

    #[test]
    fn dedent_empty_input() {
        assert_eq!(dedent(""), "");
    }
}
