//! Aggregator file editing.
//!
//! `views/__init__.py` re-exports every generated view:
//!
//! ```text
//! """Module containing the DashView classes for the application."""
//!
//! from .footer import FooterView        imports
//! from .header import HeaderView
//!
//! __all__ = ["FooterView", "HeaderView"] export list
//! ```
//!
//! The file is parsed into the lines before the export list, the list
//! entries, and the lines after it. Nothing else is interpreted, so hand
//! edits elsewhere in the file survive a rewrite.

use std::sync::LazyLock;

use regex::Regex;

use super::error::DomainError;

/// Start of the export-list declaration, optionally annotated.
static EXPORTS_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^__all__\s*(?::[^=]*)?=\s*\[").expect("export list pattern is valid")
});

/// One quoted entry inside the export list.
static EXPORT_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("export entry pattern is valid")
});

const AGGREGATOR_DOCSTRING: &str =
    "\"\"\"Module containing the DashView classes for the application.\"\"\"";

/// Result of registering an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Registered,
    /// The import line was already present; nothing changed.
    AlreadyRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorFile {
    before: Vec<String>,
    exports: Vec<String>,
    /// Text following `]` on the closing line, such as a `# noqa` comment.
    trailing: String,
    after: Vec<String>,
}

impl AggregatorFile {
    /// Docstring plus an empty export list.
    pub fn empty() -> Self {
        Self {
            before: vec![AGGREGATOR_DOCSTRING.to_owned(), String::new()],
            exports: Vec::new(),
            trailing: String::new(),
            after: Vec::new(),
        }
    }

    /// Parse existing aggregator text. A file without an export list gets
    /// one appended on render.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let lines: Vec<&str> = text.lines().collect();
        let starts: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| EXPORTS_START_RE.is_match(l))
            .map(|(i, _)| i)
            .collect();

        let start = match starts.as_slice() {
            [] => {
                return Ok(Self {
                    before: lines.iter().map(|l| (*l).to_owned()).collect(),
                    exports: Vec::new(),
                    trailing: String::new(),
                    after: Vec::new(),
                });
            }
            [start] => *start,
            _ => {
                return Err(DomainError::MalformedAggregator {
                    reason: "more than one `__all__` declaration".into(),
                });
            }
        };

        // Scan from just past the opening bracket so a `list[str]`
        // annotation is not mistaken for the end of the literal.
        let open = EXPORTS_START_RE
            .find(lines[start])
            .map_or(0, |m| m.end());
        let mut body = String::new();
        let mut quote = None;
        let mut end = None;
        for (i, line) in lines.iter().enumerate().skip(start) {
            let segment = if i == start { &line[open..] } else { *line };
            match scan_list_segment(segment, &mut quote) {
                Segment::Closed(close) => {
                    body.push_str(&segment[..close]);
                    end = Some((i, segment[close + 1..].to_owned()));
                    break;
                }
                Segment::Open(content_end) => {
                    body.push_str(&segment[..content_end]);
                    body.push('\n');
                }
            }
        }
        let (end, trailing) = end.ok_or_else(|| DomainError::MalformedAggregator {
            reason: "unterminated `__all__` list".into(),
        })?;

        let exports = EXPORT_ENTRY_RE
            .captures_iter(&body)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| m.as_str().to_owned())
            .collect();

        Ok(Self {
            before: lines[..start].iter().map(|l| (*l).to_owned()).collect(),
            exports,
            trailing,
            after: lines[end + 1..].iter().map(|l| (*l).to_owned()).collect(),
        })
    }

    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Add `from .<module> import <symbol>` and export `symbol`.
    pub fn register(&mut self, module: &str, symbol: &str) -> EditOutcome {
        let import = format!("from .{module} import {symbol}");
        if self.before.iter().any(|l| l.trim_end() == import) {
            return EditOutcome::AlreadyRegistered;
        }

        let last_import = self
            .before
            .iter()
            .rposition(|l| l.starts_with("import ") || l.starts_with("from "));
        match last_import {
            Some(i) => self.before.insert(i + 1, import),
            None => {
                // No imports yet: keep one blank line after the docstring and
                // one before the export list.
                while self.before.last().is_some_and(|l| l.trim().is_empty()) {
                    self.before.pop();
                }
                if !self.before.is_empty() {
                    self.before.push(String::new());
                }
                self.before.push(import);
                self.before.push(String::new());
            }
        }

        if !self.exports.iter().any(|e| e == symbol) {
            self.exports.push(symbol.to_owned());
        }
        EditOutcome::Registered
    }

    fn export_line(&self) -> String {
        let entries: Vec<String> = self.exports.iter().map(|e| format!("\"{e}\"")).collect();
        format!("__all__ = [{}]{}", entries.join(", "), self.trailing)
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.before.iter().map(String::as_str).collect();
        if self.after.is_empty() && lines.last().is_some_and(|l| !l.trim().is_empty()) {
            lines.push("");
        }
        let export = self.export_line();
        lines.push(&export);
        lines.extend(self.after.iter().map(String::as_str));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

enum Segment {
    /// Byte offset of the `]` closing the list.
    Closed(usize),
    /// The list continues; entries end at this offset (a `#` comment or the
    /// end of the line).
    Open(usize),
}

/// Scan one line of the export list, skipping brackets inside quoted
/// entries. `quote` carries an open string across lines.
fn scan_list_segment(segment: &str, quote: &mut Option<char>) -> Segment {
    let mut escaped = false;
    for (i, c) in segment.char_indices() {
        match *quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    *quote = None;
                }
            }
            None => match c {
                '"' | '\'' => *quote = Some(c),
                '#' => return Segment::Open(i),
                ']' => return Segment::Closed(i),
                _ => {}
            },
        }
    }
    Segment::Open(segment.len())
}

impl Default for AggregatorFile {
    fn default() -> Self {
        Self::empty()
    }
}
