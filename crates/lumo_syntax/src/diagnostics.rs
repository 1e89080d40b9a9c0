//! Diagnostics for the Lua frontend.
//!
//! Both the lexer and the parser report problems as [`Diagnostic`] values and keep
//! going; nothing in this crate aborts on the first error. The model builder layers
//! its own warnings on top using the same type.

use crate::ast::Span;
use serde::Serialize;

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in the source, with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[error("{severity}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub severity: Severity,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Error,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Warning,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

// ============================================================================
// Line index
// ============================================================================

/// Maps byte offsets to 1-based line/column pairs.
///
/// Built once per source; lookups are a binary search over line starts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Number of lines (at least 1, even for empty source).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based (line, column) for a byte offset. Columns count bytes, which matches
    /// what most editors expect for ASCII-heavy Lua source.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let idx = LineIndex::new("line 1\nline 2\nline 3");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(7), (2, 1));
        assert_eq!(idx.line_col(10), (2, 4));
        assert_eq!(idx.line_col(999), (3, 7));
        assert_eq!(idx.line_count(), 3);
    }

    #[test]
    fn test_empty_source() {
        let idx = LineIndex::new("");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_col(0), (1, 1));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::error("unexpected symbol near '?'", Span::new(3, 4));
        assert_eq!(d.to_string(), "error: unexpected symbol near '?'");
    }
}
