//! The immutable result of analyzing one Lua source.

use lumo_syntax::diagnostics::{Diagnostic, Severity};
use serde::Serialize;

use crate::model::SourceModel;

/// Aggregated output of the full pipeline for one source: the semantic model,
/// every diagnostic from lexing/parsing/model building, and source metadata.
///
/// A source root is a snapshot: it is built once and never mutated, so it can be
/// shared freely across threads and cached by consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuaSourceRoot {
    pub model: SourceModel,
    pub diagnostics: Vec<Diagnostic>,
    pub source_len: usize,
    pub line_count: usize,
}

impl LuaSourceRoot {
    /// `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Serialize to pretty JSON for downstream tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let root = LuaSourceRoot {
            model: SourceModel::default(),
            diagnostics: Vec::new(),
            source_len: 0,
            line_count: 1,
        };
        let json = root.to_json().expect("serializes");
        assert!(json.contains("\"declarations\""));
        assert!(json.contains("\"line_count\": 1"));
        assert!(!root.has_errors());
    }
}
