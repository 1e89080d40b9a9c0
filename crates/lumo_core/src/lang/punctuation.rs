//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the
//! lexer/parser: delimiters, separators, access markers, and the structural markers
//! Lua adds for varargs and labels.
//!
//! ## Notes
//! - `=` lives here rather than in the operator registry: Lua assignment is a
//!   statement, not an expression.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize
//!   source text.
//!
//! ## Examples
//! ```rust
//! use lumo_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::DoubleColon));
//! assert_eq!(punctuation::as_str(PunctuationId::Ellipsis), "...");
//! ```

use super::registry::{LuaVersion, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `;`.
    Separator,
    /// Access markers like `.` and `:`.
    Access,
    /// Structural markers like `=`, `...`, `::`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Semicolon,

    // Access
    Dot,
    Colon,

    // Markers
    Assign,
    Ellipsis,
    /// `::`, delimiting a goto label (Lua 5.2).
    DoubleColon,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub introduced_in: LuaVersion,
    pub stability: Stability,
}

/// Registry of all punctuation tokens.
pub static PUNCTUATION: &[PunctuationInfo] = &[
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator, LuaVersion::Lua51),
    info(
        PunctuationId::Semicolon,
        ";",
        PunctuationCategory::Separator,
        LuaVersion::Lua51,
    ),
    // Access
    info(PunctuationId::Dot, ".", PunctuationCategory::Access, LuaVersion::Lua51),
    info(PunctuationId::Colon, ":", PunctuationCategory::Access, LuaVersion::Lua51),
    // Markers
    info(PunctuationId::Assign, "=", PunctuationCategory::Marker, LuaVersion::Lua51),
    info(
        PunctuationId::Ellipsis,
        "...",
        PunctuationCategory::Marker,
        LuaVersion::Lua51,
    ),
    info(
        PunctuationId::DoubleColon,
        "::",
        PunctuationCategory::Marker,
        LuaVersion::Lua52,
    ),
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter, LuaVersion::Lua51),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter, LuaVersion::Lua51),
    info(
        PunctuationId::LBracket,
        "[",
        PunctuationCategory::Delimiter,
        LuaVersion::Lua51,
    ),
    info(
        PunctuationId::RBracket,
        "]",
        PunctuationCategory::Delimiter,
        LuaVersion::Lua51,
    ),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter, LuaVersion::Lua51),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter, LuaVersion::Lua51),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION.iter().find(|p| p.id == id).expect("punctuation info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
    introduced_in: LuaVersion,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        introduced_in,
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_complete() {
        // 13 punctuation tokens, all built through the same helper.
        assert_eq!(PUNCTUATION.len(), 13);
        for p in PUNCTUATION {
            assert_eq!(p.stability, Stability::Stable);
            assert!(std::ptr::eq(info_for(p.id), p));
        }
    }

    #[test]
    fn test_roundtrip() {
        for p in PUNCTUATION {
            assert_eq!(from_str(p.canonical), Some(p.id));
            assert_eq!(as_str(p.id), p.canonical);
        }
    }

    #[test]
    fn test_assign_is_punctuation_not_operator() {
        assert_eq!(from_str("="), Some(PunctuationId::Assign));
        assert_eq!(crate::lang::operators::from_str("="), None);
    }
}
