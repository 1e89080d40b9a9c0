//! Define the reserved keyword vocabulary for Lua.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical
//! spellings, categories, and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; Lua reserves only the lowercase
//!   spellings (`And` is a valid identifier, `and` is not).
//! - Some reserved words are also "word operators" (`and`, `or`, `not`). If you need
//!   operator precedence/fixity, use [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use lumo_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("local"), Some(KeywordId::Local));
//! assert_eq!(keywords::as_str(KeywordId::Local), "local");
//! assert_eq!(keywords::from_str("Local"), None);
//! ```

use super::registry::{LuaVersion, Stability};

/// Stable identifier for every reserved Lua keyword.
///
/// ## Notes
/// - The canonical spelling is accessible via [`as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow
    If,
    Then,
    Else,
    Elseif,
    End,
    While,
    Do,
    For,
    In,
    Repeat,
    Until,
    Break,
    Goto,
    Return,

    // Definitions / bindings
    Function,
    Local,

    // Literals
    Nil,
    True,
    False,

    // Word operators
    And,
    Or,
    Not,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Literal,
    Operator,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub introduced_in: LuaVersion,
    pub stability: Stability,
}

/// Registry of all reserved words.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::Then, "then", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(
        KeywordId::Elseif,
        "elseif",
        KeywordCategory::ControlFlow,
        LuaVersion::Lua51,
    ),
    info(KeywordId::End, "end", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(
        KeywordId::Repeat,
        "repeat",
        KeywordCategory::ControlFlow,
        LuaVersion::Lua51,
    ),
    info(KeywordId::Until, "until", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, LuaVersion::Lua51),
    info(KeywordId::Goto, "goto", KeywordCategory::ControlFlow, LuaVersion::Lua52),
    info(
        KeywordId::Return,
        "return",
        KeywordCategory::ControlFlow,
        LuaVersion::Lua51,
    ),
    // Definitions / bindings
    info(
        KeywordId::Function,
        "function",
        KeywordCategory::Definition,
        LuaVersion::Lua51,
    ),
    info(KeywordId::Local, "local", KeywordCategory::Definition, LuaVersion::Lua51),
    // Literals
    info(KeywordId::Nil, "nil", KeywordCategory::Literal, LuaVersion::Lua51),
    info(KeywordId::True, "true", KeywordCategory::Literal, LuaVersion::Lua51),
    info(KeywordId::False, "false", KeywordCategory::Literal, LuaVersion::Lua51),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator, LuaVersion::Lua51),
    info(KeywordId::Or, "or", KeywordCategory::Operator, LuaVersion::Lua51),
    info(KeywordId::Not, "not", KeywordCategory::Operator, LuaVersion::Lua51),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is a reserved word.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    introduced_in: LuaVersion,
) -> KeywordInfo {
    KeywordInfo {
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
    fn test_reserved_word_count() {
        // Lua 5.2 reserves exactly 22 words (the 5.1 set plus `goto`).
        assert_eq!(KEYWORDS.len(), 22);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("and"), Some(KeywordId::And));
        assert_eq!(from_str("And"), None);
        assert_eq!(from_str("END"), None);
    }

    #[test]
    fn test_roundtrip() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id));
            assert_eq!(as_str(k.id), k.canonical);
        }
    }
}
