//! Operator vocabulary.
//!
//! This module defines the canonical Lua operator set (symbol operators like `+` and
//! word operators like `and`) along with precedence metadata following the Lua 5.2
//! reference manual.
//!
//! ## Notes
//! - Precedence is recorded as a `(left, right)` binding-priority pair, the same scheme
//!   the reference Lua parser uses: right-associative operators (`..`, `^`) have a
//!   right priority lower than their left priority.
//! - Word-operator spellings (`and`, `or`, `not`) also appear in the keyword registry
//!   ([`crate::lang::keywords`]); use this module when you need precedence.
//! - `=` is not an operator in Lua (assignment is a statement); it lives in
//!   [`crate::lang::punctuation`].
//!
//! ## Examples
//! ```rust
//! use lumo_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str(".."), Some(OperatorId::Concat));
//! let concat = operators::info_for(OperatorId::Concat);
//! assert!(concat.right_priority < concat.left_priority); // right-associative
//! ```

use super::registry::{LuaVersion, Stability};

/// Define whether an operator is infix (binary), prefix (unary), or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// `-` is both binary subtraction and unary negation.
    InfixOrPrefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Strings
    Concat,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Unary-only
    Len,

    // Word operators
    And,
    Or,
    Not,
}

/// Binding priority of every prefix (unary) operator.
///
/// Unary operators bind tighter than all binary operators except `^`:
/// `-x^2` parses as `-(x^2)` while `-x*y` parses as `(-x)*y`.
pub const UNARY_PRIORITY: u8 = 12;

/// Metadata for an operator.
///
/// ## Notes
/// - `left_priority`/`right_priority` only apply to infix usage; both are `0` for
///   unary-only operators.
/// - The absolute scale follows the reference Lua parser and must stay consistent with
///   [`UNARY_PRIORITY`].
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    pub left_priority: u8,
    pub right_priority: u8,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
    pub introduced_in: LuaVersion,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Add, "+", 10, 10, Fixity::Infix, false),
    op(OperatorId::Sub, "-", 10, 10, Fixity::InfixOrPrefix, false),
    op(OperatorId::Mul, "*", 11, 11, Fixity::Infix, false),
    op(OperatorId::Div, "/", 11, 11, Fixity::Infix, false),
    op(OperatorId::Mod, "%", 11, 11, Fixity::Infix, false),
    // `^` is right-associative and binds tighter than unary operators on its left.
    op(OperatorId::Pow, "^", 14, 13, Fixity::Infix, false),
    // Strings
    op(OperatorId::Concat, "..", 9, 8, Fixity::Infix, false),
    // Comparison
    op(OperatorId::Eq, "==", 3, 3, Fixity::Infix, false),
    op(OperatorId::NotEq, "~=", 3, 3, Fixity::Infix, false),
    op(OperatorId::Lt, "<", 3, 3, Fixity::Infix, false),
    op(OperatorId::LtEq, "<=", 3, 3, Fixity::Infix, false),
    op(OperatorId::Gt, ">", 3, 3, Fixity::Infix, false),
    op(OperatorId::GtEq, ">=", 3, 3, Fixity::Infix, false),
    // Unary-only
    op(OperatorId::Len, "#", 0, 0, Fixity::Prefix, false),
    // Word operators
    op(OperatorId::And, "and", 2, 2, Fixity::Infix, true),
    op(OperatorId::Or, "or", 1, 1, Fixity::Infix, true),
    op(OperatorId::Not, "not", 0, 0, Fixity::Prefix, true),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

/// Return `true` if the operator can be used as a prefix (unary) operator.
pub fn is_prefix(id: OperatorId) -> bool {
    matches!(info_for(id).fixity, Fixity::Prefix | Fixity::InfixOrPrefix)
}

/// Return `true` if the operator can be used as an infix (binary) operator.
pub fn is_infix(id: OperatorId) -> bool {
    matches!(info_for(id).fixity, Fixity::Infix | Fixity::InfixOrPrefix)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    canonical: &'static str,
    left_priority: u8,
    right_priority: u8,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        left_priority,
        right_priority,
        fixity,
        is_keyword_spelling,
        introduced_in: LuaVersion::Lua51,
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ladder() {
        // or < and < comparison < .. < additive < multiplicative < unary < ^
        let or = info_for(OperatorId::Or).left_priority;
        let and = info_for(OperatorId::And).left_priority;
        let cmp = info_for(OperatorId::Eq).left_priority;
        let concat = info_for(OperatorId::Concat).left_priority;
        let add = info_for(OperatorId::Add).left_priority;
        let mul = info_for(OperatorId::Mul).left_priority;
        let pow = info_for(OperatorId::Pow).left_priority;

        assert!(or < and);
        assert!(and < cmp);
        assert!(cmp < concat);
        assert!(concat < add);
        assert!(add < mul);
        assert!(mul < UNARY_PRIORITY);
        assert!(UNARY_PRIORITY < pow);
    }

    #[test]
    fn test_right_associative() {
        for id in [OperatorId::Concat, OperatorId::Pow] {
            let info = info_for(id);
            assert!(info.right_priority < info.left_priority, "{:?} must be right-assoc", id);
        }
        let add = info_for(OperatorId::Add);
        assert_eq!(add.left_priority, add.right_priority);
    }

    #[test]
    fn test_fixity() {
        assert!(is_prefix(OperatorId::Sub));
        assert!(is_infix(OperatorId::Sub));
        assert!(is_prefix(OperatorId::Len));
        assert!(!is_infix(OperatorId::Len));
        assert!(!is_prefix(OperatorId::Add));
    }
}
