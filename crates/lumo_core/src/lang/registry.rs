//! Shareable metadata for `lumo_core::lang` registries.
//!
//! The `lumo_core::lang` module is a set of **registry-first** vocabularies: keywords,
//! operators, punctuation, builtin globals. This submodule provides the small,
//! dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can
//!   live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still
//!   lives in the lexer/parser.
//!
//! ## See also
//! - [`crate::lang::keywords`]
//! - [`crate::lang::operators`]
//! - [`crate::lang::builtins`]

/// Identify the Lua language version that introduced a vocabulary item.
///
/// ## Notes
/// - lumo targets Lua 5.2; `Lua51` items are the long-stable base vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuaVersion {
    Lua51,
    Lua52,
}

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to flag deprecated globals), not for
///   feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}
