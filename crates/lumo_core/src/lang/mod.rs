//! Lua language vocabulary registries.
//!
//! This module is the front door for language-level vocabulary: reserved keywords,
//! operators, punctuation, and builtin globals.
//!
//! The design goal is to avoid stringly-typed checks scattered across the frontend and
//! the model builder. Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`)
//! and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for
//!   shared use (diagnostics, outline labels, highlighting).
//!
//! ## Examples
//! ```rust
//! use lumo_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::Function), "function");
//! ```

pub mod builtins;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
