//! Lua syntax frontend for lumo: lexer, parser, AST, diagnostics.
//!
//! This crate is intentionally "syntax-only": it does not build scopes, resolve names,
//! or touch the filesystem. The semantic source model lives in the root `lumo` crate.
//!
//! ## Notes
//! - Vocabulary identity (keywords/operators/punctuation) comes from `lumo_core::lang`
//!   registries.
//! - Both the lexer and the parser are total: malformed input produces diagnostics and
//!   error-marker nodes, never an aborted run. Callers decide how strict to be.
//!
//! ## Examples
//! ```rust,no_run
//! use lumo_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("local x = 1\n");
//! let parsed = parser::parse(&lexed.tokens);
//! assert!(lexed.errors.is_empty() && parsed.errors.is_empty());
//! assert_eq!(parsed.chunk.block.stats.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
