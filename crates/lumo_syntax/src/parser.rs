//! Parser for Lua source.
//!
//! Converts a token stream into a [`Chunk`] following the Lua 5.2 reference grammar.
//! The parser is total: malformed input produces [`Stat::Error`] / [`Expr::Error`]
//! marker nodes plus diagnostics, never a panic and never an aborted parse, so editor
//! tooling always gets a tree to work with.
//!
//! ## Examples
//!
//! ```rust
//! use lumo_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("local answer = 42\n");
//! let parsed = parser::parse(&lexed.tokens);
//! assert!(parsed.errors.is_empty());
//! assert_eq!(parsed.chunk.block.stats.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind};
use lumo_core::lang::keywords::KeywordId;
use lumo_core::lang::operators::{self, OperatorId, UNARY_PRIORITY};
use lumo_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/exprs.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
