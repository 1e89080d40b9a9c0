#![forbid(unsafe_code)]
//! Lua Source Model Builder
//!
//! lumo turns Lua source text into a semantic source model for editor and indexing
//! tooling: a declaration outline, scope-resolved references, global usage, and
//! `require` module references, together with every diagnostic from the pipeline.
//!
//! The pipeline is lex → parse → model, and it is total end to end: malformed input
//! produces a model plus diagnostics, never a failure. The entry point is
//! [`ModelBuilder`], a thread-safe session with a lazily initialized engine and an
//! explicit close.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation. [`ModelBuilder`] additionally catches engine panics and surfaces them
//!   as [`BuildError::Internal`].

pub mod builder;
pub mod cli;
pub mod model;
pub mod source_root;

pub use builder::{BuildError, BuilderConfig, BuilderStats, ModelBuilder};
pub use model::SourceModel;
pub use source_root::LuaSourceRoot;

pub use lumo_syntax::ast;
pub use lumo_syntax::diagnostics;
pub use lumo_syntax::lexer;
pub use lumo_syntax::parser;
