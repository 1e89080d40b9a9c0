//! Provide the canonical Lua language vocabulary for the lumo toolchain.
//!
//! This crate is intentionally small and dependency-free. It contains the registry-backed
//! vocabularies (keywords, operators, punctuation, builtin globals) that both:
//! - the syntax frontend uses for tokenization and precedence decisions, and
//! - the model builder uses to classify global references.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no AST types, no global state.
//! - The targeted dialect is Lua 5.2 (the dialect the original tooling indexed); items
//!   introduced in 5.2 (e.g. `goto`) carry that provenance in their metadata.

pub mod lang;
