//! Property-based tests for the lumo pipeline.
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.
//! The central invariant is totality: no input, however mangled, may panic or
//! abort any stage of the pipeline.

use lumo::lexer;
use lumo::parser;
use lumo::ModelBuilder;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Valid Lua identifiers that are not reserved words.
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("Not a keyword", |s| {
        lumo_core::lang::keywords::from_str(s).is_none()
    })
}

/// Simple well-formed statements.
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident_strategy(), any::<u16>()).prop_map(|(name, n)| format!("local {} = {}\n", name, n)),
        (ident_strategy(), ident_strategy())
            .prop_map(|(name, param)| format!("function {}({}) return {} end\n", name, param, param)),
        (ident_strategy(), "[a-z]{1,10}")
            .prop_map(|(name, s)| format!("local {} = \"{}\"\n", name, s)),
    ]
}

// =============================================================================
// Totality
// =============================================================================

proptest! {
    /// Property: the lexer never panics and always terminates with Eof.
    #[test]
    fn lexer_is_total(source in ".{0,200}") {
        let lexed = lexer::lex(&source);
        let last = lexed.tokens.last().expect("at least Eof");
        prop_assert!(matches!(last.kind, lexer::TokenKind::Eof));
    }

    /// Property: token spans are in bounds and non-overlapping in order.
    #[test]
    fn lexer_spans_are_ordered(source in ".{0,200}") {
        let lexed = lexer::lex(&source);
        let mut prev_end = 0;
        for token in &lexed.tokens {
            prop_assert!(token.span.start <= token.span.end);
            prop_assert!(token.span.end <= source.len());
            prop_assert!(token.span.start >= prev_end, "tokens out of order");
            prev_end = token.span.end;
        }
    }

    /// Property: the parser always returns a tree, for any byte soup.
    #[test]
    fn parser_is_total(source in ".{0,200}") {
        let lexed = lexer::lex(&source);
        let parsed = parser::parse(&lexed.tokens);
        // Malformed input must be marked, not dropped: errors imply markers
        // somewhere, and vice versa nothing prevents an empty block.
        let _ = parsed.chunk.block.stats.len();
    }

    /// Property: the full pipeline never fails on arbitrary input.
    #[test]
    fn builder_is_total(source in ".{0,300}") {
        let builder = ModelBuilder::default();
        let root = builder.build(&source).expect("build is total");
        prop_assert_eq!(root.source_len, source.len());
        prop_assert!(root.line_count >= 1);
    }
}

// =============================================================================
// Well-formed inputs
// =============================================================================

proptest! {
    /// Property: generated well-formed statements parse clean.
    #[test]
    fn generated_statements_parse_without_errors(
        stats in proptest::collection::vec(statement_strategy(), 1..8)
    ) {
        let source = stats.concat();
        let lexed = lexer::lex(&source);
        prop_assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
        let parsed = parser::parse(&lexed.tokens);
        prop_assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
        prop_assert_eq!(parsed.chunk.block.stats.len(), stats.len());
    }

    /// Property: every generated declaration appears in the model outline.
    #[test]
    fn generated_declarations_reach_the_model(
        stats in proptest::collection::vec(statement_strategy(), 1..8)
    ) {
        let source = stats.concat();
        let builder = ModelBuilder::default();
        let root = builder.build(&source).expect("build");
        prop_assert!(!root.has_errors());
        prop_assert_eq!(root.model.all_declarations().count(), stats.len());
    }

    /// Property: building twice yields the same model (engine reuse is pure).
    #[test]
    fn rebuild_is_deterministic(
        stats in proptest::collection::vec(statement_strategy(), 1..5)
    ) {
        let source = stats.concat();
        let builder = ModelBuilder::default();
        let first = builder.build(&source).expect("build");
        let second = builder.build(&source).expect("build");
        prop_assert_eq!(first, second);
    }
}
