//! Guardrail tests for the `lumo_core::lang` registries.
//!
//! These tests protect the registry invariants that the lexer and model builder rely
//! on: unique spellings, total `from_str`/`as_str` round-trips, and consistent
//! precedence metadata.

use std::collections::HashSet;

use lumo_core::lang::{builtins, keywords, operators, punctuation};

#[test]
fn keyword_spellings_are_unique() {
    let mut seen = HashSet::new();
    for k in keywords::KEYWORDS {
        assert!(seen.insert(k.canonical), "duplicate keyword spelling {:?}", k.canonical);
    }
}

#[test]
fn operator_spellings_are_unique() {
    let mut seen = HashSet::new();
    for o in operators::OPERATORS {
        assert!(seen.insert(o.canonical), "duplicate operator spelling {:?}", o.canonical);
    }
}

#[test]
fn punctuation_spellings_are_unique() {
    let mut seen = HashSet::new();
    for p in punctuation::PUNCTUATION {
        assert!(
            seen.insert(p.canonical),
            "duplicate punctuation spelling {:?}",
            p.canonical
        );
    }
}

#[test]
fn builtin_names_are_unique() {
    let mut seen = HashSet::new();
    for b in builtins::BUILTINS {
        assert!(seen.insert(b.name), "duplicate builtin name {:?}", b.name);
    }
}

#[test]
fn word_operators_are_reserved_words() {
    // Every operator spelled as a word must also be in the keyword registry, otherwise
    // the lexer would tokenize it as a plain identifier.
    for o in operators::OPERATORS.iter().filter(|o| o.is_keyword_spelling) {
        assert!(
            keywords::from_str(o.canonical).is_some(),
            "word operator {:?} missing from keyword registry",
            o.canonical
        );
    }
}

#[test]
fn symbol_operators_never_collide_with_punctuation() {
    for o in operators::OPERATORS.iter().filter(|o| !o.is_keyword_spelling) {
        assert!(
            punctuation::from_str(o.canonical).is_none(),
            "spelling {:?} is registered as both operator and punctuation",
            o.canonical
        );
    }
}

#[test]
fn infix_operators_have_nonzero_priorities() {
    for o in operators::OPERATORS {
        if operators::is_infix(o.id) {
            assert!(o.left_priority > 0, "{:?} has no left priority", o.id);
            assert!(o.right_priority > 0, "{:?} has no right priority", o.id);
        }
    }
}

#[test]
fn builtins_never_shadow_keywords() {
    for b in builtins::BUILTINS {
        assert!(
            keywords::from_str(b.name).is_none(),
            "builtin {:?} collides with a reserved word",
            b.name
        );
    }
}
