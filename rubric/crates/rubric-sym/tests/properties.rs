//! Property tests over arbitrary names
//!
//! Each property runs against a fresh registry so earlier cases cannot
//! influence later ones.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rubric_sym::classify::classify;
use rubric_sym::escape::{display, needs_escaping};
use rubric_sym::{Scope, SymbolRegistry};

#[quickcheck]
fn intern_is_idempotent(text: String) -> bool {
    let registry = SymbolRegistry::new();
    let first = registry.intern(&text);
    let len = registry.len();
    registry.intern(&text) == first && registry.len() == len
}

#[quickcheck]
fn resolve_returns_interned_text(text: String) -> bool {
    let registry = SymbolRegistry::new();
    let id = registry.intern(&text);
    registry.resolve(id).map(|t| *t == *text).unwrap_or(false)
}

#[quickcheck]
fn distinct_text_gets_distinct_ids(a: String, b: String) -> TestResult {
    if a == b {
        return TestResult::discard();
    }
    let registry = SymbolRegistry::new();
    TestResult::from_bool(registry.intern(&a) != registry.intern(&b))
}

#[quickcheck]
fn id_scope_matches_classifier(text: String) -> bool {
    let registry = SymbolRegistry::new();
    registry.intern(&text).scope() == classify(&text)
}

#[quickcheck]
fn ascii_names_match_classifier(bytes: Vec<u8>) -> bool {
    // Bias towards the punctuation-heavy inputs the grammar cares about.
    let text: String = bytes
        .into_iter()
        .map(|b| char::from(b'!' + b % 94))
        .take(6)
        .collect();
    let registry = SymbolRegistry::new();
    let id = registry.intern(&text);
    id.scope() == classify(&text) && *registry.resolve(id).unwrap() == *text
}

#[quickcheck]
fn setter_resolves_from_reader(text: String) -> TestResult {
    if text.is_empty() || !matches!(classify(&text), Scope::Local | Scope::Constant) {
        return TestResult::discard();
    }
    let registry = SymbolRegistry::new();
    let reader = registry.intern(&text);
    let setter = match reader.with_scope(Scope::AttributeSetter) {
        Some(setter) => setter,
        None => return TestResult::failed(),
    };

    let resolved = registry.resolve(setter);
    TestResult::from_bool(
        resolved.map(|t| *t == format!("{}=", text)).unwrap_or(false)
            && registry.intern(&format!("{}=", text)) == setter,
    )
}

#[quickcheck]
fn display_is_bare_or_quoted(text: String) -> bool {
    let shown = display(&text);
    if needs_escaping(&text) {
        shown.starts_with(":\"") && shown.ends_with('"') && shown.len() >= 3
    } else {
        shown == format!(":{}", text)
    }
}
