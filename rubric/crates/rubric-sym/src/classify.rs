//! Name classification.
//!
//! Maps any string to the [`Scope`] the parser would give it. The rules are
//! driven by the first character:
//!
//! | Shape | Scope |
//! |-------|-------|
//! | bootstrap token (`+`, `<=>`, `[]=`) | `Operator` |
//! | `$...` | `Global` |
//! | `@@ident` | `Class` |
//! | `@ident` | `Instance` |
//! | `name=` | `AttributeSetter` |
//! | `Ident` | `Constant` |
//! | `ident` | `Local` |
//! | anything else | `Junk` |
//!
//! Identifier characters are ASCII alphanumerics, `_`, and every non-ASCII
//! code point.

use crate::symbol::tokens::{self, COMPARISON_OPERATORS};
use crate::symbol::Scope;

/// True for characters allowed inside an identifier
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Classify a name
///
/// Total over all strings: the empty string is `Local`, and text that is not
/// an identifier of any kind is `Junk`.
///
/// # Examples
///
/// ```
/// use rubric_sym::classify::classify;
/// use rubric_sym::Scope;
///
/// assert_eq!(classify("foo"), Scope::Local);
/// assert_eq!(classify("Foo"), Scope::Constant);
/// assert_eq!(classify("@foo"), Scope::Instance);
/// assert_eq!(classify("@@foo"), Scope::Class);
/// assert_eq!(classify("$foo"), Scope::Global);
/// assert_eq!(classify("foo="), Scope::AttributeSetter);
/// assert_eq!(classify("foo bar"), Scope::Junk);
/// ```
pub fn classify(text: &str) -> Scope {
    match text.as_bytes().first() {
        Some(b'$') => Scope::Global,
        Some(b'@') => classify_variable(&text[1..]),
        _ if is_setter_shape(text) => classify_setter(text),
        _ => classify_word(text),
    }
}

/// `@ivar` / `@@cvar`, given the text after the first `@`
fn classify_variable(rest: &str) -> Scope {
    match rest.strip_prefix('@') {
        Some(name) => scan(name, Scope::Class),
        None => scan(rest, Scope::Instance),
    }
}

/// Ends in `=`, has something before it, and is not a comparison
#[inline]
fn is_setter_shape(text: &str) -> bool {
    text.len() > 1 && text.ends_with('=') && !COMPARISON_OPERATORS.contains(&text)
}

/// Classify a name without applying the setter rule
fn classify_word(text: &str) -> Scope {
    if tokens::find(text).is_some() {
        return Scope::Operator;
    }
    match text.chars().next() {
        Some(c) if c.is_uppercase() => scan(text, Scope::Constant),
        _ => scan(text, Scope::Local),
    }
}

/// Classify `prefix=` from the scope of `prefix`
///
/// The prefix may itself end in `=`, so the trailing `=` run is walked from
/// the shortest prefix outward instead of recursing once per `=`.
fn classify_setter(text: &str) -> Scope {
    let stem = text.trim_end_matches('=').len().max(1);
    let mut scope = classify_word(&text[..stem]);

    for end in stem + 1..=text.len() {
        let candidate = &text[..end];
        scope = if tokens::find(candidate).is_some() {
            Scope::Operator
        } else if is_setter_shape(candidate) {
            match scope {
                // A setter of a setter, or of an operator, is not a name.
                Scope::AttributeSetter | Scope::Operator => Scope::Junk,
                _ => Scope::AttributeSetter,
            }
        } else {
            classify_word(candidate)
        };
    }
    scope
}

/// Accept `scope` if `rest` is an identifier tail, otherwise `Junk`
///
/// A leading digit is never accepted; an empty tail is.
fn scan(rest: &str, scope: Scope) -> Scope {
    match rest.chars().next() {
        None => scope,
        Some(c) if c.is_ascii_digit() => Scope::Junk,
        Some(_) if rest.chars().all(is_ident_char) => scope,
        Some(_) => Scope::Junk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(classify("foo"), Scope::Local);
        assert_eq!(classify("_foo"), Scope::Local);
        assert_eq!(classify("foo_bar_123"), Scope::Local);
        assert_eq!(classify("Foo"), Scope::Constant);
        assert_eq!(classify("FOO_BAR"), Scope::Constant);
        assert_eq!(classify("@foo"), Scope::Instance);
        assert_eq!(classify("@@foo"), Scope::Class);
        assert_eq!(classify("$foo"), Scope::Global);
    }

    #[test]
    fn test_globals_are_not_scanned() {
        assert_eq!(classify("$"), Scope::Global);
        assert_eq!(classify("$;"), Scope::Global);
        assert_eq!(classify("$1"), Scope::Global);
        assert_eq!(classify("$foo bar"), Scope::Global);
    }

    #[test]
    fn test_variables_scan_their_tail() {
        assert_eq!(classify("@"), Scope::Instance);
        assert_eq!(classify("@@"), Scope::Class);
        assert_eq!(classify("@1x"), Scope::Junk);
        assert_eq!(classify("@@1x"), Scope::Junk);
        assert_eq!(classify("@foo?"), Scope::Junk);
        assert_eq!(classify("@foo="), Scope::Junk);
        assert_eq!(classify("@@@foo"), Scope::Junk);
    }

    #[test]
    fn test_setters() {
        assert_eq!(classify("foo="), Scope::AttributeSetter);
        assert_eq!(classify("Foo="), Scope::AttributeSetter);
        assert_eq!(classify("foo?="), Scope::AttributeSetter);
        assert_eq!(classify("foo=="), Scope::Junk);
        assert_eq!(classify("foo==="), Scope::AttributeSetter);
        assert_eq!(classify("+="), Scope::Junk);
        assert_eq!(classify("<=>="), Scope::Junk);
    }

    #[test]
    fn test_operators() {
        for spelling in ["+", "-", "**", "<=>", "==", "===", "!=", "[]", "[]=", "+@", "::"] {
            assert_eq!(classify(spelling), Scope::Operator, "{}", spelling);
        }
    }

    #[test]
    fn test_junk() {
        assert_eq!(classify("="), Scope::Junk);
        assert_eq!(classify("1foo"), Scope::Junk);
        assert_eq!(classify("foo bar"), Scope::Junk);
        assert_eq!(classify("foo?"), Scope::Junk);
        assert_eq!(classify("foo!"), Scope::Junk);
        assert_eq!(classify("a-b"), Scope::Junk);
    }

    #[test]
    fn test_empty_is_local() {
        assert_eq!(classify(""), Scope::Local);
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(classify("naïve"), Scope::Local);
        assert_eq!(classify("日本"), Scope::Local);
        assert_eq!(classify("Ωmega"), Scope::Constant);
        assert_eq!(classify("@変数"), Scope::Instance);
        assert_eq!(classify("🦀="), Scope::AttributeSetter);
    }

    #[test]
    fn test_long_equals_run_uses_constant_stack() {
        let text = format!("a{}", "=".repeat(100_000));
        // Even run length after a local stem alternates back to Junk.
        assert_eq!(classify(&text), Scope::Junk);
        let text = format!("a{}", "=".repeat(100_001));
        assert_eq!(classify(&text), Scope::AttributeSetter);
    }
}
