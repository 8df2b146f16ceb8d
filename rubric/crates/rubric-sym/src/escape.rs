//! Symbol literal printing.
//!
//! Decides whether a symbol's text can be written bare after the `:` sigil
//! (`:foo`, `:+`, `:$0`) or has to be quoted (`:"foo bar"`), and produces the
//! literal form.
//!
//! The bare forms accepted here are exactly the ones the parser reads back
//! as a single symbol literal:
//!
//! - identifiers, with `!`/`?`/`=` allowed after a non-constant name
//! - `@ivar`, `@@cvar`, `$global` and the special globals (`$0`, `$;`, `$-w`, `$12`)
//! - the operator method names (`<=>`, `[]=`, `+@`, `!~` ...)

use std::fmt::{self, Write};
use std::str::Chars;

use crate::classify::is_ident_char;

/// True if `c` can appear unescaped in a symbol literal
#[inline]
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~') || (!c.is_ascii() && !c.is_control())
}

/// True if `text` must be quoted to read back as the same symbol
///
/// # Examples
///
/// ```
/// use rubric_sym::escape::needs_escaping;
///
/// assert!(!needs_escaping("foo?"));
/// assert!(!needs_escaping("<=>"));
/// assert!(!needs_escaping("$;"));
/// assert!(needs_escaping("foo bar"));
/// assert!(needs_escaping(""));
/// ```
pub fn needs_escaping(text: &str) -> bool {
    if text.is_empty() || !text.chars().all(is_printable) {
        return true;
    }

    let mut scanner = Scanner::new(text);
    let bare = match scanner.peek() {
        Some('$') => {
            scanner.bump();
            if is_special_global(scanner.rest()) {
                return false;
            }
            scanner.identifier(false)
        }
        Some('@') => {
            scanner.bump();
            scanner.eat('@');
            scanner.identifier(false)
        }
        Some('<') => {
            scanner.bump();
            // `<`, `<<`, `<=`, `<=>`
            if !scanner.eat('<') && scanner.eat('=') {
                scanner.eat('>');
            }
            true
        }
        Some('>') => {
            scanner.bump();
            let _ = scanner.eat('>') || scanner.eat('=');
            true
        }
        Some('=') => {
            scanner.bump();
            // `=~`, `==`, `===`; a lone `=` is not an operator
            if scanner.eat('~') {
                true
            } else if scanner.eat('=') {
                scanner.eat('=');
                true
            } else {
                false
            }
        }
        Some('*') => {
            scanner.bump();
            scanner.eat('*');
            true
        }
        Some('+' | '-') => {
            scanner.bump();
            scanner.eat('@');
            true
        }
        Some('|' | '^' | '&' | '/' | '%' | '~' | '`') => {
            scanner.bump();
            true
        }
        Some('[') => {
            scanner.bump();
            if scanner.eat(']') {
                scanner.eat('=');
                true
            } else {
                false
            }
        }
        Some('!') => {
            scanner.bump();
            scanner.is_done() || scanner.eat('=') || scanner.eat('~')
        }
        Some(first) => scanner.identifier(!first.is_ascii_uppercase()),
        None => false,
    };

    !(bare && scanner.is_done())
}

/// Special global names after the `$`: `$~`, `$-w`, `$0`, `$12`
fn is_special_global(rest: &str) -> bool {
    let mut scanner = Scanner::new(rest);
    match scanner.bump() {
        Some(
            '~' | '*' | '$' | '?' | '!' | '@' | '/' | '\\' | ';' | ',' | '.' | '=' | ':' | '<'
            | '>' | '"' | '&' | '`' | '\'' | '+' | '0',
        ) => {}
        Some('-') => {
            scanner.eat_if(is_ident_char);
        }
        Some(c) if c.is_ascii_digit() => {
            scanner.eat_while(|c| c.is_ascii_digit());
        }
        _ => return false,
    }
    scanner.is_done()
}

/// Literal form of a symbol: `:` followed by the bare or quoted text
///
/// # Examples
///
/// ```
/// use rubric_sym::escape::display;
///
/// assert_eq!(display("foo"), ":foo");
/// assert_eq!(display("foo bar"), ":\"foo bar\"");
/// assert_eq!(display("+"), ":+");
/// assert_eq!(display(""), ":\"\"");
/// ```
pub fn display(text: &str) -> String {
    SymbolLiteral(text).to_string()
}

/// Quote `text` as a double-quoted string literal
///
/// ```
/// use rubric_sym::escape::quote;
///
/// assert_eq!(quote("a\"b"), r#""a\"b""#);
/// assert_eq!(quote("#{x}"), r#""\#{x}""#);
/// assert_eq!(quote("tab\t"), r#""tab\t""#);
/// ```
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    // Writing into a String cannot fail.
    let _ = write_quoted(&mut out, text);
    out
}

/// `Display` adapter producing the literal form of a symbol
///
/// Writes straight into the formatter, so it can be used in `format!` and
/// `write!` without an intermediate `String`.
#[derive(Clone, Copy, Debug)]
pub struct SymbolLiteral<'a>(pub &'a str);

impl fmt::Display for SymbolLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(':')?;
        if needs_escaping(self.0) {
            write_quoted(f, self.0)
        } else {
            f.write_str(self.0)
        }
    }
}

fn write_quoted<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.write_str("\\#")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\x0C' => out.write_str("\\f")?,
            '\x0B' => out.write_str("\\v")?,
            '\x08' => out.write_str("\\b")?,
            '\x07' => out.write_str("\\a")?,
            '\x1B' => out.write_str("\\e")?,
            c if is_printable(c) => out.write_char(c)?,
            // Only C0/C1 controls reach here, all below U+0100.
            c => write!(out, "\\u{:04X}", c as u32)?,
        }
    }

    out.write_char('"')
}

/// Forward-only character scanner over a symbol's text
struct Scanner<'a> {
    chars: Chars<'a>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Unconsumed text
    #[inline]
    fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Consume `expected` if it is next
    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        self.eat_if(|c| c == expected)
    }

    fn eat_if(&mut self, pred: impl FnOnce(char) -> bool) -> bool {
        let hit = self.peek().is_some_and(pred);
        if hit {
            self.bump();
        }
        hit
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.eat_if(&mut pred) {}
    }

    /// Identifier: a non-digit start, identifier characters, and for local
    /// names one optional `!`, `?` or `=`
    fn identifier(&mut self, local: bool) -> bool {
        let starts = self.eat_if(|c| c == '_' || c.is_ascii_alphabetic() || !c.is_ascii());
        if !starts {
            return false;
        }
        self.eat_while(is_ident_char);
        if local {
            self.eat_if(|c| matches!(c, '!' | '?' | '='));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(text: &str) -> bool {
        !needs_escaping(text)
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(display("foo"), ":foo");
        assert_eq!(display("foo bar"), ":\"foo bar\"");
        assert_eq!(display("+"), ":+");
        assert_eq!(display(""), ":\"\"");
    }

    #[test]
    fn test_identifiers() {
        assert!(bare("foo"));
        assert!(bare("_"));
        assert!(bare("Foo"));
        assert!(bare("foo?"));
        assert!(bare("foo!"));
        assert!(bare("foo="));
        assert!(bare("naïve"));
        assert!(bare("日本語"));

        assert!(!bare("Foo?"));
        assert!(!bare("Foo="));
        assert!(!bare("foo?!"));
        assert!(!bare("foo=="));
        assert!(!bare("1foo"));
        assert!(!bare("foo-bar"));
    }

    #[test]
    fn test_variables() {
        assert!(bare("@foo"));
        assert!(bare("@@foo"));
        assert!(bare("$foo"));

        assert!(!bare("@"));
        assert!(!bare("@@"));
        assert!(!bare("@1"));
        assert!(!bare("@foo?"));
        assert!(!bare("@@@foo"));
        assert!(!bare("$"));
        assert!(!bare("$foo="));
    }

    #[test]
    fn test_special_globals() {
        for name in ["$~", "$*", "$$", "$?", "$!", "$@", "$/", "$\\", "$;", "$,", "$.",
                     "$=", "$:", "$<", "$>", "$\"", "$&", "$`", "$'", "$+", "$0"] {
            assert!(bare(name), "{}", name);
        }
        assert!(bare("$-"));
        assert!(bare("$-w"));
        assert!(bare("$1"));
        assert!(bare("$123"));

        assert!(!bare("$-ww"));
        assert!(!bare("$01"));
        assert!(!bare("$1a"));
        assert!(!bare("$%"));
    }

    #[test]
    fn test_operators() {
        for op in ["<", "<<", "<=", "<=>", ">", ">>", ">=", "=~", "==", "===", "*", "**",
                   "+", "-", "+@", "-@", "|", "^", "&", "/", "%", "~", "`", "[]", "[]=",
                   "!", "!=", "!~"] {
            assert!(bare(op), "{}", op);
        }
    }

    #[test]
    fn test_non_operators() {
        for text in ["=", "=>", "<<=", "<=>=", ">>>", "====", "***", "+@@", "[", "[=",
                     "[]]", "!!", "!=~", "&&", "||", "::", "..", "..."] {
            assert!(needs_escaping(text), "{}", text);
        }
    }

    #[test]
    fn test_non_printable() {
        assert!(needs_escaping("foo\n"));
        assert!(needs_escaping("\0"));
        assert!(needs_escaping("a\u{7f}"));
        assert!(needs_escaping("\u{85}"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("#foo"), "\"#foo\"");
        assert_eq!(quote("#$x #@y"), "\"\\#$x \\#@y\"");
        assert_eq!(quote("\r\n\x0C\x0B\x08\x07\x1B"), "\"\\r\\n\\f\\v\\b\\a\\e\"");
        assert_eq!(quote("\0"), "\"\\u0000\"");
        assert_eq!(quote("\u{7f}"), "\"\\u007F\"");
        assert_eq!(quote("日本"), "\"日本\"");
    }

    #[test]
    fn test_quote_c1_control() {
        assert_eq!(quote("\u{9f}"), "\"\\u009F\"");
        assert_eq!(quote("🦀"), "\"🦀\"");
    }

    #[test]
    fn test_symbol_literal_formats_in_place() {
        assert_eq!(format!("{}", SymbolLiteral("@x")), ":@x");
        assert_eq!(format!("[{}]", SymbolLiteral("a b")), "[:\"a b\"]");
    }
}
