//! Bootstrap operator tokens.
//!
//! These names are registered with fixed IDs before any dynamic interning so
//! that the parser can refer to them as constants. Single-character operators
//! use their ASCII code; multi-character operators use the parser's token
//! numbers. Every value is below [`RESERVED_ID_LIMIT`].

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::{SymbolId, RESERVED_ID_LIMIT};

/// A name pre-registered with a reserved ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperatorToken {
    text: &'static str,
    id: SymbolId,
}

impl OperatorToken {
    const fn new(text: &'static str, raw: u64) -> Self {
        Self {
            text,
            id: SymbolId::reserved(raw),
        }
    }

    /// Canonical spelling
    #[inline]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Reserved ID
    #[inline]
    pub const fn id(&self) -> SymbolId {
        self.id
    }
}

// ----------------------------------------------------------------------------
// Single-character operators
// ----------------------------------------------------------------------------

/// Binary `+`
pub const TOK_PLUS: OperatorToken = OperatorToken::new("+", b'+' as u64);
/// Binary `-`
pub const TOK_MINUS: OperatorToken = OperatorToken::new("-", b'-' as u64);
/// `*`
pub const TOK_MUL: OperatorToken = OperatorToken::new("*", b'*' as u64);
/// `/`
pub const TOK_DIV: OperatorToken = OperatorToken::new("/", b'/' as u64);
/// `%`
pub const TOK_MOD: OperatorToken = OperatorToken::new("%", b'%' as u64);
/// `|`
pub const TOK_OR: OperatorToken = OperatorToken::new("|", b'|' as u64);
/// `^`
pub const TOK_XOR: OperatorToken = OperatorToken::new("^", b'^' as u64);
/// `&`
pub const TOK_AND: OperatorToken = OperatorToken::new("&", b'&' as u64);
/// `!`
pub const TOK_NOT: OperatorToken = OperatorToken::new("!", b'!' as u64);
/// `>`
pub const TOK_GT: OperatorToken = OperatorToken::new(">", b'>' as u64);
/// `<`
pub const TOK_LT: OperatorToken = OperatorToken::new("<", b'<' as u64);
/// `~`
pub const TOK_TILDE: OperatorToken = OperatorToken::new("~", b'~' as u64);
/// `` ` ``
pub const TOK_BACKTICK: OperatorToken = OperatorToken::new("`", b'`' as u64);

// ----------------------------------------------------------------------------
// Multi-character operators
// ----------------------------------------------------------------------------

/// Unary `+@`
pub const TOK_UPLUS: OperatorToken = OperatorToken::new("+@", 321);
/// Unary `-@`
pub const TOK_UMINUS: OperatorToken = OperatorToken::new("-@", 322);
/// `**`
pub const TOK_POW: OperatorToken = OperatorToken::new("**", 323);
/// `<=>`
pub const TOK_CMP: OperatorToken = OperatorToken::new("<=>", 324);
/// `==`
pub const TOK_EQ: OperatorToken = OperatorToken::new("==", 325);
/// `===`
pub const TOK_EQQ: OperatorToken = OperatorToken::new("===", 326);
/// `!=`
pub const TOK_NEQ: OperatorToken = OperatorToken::new("!=", 327);
/// `>=`
pub const TOK_GEQ: OperatorToken = OperatorToken::new(">=", 328);
/// `<=`
pub const TOK_LEQ: OperatorToken = OperatorToken::new("<=", 329);
/// `=~`
pub const TOK_MATCH: OperatorToken = OperatorToken::new("=~", 330);
/// `!~`
pub const TOK_NMATCH: OperatorToken = OperatorToken::new("!~", 331);
/// `..`
pub const TOK_DOT2: OperatorToken = OperatorToken::new("..", 332);
/// `...`
pub const TOK_DOT3: OperatorToken = OperatorToken::new("...", 333);
/// `[]`
pub const TOK_AREF: OperatorToken = OperatorToken::new("[]", 334);
/// `[]=`
pub const TOK_ASET: OperatorToken = OperatorToken::new("[]=", 335);
/// `<<`
pub const TOK_LSHIFT: OperatorToken = OperatorToken::new("<<", 336);
/// `>>`
pub const TOK_RSHIFT: OperatorToken = OperatorToken::new(">>", 337);
/// `::`
pub const TOK_COLON2: OperatorToken = OperatorToken::new("::", 338);

/// Every bootstrap token, in registration order
pub const OPERATOR_TOKENS: &[OperatorToken] = &[
    TOK_PLUS, TOK_MINUS, TOK_MUL, TOK_DIV, TOK_MOD, TOK_OR, TOK_XOR, TOK_AND,
    TOK_NOT, TOK_GT, TOK_LT, TOK_TILDE, TOK_BACKTICK,
    TOK_UPLUS, TOK_UMINUS, TOK_POW, TOK_CMP, TOK_EQ, TOK_EQQ, TOK_NEQ,
    TOK_GEQ, TOK_LEQ, TOK_MATCH, TOK_NMATCH, TOK_DOT2, TOK_DOT3, TOK_AREF,
    TOK_ASET, TOK_LSHIFT, TOK_RSHIFT, TOK_COLON2,
];

/// Comparison spellings that end in `=` but never name a setter
pub const COMPARISON_OPERATORS: [&str; 5] = ["==", "===", "!=", "<=", ">="];

/// Highest reserved ID in [`OPERATOR_TOKENS`]
pub const MAX_RESERVED_ID: u64 = max_reserved_id(OPERATOR_TOKENS);

const fn max_reserved_id(tokens: &[OperatorToken]) -> u64 {
    let mut max = 0;
    let mut i = 0;
    while i < tokens.len() {
        let raw = tokens[i].id.as_u64();
        if raw > max {
            max = raw;
        }
        i += 1;
    }
    max
}

static_assertions::const_assert!(MAX_RESERVED_ID < RESERVED_ID_LIMIT);

static TOKEN_INDEX: LazyLock<FxHashMap<&'static str, OperatorToken>> = LazyLock::new(|| {
    OPERATOR_TOKENS
        .iter()
        .map(|token| (token.text, *token))
        .collect()
});

/// Find the bootstrap token spelled exactly `text`
#[inline]
pub fn find(text: &str) -> Option<OperatorToken> {
    // Longest spelling is three bytes.
    if text.is_empty() || text.len() > 3 {
        return None;
    }
    TOKEN_INDEX.get(text).copied()
}

/// Find the bootstrap token with the given ID
pub fn find_by_id(id: SymbolId) -> Option<OperatorToken> {
    OPERATOR_TOKENS.iter().copied().find(|token| token.id == id)
}
