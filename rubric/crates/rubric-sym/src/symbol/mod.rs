//! Symbol module - tagged symbol IDs and the records they name.
//!
//! A [`SymbolId`] is a compact (8-byte) handle to an interned name. Besides
//! identifying the name, the low bits of every dynamic ID carry the name's
//! lexical [`Scope`], so the parser and VM can ask "is this a constant?"
//! without touching the table.
//!
//! # ID Layout
//!
//! ```text
//! Dynamic ID (u64):
//! ┌───────────────────────────────────────────┬───────┐
//! │              sequence number              │  tag  │
//! │                 (61 bits)                 │ 3 bit │
//! └───────────────────────────────────────────┴───────┘
//!
//! Operator ID (u64):
//! ┌───────────────────────────────────────────────────┐
//! │        reserved token value  (< 1000)             │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! The sequence counter starts above every reserved token value, so the two
//! ranges never meet. An attribute setter (`foo=`) reuses the sequence number
//! of its reader (`foo`) and only differs in the tag.
//!
//! # Performance Characteristics
//!
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `SymbolTable::intern()` (hit) | O(n) | Hash + equality over the text |
//! | `SymbolTable::intern()` (miss) | O(n) | Classification + two inserts |
//! | `SymbolId` comparison | O(1) | Integer comparison only |
//! | `SymbolId::scope()` | O(1) | Reads the tag bits |
//! | `SymbolTable::resolve()` | O(1) | Sharded hash lookup by ID |

pub mod interner;
pub mod tokens;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

pub use interner::SymbolTable;
pub use tokens::{OperatorToken, OPERATOR_TOKENS};

/// Number of low bits holding the scope tag
pub const SCOPE_SHIFT: u32 = 3;

/// Mask selecting the scope tag of a dynamic ID
pub const SCOPE_MASK: u64 = (1 << SCOPE_SHIFT) - 1;

/// Largest sequence number that fits above the tag bits
pub const MAX_SEQUENCE: u64 = u64::MAX >> SCOPE_SHIFT;

/// Upper bound (exclusive) of the reserved operator ID range
pub const RESERVED_ID_LIMIT: u64 = 1000;

/// Lexical category of a name
///
/// Every interned name gets exactly one scope, computed once when the name is
/// first interned and recorded in the ID's tag bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// `foo`, `_bar`
    Local,
    /// `@foo`
    Instance,
    /// `$foo`, `$;`, `$1`
    Global,
    /// `foo=`, derived from a reader name
    AttributeSetter,
    /// `Foo`
    Constant,
    /// `@@foo`
    Class,
    /// Anything that is not a valid identifier
    Junk,
    /// A bootstrap operator token such as `+` or `<=>`
    Operator,
}

impl Scope {
    /// All scopes, in tag order with `Operator` last
    pub const ALL: [Scope; 8] = [
        Scope::Local,
        Scope::Instance,
        Scope::Global,
        Scope::AttributeSetter,
        Scope::Constant,
        Scope::Class,
        Scope::Junk,
        Scope::Operator,
    ];

    /// Tag bits stored in a dynamic ID, `None` for operators
    ///
    /// Tag `2` is intentionally unassigned.
    pub const fn tag(self) -> Option<u64> {
        match self {
            Scope::Local => Some(0),
            Scope::Instance => Some(1),
            Scope::Global => Some(3),
            Scope::AttributeSetter => Some(4),
            Scope::Constant => Some(5),
            Scope::Class => Some(6),
            Scope::Junk => Some(7),
            Scope::Operator => None,
        }
    }

    /// Decode tag bits back into a scope
    pub const fn from_tag(tag: u64) -> Option<Scope> {
        match tag {
            0 => Some(Scope::Local),
            1 => Some(Scope::Instance),
            3 => Some(Scope::Global),
            4 => Some(Scope::AttributeSetter),
            5 => Some(Scope::Constant),
            6 => Some(Scope::Class),
            7 => Some(Scope::Junk),
            _ => None,
        }
    }

    /// Lowercase name used in logs and CLI output
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Instance => "instance",
            Scope::Global => "global",
            Scope::AttributeSetter => "attrset",
            Scope::Constant => "constant",
            Scope::Class => "class",
            Scope::Junk => "junk",
            Scope::Operator => "operator",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SymbolId - the integer handle of an interned name
///
/// IDs are plain integers: copying, hashing and comparing them never touches
/// the table. An ID obtained from [`SymbolId::from_raw`] may name nothing, in
/// which case resolving it yields [`SymbolError::NotFound`].
///
/// # Examples
///
/// ```
/// use rubric_sym::{Scope, SymbolRegistry};
///
/// let registry = SymbolRegistry::new();
/// let id = registry.intern("Comparable");
///
/// assert_eq!(id.scope(), Scope::Constant);
/// assert!(!id.is_operator());
/// ```
///
/// [`SymbolError::NotFound`]: crate::error::SymbolError::NotFound
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u64);

impl SymbolId {
    /// Build a dynamic ID from a sequence number and tag bits
    #[inline]
    pub(crate) const fn from_parts(sequence: u64, tag: u64) -> Self {
        Self((sequence << SCOPE_SHIFT) | (tag & SCOPE_MASK))
    }

    /// Build the ID of a reserved operator token
    #[inline]
    pub(crate) const fn reserved(raw: u64) -> Self {
        Self(raw)
    }

    /// Rebuild an ID from its raw integer form
    ///
    /// Used by hosts that store IDs outside the registry (bytecode operands,
    /// inline caches). The result is not checked against any table.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw integer form of this ID
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// True for IDs in the reserved operator range
    #[inline]
    pub const fn is_operator(self) -> bool {
        self.0 < RESERVED_ID_LIMIT
    }

    /// Sequence number of a dynamic ID (`0` for operators)
    #[inline]
    pub const fn sequence(self) -> u64 {
        if self.is_operator() {
            0
        } else {
            self.0 >> SCOPE_SHIFT
        }
    }

    /// Scope encoded in this ID
    ///
    /// The unassigned tag value decodes as [`Scope::Junk`].
    #[inline]
    pub const fn scope(self) -> Scope {
        if self.is_operator() {
            return Scope::Operator;
        }
        match Scope::from_tag(self.0 & SCOPE_MASK) {
            Some(scope) => scope,
            None => Scope::Junk,
        }
    }

    /// Same sequence number, different tag
    ///
    /// Returns `None` for operator IDs and for [`Scope::Operator`], which have
    /// no tag bits to swap.
    #[inline]
    pub const fn with_scope(self, scope: Scope) -> Option<Self> {
        if self.is_operator() {
            return None;
        }
        match scope.tag() {
            Some(tag) => Some(Self::from_parts(self.0 >> SCOPE_SHIFT, tag)),
            None => None,
        }
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_operator() {
            match tokens::find_by_id(*self) {
                Some(token) => write!(f, "SymbolId(op {} {:?})", self.0, token.text()),
                None => write!(f, "SymbolId(op {})", self.0),
            }
        } else {
            write!(f, "SymbolId({}:{})", self.sequence(), self.scope())
        }
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// InternedSymbol - the canonical record behind an ID
///
/// Records are created once and never change. The text is shared, so cloning
/// a record only bumps a reference count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InternedSymbol {
    id: SymbolId,
    text: Arc<str>,
}

impl InternedSymbol {
    pub(crate) fn new(id: SymbolId, text: Arc<str>) -> Self {
        Self { id, text }
    }

    /// The record's ID
    #[inline]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// The record's canonical text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the canonical text
    #[inline]
    pub fn text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// The scope encoded in the record's ID
    #[inline]
    pub fn scope(&self) -> Scope {
        self.id.scope()
    }
}

/// Statistics about the symbol table for profiling
///
/// # Fields
///
/// * `count` - Number of records, bootstrap tokens included
/// * `capacity` - Content map capacity
/// * `hits` - Interning calls answered by an existing record
/// * `misses` - Interning calls that had to classify the text
/// * `races` - Misses that lost the insert to another thread
/// * `derived` - Setter records synthesized while resolving
/// * `by_scope` - Record count per scope, in [`Scope::ALL`] order
///
/// # Examples
///
/// ```
/// use rubric_sym::SymbolRegistry;
///
/// let registry = SymbolRegistry::new();
/// registry.intern("puts");
/// registry.intern("puts");
///
/// let stats = registry.stats();
/// assert!(stats.hits >= 1);
/// println!("Hit rate: {:.2}%", stats.hit_rate() * 100.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InternerStats {
    /// Number of records
    pub count: usize,
    /// Content map capacity
    pub capacity: usize,
    /// Number of cache hits (text already interned)
    pub hits: usize,
    /// Number of cache misses (new record attempted)
    pub misses: usize,
    /// Number of inserts lost to a concurrent writer
    pub races: usize,
    /// Number of setter records created by derivation
    pub derived: usize,
    /// Record count per scope
    pub by_scope: IndexMap<Scope, usize>,
}

impl InternerStats {
    /// Calculate the load factor (count / capacity)
    ///
    /// Returns 0.0 if capacity is 0.
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.count as f64 / self.capacity as f64
        }
    }

    /// Calculate the hit rate (hits / (hits + misses))
    ///
    /// Returns 0.0 if no lookups have been performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubric_sym::InternerStats;
    ///
    /// let stats = InternerStats { hits: 90, misses: 10, ..Default::default() };
    /// assert_eq!(stats.hit_rate(), 0.9);
    /// ```
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_operations();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get total number of interning operations
    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }

    /// Record count for one scope
    pub fn scope_count(&self, scope: Scope) -> usize {
        self.by_scope.get(&scope).copied().unwrap_or(0)
    }
}

// Handles and records cross threads freely
static_assertions::assert_impl_all!(SymbolId: Send, Sync, Copy);
static_assertions::assert_impl_all!(InternedSymbol: Send, Sync);
static_assertions::assert_eq_size!(SymbolId, u64);
