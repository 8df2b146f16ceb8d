//! Symbol registry - the public face of the crate.
//!
//! A [`SymbolRegistry`] owns one [`SymbolTable`] with the operator tokens
//! already registered. It is the only way to obtain a table that accepts
//! dynamic names, so nothing can be interned before bootstrap.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::classify;
use crate::config::RegistryConfig;
use crate::error::{ConfigResult, SymbolResult};
use crate::escape;
use crate::symbol::tokens::{OperatorToken, OPERATOR_TOKENS};
use crate::symbol::{InternedSymbol, InternerStats, Scope, SymbolId, SymbolTable};

/// Something that names a symbol: its text or its ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameRef<'a> {
    /// Raw name text, interned or not
    Text(&'a str),
    /// An existing ID
    Id(SymbolId),
}

impl<'a> From<&'a str> for NameRef<'a> {
    fn from(text: &'a str) -> Self {
        NameRef::Text(text)
    }
}

impl<'a> From<&'a String> for NameRef<'a> {
    fn from(text: &'a String) -> Self {
        NameRef::Text(text)
    }
}

impl From<SymbolId> for NameRef<'_> {
    fn from(id: SymbolId) -> Self {
        NameRef::Id(id)
    }
}

/// Process-wide symbol registry
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
///
/// # Examples
///
/// ```
/// use rubric_sym::{Scope, SymbolRegistry};
///
/// let registry = SymbolRegistry::new();
///
/// let name = registry.intern("name");
/// let setter = registry.intern("name=");
/// assert_eq!(setter.scope(), Scope::AttributeSetter);
/// assert_eq!(setter.sequence(), name.sequence());
///
/// assert_eq!(&*registry.resolve(setter).unwrap(), "name=");
/// assert_eq!(registry.display("name="), ":name=");
/// ```
pub struct SymbolRegistry {
    table: SymbolTable,
    config: RegistryConfig,
}

impl SymbolRegistry {
    /// Validate `config`, build the table, and register the operator tokens
    pub fn init(config: RegistryConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::bootstrap(config))
    }

    /// Registry with the default configuration
    pub fn new() -> Self {
        Self::bootstrap(RegistryConfig::default())
    }

    fn bootstrap(config: RegistryConfig) -> Self {
        let table = SymbolTable::with_config(&config);
        for token in OPERATOR_TOKENS {
            table.register_reserved(*token);
        }
        table.start_sequence(config.sequence_floor);

        tracing::debug!(
            tokens = OPERATOR_TOKENS.len(),
            floor = config.sequence_floor,
            shards = config.shard_amount,
            "symbol registry ready"
        );

        Self { table, config }
    }

    /// Intern a name, returning its ID
    #[inline]
    pub fn intern(&self, text: &str) -> SymbolId {
        self.table.intern(text)
    }

    /// Find a name's ID without interning it
    #[inline]
    pub fn lookup(&self, text: &str) -> Option<SymbolId> {
        self.table.lookup(text)
    }

    /// Canonical text of an ID
    ///
    /// An uninterned setter ID resolves if its reader name exists.
    #[inline]
    pub fn resolve(&self, id: SymbolId) -> SymbolResult<Arc<str>> {
        self.table.resolve(id)
    }

    /// Full record of an ID
    #[inline]
    pub fn record(&self, id: SymbolId) -> SymbolResult<InternedSymbol> {
        self.table.record(id)
    }

    /// True if a record exists for `id` (no derivation)
    #[inline]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.table.contains(id)
    }

    /// Scope of a name or ID
    ///
    /// Text is classified without being interned; an ID reports its tag.
    ///
    /// ```
    /// use rubric_sym::{Scope, SymbolRegistry};
    ///
    /// let registry = SymbolRegistry::new();
    /// assert_eq!(registry.classify("@@count"), Scope::Class);
    ///
    /// let id = registry.intern("$stdout");
    /// assert_eq!(registry.classify(id), Scope::Global);
    /// ```
    pub fn classify<'a>(&self, name: impl Into<NameRef<'a>>) -> Scope {
        match name.into() {
            NameRef::Text(text) => classify::classify(text),
            NameRef::Id(id) => id.scope(),
        }
    }

    /// Symbol literal form of a name
    #[inline]
    pub fn display(&self, text: &str) -> String {
        escape::display(text)
    }

    /// Symbol literal form of an ID
    pub fn display_id(&self, id: SymbolId) -> SymbolResult<String> {
        self.resolve(id).map(|text| escape::display(&text))
    }

    /// Every registered ID, operators included, in no particular order
    pub fn all_symbols(&self) -> Vec<SymbolId> {
        self.table.ids()
    }

    /// Every record, sorted by ID
    pub fn records(&self) -> Vec<InternedSymbol> {
        let mut records = self.table.records();
        records.sort_unstable_by_key(InternedSymbol::id);
        records
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false once bootstrapped
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Order two symbols by their text
    ///
    /// `None` if either ID is unknown.
    pub fn compare(&self, a: SymbolId, b: SymbolId) -> Option<Ordering> {
        let a = self.resolve(a).ok()?;
        let b = self.resolve(b).ok()?;
        Some(a.cmp(&b))
    }

    /// Order two symbols by their text, ignoring ASCII case
    pub fn casecmp(&self, a: SymbolId, b: SymbolId) -> Option<Ordering> {
        let a = self.resolve(a).ok()?;
        let b = self.resolve(b).ok()?;
        let a = a.bytes().map(|c| c.to_ascii_lowercase());
        let b = b.bytes().map(|c| c.to_ascii_lowercase());
        Some(a.cmp(b))
    }

    /// Intern the uppercase form of a symbol
    pub fn upcase(&self, id: SymbolId) -> SymbolResult<SymbolId> {
        self.map_text(id, |text| text.to_uppercase())
    }

    /// Intern the lowercase form of a symbol
    pub fn downcase(&self, id: SymbolId) -> SymbolResult<SymbolId> {
        self.map_text(id, |text| text.to_lowercase())
    }

    /// Intern a symbol with its first character uppercased and the rest
    /// lowercased
    pub fn capitalize(&self, id: SymbolId) -> SymbolResult<SymbolId> {
        self.map_text(id, |text| {
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
    }

    /// Intern a symbol with the case of every character flipped
    pub fn swapcase(&self, id: SymbolId) -> SymbolResult<SymbolId> {
        self.map_text(id, |text| {
            let mut out = String::with_capacity(text.len());
            for c in text.chars() {
                if c.is_uppercase() {
                    out.extend(c.to_lowercase());
                } else if c.is_lowercase() {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
            }
            out
        })
    }

    fn map_text(&self, id: SymbolId, f: impl FnOnce(&str) -> String) -> SymbolResult<SymbolId> {
        let text = self.resolve(id)?;
        Ok(self.intern(&f(&*text)))
    }

    /// True if the symbol's text is empty
    pub fn is_empty_symbol(&self, id: SymbolId) -> SymbolResult<bool> {
        self.resolve(id).map(|text| text.is_empty())
    }

    /// The setter ID paired with a reader name
    ///
    /// Only `Local` and `Constant` names have setters. The setter record is
    /// created on demand.
    pub fn attrset_of(&self, id: SymbolId) -> Option<SymbolId> {
        match id.scope() {
            Scope::Local | Scope::Constant if self.contains(id) => {
                let setter = id.with_scope(Scope::AttributeSetter)?;
                self.resolve(setter).ok().map(|_| setter)
            }
            _ => None,
        }
    }

    /// Table statistics
    pub fn stats(&self) -> InternerStats {
        self.table.stats()
    }

    /// The bootstrap operator tokens
    pub fn operator_tokens(&self) -> &'static [OperatorToken] {
        OPERATOR_TOKENS
    }

    /// Configuration this registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(SymbolRegistry: Send, Sync);
