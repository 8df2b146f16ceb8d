//! Symbol table implementation using DashMap for concurrent access.
//!
//! The table holds two inverse maps:
//! - content → ID, keyed by the full text so lookups compare hash and bytes
//! - ID → [`InternedSymbol`], for resolution
//!
//! # Performance Characteristics
//!
//! - **Interning (hit)**: O(1) - one shard read lock
//! - **Interning (miss)**: O(1) - classification + two inserts
//! - **Resolution**: O(1) - one shard read lock, plus one intern for a
//!   derived setter
//!
//! # Thread Safety
//!
//! `SymbolTable` is `Send + Sync`. A miss inserts through the content map's
//! entry API and fills the ID map while that entry is still held, so any
//! thread that sees the content mapping also sees the record. The ID map is
//! never locked while a content shard is being acquired.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use indexmap::IndexMap;

use super::tokens::{self, OperatorToken};
use super::{InternedSymbol, InternerStats, Scope, SymbolId, MAX_SEQUENCE, SCOPE_MASK};
use crate::classify::classify;
use crate::config::RegistryConfig;
use crate::error::{SymbolError, SymbolResult};

/// Thread-safe, append-only symbol table
///
/// Records are never removed. Text is stored once as an `Arc<str>` shared by
/// both directions.
pub struct SymbolTable {
    /// Content → ID
    by_text: DashMap<Arc<str>, SymbolId, RandomState>,

    /// ID → record
    by_id: DashMap<SymbolId, InternedSymbol, RandomState>,

    /// Last sequence number handed out
    last_seq: AtomicU64,

    /// Counters are only touched when enabled
    stats_enabled: bool,

    /// Intern calls answered from the table
    hits: AtomicUsize,

    /// Intern calls that had to classify
    misses: AtomicUsize,

    /// Misses that lost the insert to another thread
    races: AtomicUsize,

    /// Setter records created by resolution
    derived: AtomicUsize,
}

impl SymbolTable {
    /// Create an empty table sized from `config`
    ///
    /// The sequence counter starts at zero; call [`start_sequence`] after
    /// registering reserved tokens.
    ///
    /// [`start_sequence`]: SymbolTable::start_sequence
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            by_text: sharded_map(config),
            by_id: sharded_map(config),
            last_seq: AtomicU64::new(0),
            stats_enabled: config.stats_enabled,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            races: AtomicUsize::new(0),
            derived: AtomicUsize::new(0),
        }
    }

    /// Register an operator token under its reserved ID
    ///
    /// Bypasses classification. Registering the same token twice is a no-op.
    pub fn register_reserved(&self, token: OperatorToken) {
        if let Entry::Vacant(entry) = self.by_text.entry(Arc::from(token.text())) {
            let text = Arc::clone(entry.key());
            self.by_id
                .insert(token.id(), InternedSymbol::new(token.id(), text));
            entry.insert(token.id());
        }
    }

    /// Set the last-used sequence number
    ///
    /// The next dynamic symbol gets `floor + 1`.
    pub fn start_sequence(&self, floor: u64) {
        self.last_seq.store(floor, Ordering::Release);
    }

    /// Find the ID of `text` without interning it
    #[inline]
    pub fn lookup(&self, text: &str) -> Option<SymbolId> {
        self.by_text.get(text).map(|entry| *entry.value())
    }

    /// Intern a name, returning its ID
    ///
    /// Idempotent: equal text always yields the same ID. A setter name
    /// (`foo=`) interns its base first and shares the base's sequence number.
    pub fn intern(&self, text: &str) -> SymbolId {
        if let Some(id) = self.lookup(text) {
            self.count(&self.hits);
            return id;
        }
        self.count(&self.misses);

        // Everything that can recurse into the table happens before the
        // entry lock below is taken.
        let id = match classify(text) {
            Scope::AttributeSetter => {
                let base = self.intern(&text[..text.len() - 1]);
                base.with_scope(Scope::AttributeSetter)
                    .unwrap_or_else(|| self.fresh(Scope::Junk))
            }
            Scope::Operator => tokens::find(text)
                .map_or_else(|| self.fresh(Scope::Junk), |token| token.id()),
            scope => self.fresh(scope),
        };

        self.insert(text, id)
    }

    /// Look up the record for an ID without deriving anything
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<InternedSymbol> {
        self.by_id.get(&id).map(|entry| entry.value().clone())
    }

    /// True if a record exists for `id`
    #[inline]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Resolve an ID to its record
    ///
    /// A setter ID without a record is derived from a `Local` or `Constant`
    /// base with the same sequence number: `base + "="` is interned and its
    /// record returned.
    pub fn record(&self, id: SymbolId) -> SymbolResult<InternedSymbol> {
        if let Some(record) = self.get(id) {
            return Ok(record);
        }
        self.derive_setter(id)
            .ok_or(SymbolError::NotFound { id: id.as_u64() })
    }

    /// Resolve an ID to its canonical text
    pub fn resolve(&self, id: SymbolId) -> SymbolResult<Arc<str>> {
        self.record(id).map(|record| record.text_arc())
    }

    fn derive_setter(&self, id: SymbolId) -> Option<InternedSymbol> {
        if id.scope() != Scope::AttributeSetter {
            return None;
        }

        let base = [Scope::Local, Scope::Constant]
            .into_iter()
            .filter_map(|scope| id.with_scope(scope))
            .find_map(|candidate| self.get(candidate))?;

        let mut text = String::with_capacity(base.text().len() + 1);
        text.push_str(base.text());
        text.push('=');

        let derived = self.intern(&text);
        if derived != id {
            return None;
        }

        self.count(&self.derived);
        tracing::trace!(?id, base = base.text(), "derived setter");
        self.get(id)
    }

    /// Snapshot of every ID, in no particular order
    pub fn ids(&self) -> Vec<SymbolId> {
        self.by_id.iter().map(|entry| *entry.key()).collect()
    }

    /// Snapshot of every record, in no particular order
    pub fn records(&self) -> Vec<InternedSymbol> {
        self.by_id.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if nothing has been registered yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Get statistics about the table for profiling
    ///
    /// Counters read zero when stats are disabled. The scope histogram is
    /// always computed.
    pub fn stats(&self) -> InternerStats {
        let mut by_scope: IndexMap<Scope, usize> =
            Scope::ALL.iter().map(|scope| (*scope, 0)).collect();
        for entry in self.by_id.iter() {
            *by_scope.entry(entry.key().scope()).or_insert(0) += 1;
        }

        InternerStats {
            count: self.by_id.len(),
            capacity: self.by_id.capacity(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            races: self.races.load(Ordering::Relaxed),
            derived: self.derived.load(Ordering::Relaxed),
            by_scope,
        }
    }

    /// Allocate a fresh dynamic ID
    ///
    /// # Panics
    ///
    /// Panics once every sequence number up to [`MAX_SEQUENCE`] is taken.
    /// Wrapping would hand out IDs that alias earlier records.
    #[inline]
    fn fresh(&self, scope: Scope) -> SymbolId {
        let sequence = self
            .last_seq
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                last.checked_add(1).filter(|next| *next <= MAX_SEQUENCE)
            })
            .map(|last| last + 1)
            .unwrap_or_else(|last| {
                panic!("symbol sequence space exhausted (last sequence {})", last)
            });
        let tag = scope.tag().unwrap_or(SCOPE_MASK);
        SymbolId::from_parts(sequence, tag)
    }

    /// Publish `text → id`, or return the ID another thread published first
    fn insert(&self, text: &str, id: SymbolId) -> SymbolId {
        match self.by_text.entry(Arc::from(text)) {
            Entry::Occupied(entry) => {
                // Lost the race; the speculative sequence number is dropped.
                self.count(&self.races);
                *entry.get()
            }
            Entry::Vacant(entry) => {
                let shared = Arc::clone(entry.key());
                self.by_id.insert(id, InternedSymbol::new(id, shared));
                entry.insert(id);
                tracing::debug!(?id, scope = %id.scope(), "interned");
                id
            }
        }
    }

    #[inline]
    fn count(&self, counter: &AtomicUsize) {
        if self.stats_enabled {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn sharded_map<K: Eq + Hash, V>(config: &RegistryConfig) -> DashMap<K, V, RandomState> {
    DashMap::with_capacity_and_hasher_and_shard_amount(
        config.initial_capacity,
        RandomState::new(),
        config.shard_amount,
    )
}
