//! rubric-sym - Symbol Interning for the Rubric Runtime
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! Every method name, variable name and constant the runtime sees is turned
//! into a [`SymbolId`]: a `u64` that is equal for equal text and different for
//! different text, for as long as the [`SymbolRegistry`] lives.
//!
//! COMPONENTS:
//! -----------
//! 1. BOOTSTRAP TOKENS ([`symbol::tokens`])
//!    Operator names (`+`, `<=>`, `[]=` ...) registered with fixed IDs.
//!
//! 2. CLASSIFIER ([`classify`])
//!    Pure `text → Scope`. The scope is stored in the low bits of every
//!    dynamic ID.
//!
//! 3. SYMBOL TABLE ([`symbol::interner`])
//!    Concurrent two-way map between text and IDs, with on-demand setter
//!    derivation.
//!
//! 4. LITERAL PRINTER ([`escape`])
//!    `:foo` or `:"foo bar"`.
//!
//! 5. REGISTRY ([`registry`])
//!    Owns the table, runs bootstrap, exposes everything above.
//
// ============================================================================
// ID LAYOUT
// ============================================================================
//
// Dynamic IDs are `(sequence << 3) | tag`; operator IDs are their reserved
// value (< 1000). The sequence counter starts at the configured floor, so the
// smallest dynamic ID is `(floor + 1) << 3` and the ranges never meet.
//
// A setter `foo=` shares the sequence number of `foo`. Resolving a setter ID
// that was never interned finds `foo` by swapping the tag back and interns
// `foo=` on the spot.

pub mod classify;
pub mod config;
pub mod error;
pub mod escape;
pub mod registry;
pub mod symbol;

pub use config::RegistryConfig;
pub use error::{ConfigError, ConfigResult, SymbolError, SymbolResult};
pub use escape::SymbolLiteral;
pub use registry::{NameRef, SymbolRegistry};
pub use symbol::{InternedSymbol, InternerStats, OperatorToken, Scope, SymbolId};
