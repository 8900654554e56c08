//! Inference engine: registry, scoring, pattern matching and derivation.
//!
//! This module is the front door for the core. The concrete recognizer kinds
//! under `src/kinds/` are configuration data; everything that *does* something
//! with them lives in the submodules here.
//!
//! ## How the parts work together
//!
//! Turning raw text into queryable facts is a pipeline:
//!
//! ```text
//! text ── registry::processor_for ──┐   (registry.rs)
//!           │ score every kind      │
//!           v                       │
//!     score::select_best ───────────┼─ pick the best-ranked kind
//!         (score.rs)                │
//!                                   v
//!                      Processor::atomize
//!                        - prepare + canonicalize
//!                        - first matching rule wins
//!                        - capture merge (pattern.rs)
//!                        - normalize_values post-pass
//!                                   │
//!                                   v
//!                      Atoms cache (src/atoms.rs)
//!                                   │  fact lookup miss
//!                                   v
//!                      convert::resolve_supplement   (convert.rs)
//!                        - existing supplements
//!                        - authored converts_to edges
//!                        - creatable_from construction
//! ```
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: one singleton per [`Kind`](crate::Kind), create-or-get
//!   semantics, name lookup, best-processor selection with the reserved
//!   fallback.
//! - `score.rs`: match quality (`coverage x confidence`) and deterministic
//!   ranking over a candidate set.
//! - `pattern.rs`: capture extraction (including repeat/indexed atoms) and
//!   `${name}` template rendering.
//! - `convert.rs`: compatibility tests, cycle-safe derivability search,
//!   value construction across kinds, and the supplemental fact resolution
//!   that backs [`Atoms::value_of`](crate::Atoms::value_of).
//!
//! All operations here are synchronous and CPU-bound. The only shared mutable
//! state is the registry's singleton table; everything else is a pure
//! function of its inputs.

#[path = "engine/convert.rs"]
pub(crate) mod convert;
#[path = "engine/pattern.rs"]
pub(crate) mod pattern;
#[path = "engine/registry.rs"]
pub(crate) mod registry;
#[path = "engine/score.rs"]
pub(crate) mod score;

pub use registry::RegistryError;
pub use score::Score;
