//! The cached value container binding a source string to a processor.
//!
//! An `Atoms` owns one raw text value and lazily computes its fact map under
//! the bound kind. The cache moves through three states:
//!
//! ```text
//! Empty ──(read)──> Valid ──(hash mismatch on read)──> Suspect
//!                     ^                                   │
//!                     └────────── one-shot self-heal ─────┘
//! ```
//!
//! A content hash over the kind's `value_atoms` is recorded whenever the map
//! is (re)computed or bulk-replaced. A read that finds the live hash
//! disagreeing with the recorded one treats the map as externally mutated:
//! the source text is regenerated from the current facts, re-atomized, and
//! the hash re-recorded. At most one heal happens per read.
//!
//! Writes follow one policy: the last fully-accepted bulk write wins. Direct
//! mutation through [`Atoms::data_mut`] is outside that contract and is only
//! repaired by the hash check on the next read.
//!
//! An `Atoms` is single-owner: every reading operation takes `&mut self`
//! because reads may compute, heal, or memoize supplements. Sharing one
//! instance across threads is the caller's problem to serialize.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::engine::{convert, registry};
use crate::{AtomMap, Kind, Processor, ProcessorRef};

#[derive(Clone, Default)]
pub struct Atoms {
    pub(crate) source_value: String,
    pub(crate) processor: Option<ProcessorRef>,
    pub(crate) data: AtomMap,
    pub(crate) cache_valid: bool,
    pub(crate) data_hash: u64,
    /// Successful derivations memoized for this instance's lifetime
    /// (cleared whenever the cache is recomputed).
    pub(crate) supplements: Vec<Atoms>,
}

impl Atoms {
    /// Container over `text`; the recognizing kind is chosen lazily by the
    /// registry on first read.
    pub fn new(text: impl Into<String>) -> Self {
        Atoms { source_value: text.into(), ..Default::default() }
    }

    /// Container over `text` bound to an explicit kind.
    pub fn with_kind(text: impl Into<String>, kind: Kind) -> Self {
        Atoms {
            source_value: text.into(),
            processor: Some(registry::instance_of(kind)),
            ..Default::default()
        }
    }

    pub(crate) fn from_parts(processor: ProcessorRef, text: String) -> Self {
        Atoms { source_value: text, processor: Some(processor), ..Default::default() }
    }

    /// The raw text this container was built from.
    pub fn source_value(&self) -> &str {
        &self.source_value
    }

    /// The bound processor, selecting the best-scoring one on first use.
    pub fn processor(&mut self) -> ProcessorRef {
        match &self.processor {
            Some(processor) => processor.clone(),
            None => {
                let processor = registry::processor_for(&self.source_value);
                self.processor = Some(processor.clone());
                processor
            }
        }
    }

    /// Rebind to another kind. Always accepted; invalidates the cache so the
    /// next read re-atomizes under the new rules.
    pub fn set_processor(&mut self, kind: Kind) {
        self.cache_valid = false;
        self.processor = Some(registry::instance_of(kind));
    }

    /// Replace the raw text. Always accepted; invalidates the cache. The
    /// processor binding is unchanged.
    pub fn set_value(&mut self, text: impl Into<String>) {
        self.cache_valid = false;
        self.source_value = text.into();
    }

    /// Canonical rendering of the current facts through the bound kind.
    pub fn value(&mut self) -> String {
        let processor = self.processor();
        self.ensure_data();
        processor.format_map(&self.data, None)
    }

    /// The fact map, computed (or healed) on demand.
    pub fn data(&mut self) -> &AtomMap {
        self.ensure_data();
        &self.data
    }

    /// Mutable access to the fact map.
    ///
    /// This escapes the bulk-write contract: edits are not validated and a
    /// change to any value atom is detected as external mutation on the next
    /// read, which regenerates the source text from the map. Prefer
    /// [`Atoms::set_data`].
    pub fn data_mut(&mut self) -> &mut AtomMap {
        self.ensure_data();
        &mut self.data
    }

    /// Bulk-replace the fact map.
    ///
    /// Accepted only when the map satisfies the bound kind's acceptance
    /// predicate; on acceptance the source text is regenerated from the map
    /// and both views are immediately consistent. A rejected write is a
    /// no-op and returns `false`.
    pub fn set_data(&mut self, values: AtomMap) -> bool {
        let processor = self.processor();
        if !processor.accepts_map(&values) {
            log::debug!("rejected bulk write for kind `{}`", processor.kind().name());
            return false;
        }
        self.source_value = processor.format_map(&values, None);
        self.data = values;
        self.data_hash = value_hash(&self.data, processor.value_atoms());
        self.cache_valid = true;
        self.supplements.clear();
        true
    }

    /// True when the raw fact map would satisfy the bound kind's acceptance
    /// predicate as-is. Does not compute anything.
    pub fn is_valid(&self) -> bool {
        match &self.processor {
            Some(processor) => processor.accepts_map(&self.data),
            None => false,
        }
    }

    /// Look up a named fact.
    ///
    /// A key present in the current map answers directly (possibly with an
    /// absent value). A miss routes through supplemental resolution, which
    /// may derive the fact from another kind and memoize the derivation.
    pub fn value_of(&mut self, name: &str) -> Option<String> {
        if let Some(value) = self.data().get(name) {
            return value.clone();
        }
        convert::resolve_supplement(self, name)
    }

    /// Names realized in the current fact map.
    pub fn current_atoms(&mut self) -> Vec<String> {
        self.data().keys().cloned().collect()
    }

    /// Realized names plus everything reachable through compatibility or
    /// derivation from the bound kind.
    pub fn available_atoms(&mut self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.data().keys().cloned().collect();
        let processor = self.processor();
        for other in registry::all() {
            if convert::compatible_kinds(&*other, &*processor)
                || convert::is_creatable_from(&*other, processor.kind())
            {
                names.extend(other.atom_names().iter().map(|name| name.to_string()));
            }
        }
        names.into_iter().collect()
    }

    /// Compare through the bound kind: both sides are made compatible first,
    /// then the kind's own comparison over its value atoms decides. An
    /// incompatible side compares as an empty fact map.
    pub fn compare(&mut self, other: &mut Atoms) -> Ordering {
        let processor = self.processor();
        let left = convert::make_compatible(&processor, self)
            .map(|mut atoms| atoms.data().clone())
            .unwrap_or_default();
        let right = convert::make_compatible(&processor, other)
            .map(|mut atoms| atoms.data().clone())
            .unwrap_or_default();
        processor.compare_maps(&left, &right)
    }

    fn ensure_data(&mut self) {
        let processor = self.processor();
        if !self.cache_valid {
            self.supplements.clear();
            for (name, value) in processor.atomize(&self.source_value) {
                self.data.insert(name, value);
            }
            self.data_hash = value_hash(&self.data, processor.value_atoms());
            self.cache_valid = true;
            return;
        }
        let live = value_hash(&self.data, processor.value_atoms());
        if live != self.data_hash {
            log::debug!(
                "value-atom hash mismatch under kind `{}`, healing cache",
                processor.kind().name()
            );
            self.source_value = processor.format_map(&self.data, None);
            self.data = processor.atomize(&self.source_value);
            self.data_hash = value_hash(&self.data, processor.value_atoms());
        }
    }
}

impl fmt::Debug for Atoms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atoms")
            .field("source_value", &self.source_value)
            .field("kind", &self.processor.as_ref().map(|p| p.kind()))
            .field("cache_valid", &self.cache_valid)
            .field("supplements", &self.supplements.len())
            .finish_non_exhaustive()
    }
}

/// Order-independent content hash over the given value-atom keys. Absent
/// values contribute nothing.
fn value_hash(values: &AtomMap, keys: &[&'static str]) -> u64 {
    let mut accumulator = 0u64;
    for key in keys {
        if let Some(Some(value)) = values.get(*key) {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            accumulator ^= hasher.finish();
        }
    }
    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_computed_lazily_and_contains_every_declared_atom() {
        let mut atoms = Atoms::with_kind("$9.50", Kind::Currency);
        assert!(!atoms.cache_valid);
        let names: Vec<String> = atoms.data().keys().cloned().collect();
        for expected in ["currency_sign", "number", "integer", "decimal", "value"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert!(atoms.cache_valid);
    }

    #[test]
    fn set_value_invalidates_and_keeps_the_binding() {
        let mut atoms = Atoms::new("$5");
        assert_eq!(atoms.value_of("number").as_deref(), Some("5"));
        atoms.set_value("$6.50");
        assert_eq!(atoms.processor().kind(), Kind::Currency);
        assert_eq!(atoms.value_of("number").as_deref(), Some("6.5"));
    }

    #[test]
    fn set_processor_forces_reatomization_under_new_rules() {
        let mut atoms = Atoms::new("$6.50");
        assert_eq!(atoms.processor().kind(), Kind::Currency);
        atoms.set_processor(Kind::Untyped);
        assert_eq!(atoms.value_of("value").as_deref(), Some("$6.50"));
        assert_eq!(atoms.value(), "$6.50");
    }

    #[test]
    fn accepted_bulk_write_is_immediately_coherent() {
        let mut atoms = Atoms::with_kind("0", Kind::Integer);
        let mut values = AtomMap::new();
        values.insert("number".to_string(), Some("7".to_string()));
        assert!(atoms.set_data(values.clone()));
        assert_eq!(atoms.source_value(), "7");
        assert_eq!(atoms.data(), &values);
        assert_eq!(atoms.value_of("number").as_deref(), Some("7"));
    }

    #[test]
    fn rejected_bulk_write_changes_nothing() {
        let mut atoms = Atoms::with_kind("5", Kind::Integer);
        let before = atoms.data().clone();
        let mut incomplete = AtomMap::new();
        incomplete.insert("integer".to_string(), Some("9".to_string()));
        assert!(!atoms.set_data(incomplete));
        assert_eq!(atoms.source_value(), "5");
        assert_eq!(atoms.data(), &before);
    }

    #[test]
    fn tampered_value_atoms_heal_on_next_read() {
        let mut atoms = Atoms::with_kind("5", Kind::Integer);
        atoms.data_mut().insert("number".to_string(), Some("9".to_string()));
        // The heal regenerates the source from the live map and re-atomizes.
        assert_eq!(atoms.value_of("integer").as_deref(), Some("9"));
        assert_eq!(atoms.source_value(), "9");
        // Healed once; further reads are stable.
        assert_eq!(atoms.value_of("number").as_deref(), Some("9"));
    }

    #[test]
    fn present_but_absent_atom_answers_without_derivation() {
        let mut atoms = Atoms::with_kind("hello", Kind::Words);
        // `word.count` only exists for multi-word input; `word` is seeded.
        assert_eq!(atoms.value_of("word").as_deref(), Some("HELLO"));
        let mut no_words = Atoms::with_kind("123", Kind::Words);
        assert_eq!(no_words.value_of("words"), None);
        assert!(no_words.supplements.is_empty());
    }

    #[test]
    fn compare_makes_the_other_side_compatible_first() {
        let mut two = Atoms::with_kind("2", Kind::Integer);
        let mut price = Atoms::new("$10");
        assert_eq!(two.compare(&mut price), Ordering::Less);
        assert_eq!(price.compare(&mut two), Ordering::Greater);
    }

    #[test]
    fn available_atoms_include_derivable_names() {
        let mut atoms = Atoms::with_kind("7", Kind::Integer);
        let available = atoms.available_atoms();
        assert!(available.iter().any(|n| n == "currency_sign"));
        assert!(!available.iter().any(|n| n == "words"));
    }
}
