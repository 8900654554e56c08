//! Singleton lifecycle and lookup for processor kinds.
//!
//! One instance per [`Kind`] lives in a process-wide table of `OnceCell`s,
//! created on first request. Concurrent first requests for the same kind are
//! safe: `OnceCell` lets exactly one constructor win and the losing value is
//! dropped, never left reachable as a second live singleton.
//!
//! The kind set itself is closed (see [`Kind::ALL`]); registration is the
//! static constructor table in `src/kinds/mod.rs`, not runtime discovery.

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::engine::score;
use crate::{Kind, ProcessorRef};

static INSTANCES: [OnceCell<ProcessorRef>; Kind::ALL.len()] =
    [const { OnceCell::new() }; Kind::ALL.len()];

/// Lookup failures for name-based resolution. Text-based selection never
/// fails; asking for a kind by name can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no processor kind registered under name `{0}`")]
    NotFound(String),
}

/// Return the singleton for `kind`, constructing it on first request.
pub(crate) fn instance_of(kind: Kind) -> ProcessorRef {
    INSTANCES[kind.index()]
        .get_or_init(|| {
            log::debug!("constructing processor singleton for kind `{}`", kind.name());
            crate::kinds::construct(kind)
        })
        .clone()
}

/// All registered singletons, in registration order.
pub(crate) fn all() -> Vec<ProcessorRef> {
    Kind::ALL.iter().copied().map(instance_of).collect()
}

/// Best-scoring processor for `text`, falling back to the reserved
/// [`Kind::Empty`] when no kind scores. Deterministic for a fixed kind set.
pub(crate) fn processor_for(text: &str) -> ProcessorRef {
    match score::select_best(&all(), text) {
        Some(processor) => processor,
        None => {
            log::trace!("no kind scored {text:?}, using fallback");
            instance_of(Kind::Empty)
        }
    }
}

/// Resolve a kind by name: exact match, then ASCII-case-insensitive, then
/// the conventional `*value` / `*_value` suffix.
pub(crate) fn by_name(name: &str) -> Result<ProcessorRef, RegistryError> {
    if let Some(kind) = Kind::ALL.iter().find(|kind| kind.name() == name) {
        return Ok(instance_of(*kind));
    }
    if let Some(kind) = Kind::ALL.iter().find(|kind| kind.name().eq_ignore_ascii_case(name)) {
        return Ok(instance_of(*kind));
    }
    let lowered = name.to_ascii_lowercase();
    if let Some(short) = lowered.strip_suffix("_value").or_else(|| lowered.strip_suffix("value")) {
        if let Some(kind) = Kind::ALL.iter().find(|kind| kind.name() == short) {
            return Ok(instance_of(*kind));
        }
    }
    Err(RegistryError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Processor;
    use std::sync::Arc;

    #[test]
    fn instance_of_returns_one_singleton_per_kind() {
        let a = instance_of(Kind::Integer);
        let b = instance_of(Kind::Integer);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.kind(), Kind::Integer);
    }

    #[test]
    fn concurrent_first_requests_converge() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| instance_of(Kind::Currency)))
            .collect();
        let instances: Vec<ProcessorRef> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for instance in &instances[1..] {
            assert!(Arc::ptr_eq(&instances[0], instance));
        }
    }

    #[test]
    fn by_name_resolves_exact_case_insensitive_and_suffixed() {
        assert_eq!(by_name("integer").unwrap().kind(), Kind::Integer);
        assert_eq!(by_name("Integer").unwrap().kind(), Kind::Integer);
        assert_eq!(by_name("IntegerValue").unwrap().kind(), Kind::Integer);
        assert_eq!(by_name("currency_value").unwrap().kind(), Kind::Currency);
    }

    #[test]
    fn by_name_misses_hard() {
        assert_eq!(
            by_name("bogus").unwrap_err(),
            RegistryError::NotFound("bogus".to_string())
        );
    }

    #[test]
    fn processor_for_always_resolves() {
        assert_eq!(processor_for("").kind(), Kind::Empty);
        assert_eq!(processor_for("!!!unmatched###").kind(), Kind::Words);
        // Punctuation-only input is still claimed by the always-on kind.
        assert_eq!(processor_for("!!!###").kind(), Kind::Untyped);
    }
}
