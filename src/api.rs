//! Crate-level entry points.
//!
//! Everything here is a thin veneer over the engine: containers come from
//! [`Atoms`], kind selection and lookup from the registry. Kept separate so
//! the public surface is one screen of code.

use crate::engine::registry;
use crate::{Atoms, Kind, Processor, ProcessorRef, RegistryError};

/// Wrap `text` in an [`Atoms`] container, leaving kind selection to the
/// first read.
///
/// ```
/// let mut price = atomos::to_atoms("$123.450");
/// assert_eq!(price.value(), "$123.45");
/// assert_eq!(price.value_of("integer").as_deref(), Some("123"));
/// ```
pub fn to_atoms(text: impl Into<String>) -> Atoms {
    Atoms::new(text)
}

/// Wrap `text` bound to an explicit kind, bypassing scoring.
///
/// ```
/// use atomos::Kind;
///
/// let mut raw = atomos::to_atoms_with("$123.450", Kind::Untyped);
/// assert_eq!(raw.value(), "$123.450");
/// ```
pub fn to_atoms_with(text: impl Into<String>, kind: Kind) -> Atoms {
    Atoms::with_kind(text, kind)
}

/// The processor that best recognizes `text`. Always resolves; empty or
/// unrecognizable input falls back to the reserved empty kind.
pub fn processor_for(text: &str) -> ProcessorRef {
    registry::processor_for(text)
}

/// Resolve a processor by registry name. Accepts the short name in any ASCII
/// case, plus the conventional `*value` / `*_value` spellings.
///
/// ```
/// use atomos::{Kind, Processor};
///
/// assert_eq!(atomos::parse_processor("IntegerValue").unwrap().kind(), Kind::Integer);
/// assert!(atomos::parse_processor("bogus").is_err());
/// ```
pub fn parse_processor(name: &str) -> Result<ProcessorRef, RegistryError> {
    registry::by_name(name)
}

/// All registered processor singletons, in registration order.
pub fn registered_processors() -> Vec<ProcessorRef> {
    registry::all()
}

/// Canonical form of `text` under its best-recognizing kind.
///
/// ```
/// assert_eq!(atomos::normalize("  hello   there "), "HELLO THERE");
/// assert_eq!(atomos::normalize("1.100"), "1.1");
/// assert_eq!(atomos::normalize("+100"), "100");
/// ```
pub fn normalize(text: &str) -> String {
    processor_for(text).format_value(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_atoms_defers_selection_until_first_read() {
        let mut atoms = to_atoms("$5.25");
        assert_eq!(atoms.source_value(), "$5.25");
        assert_eq!(atoms.processor().kind(), Kind::Currency);
    }

    #[test]
    fn to_atoms_with_pins_the_kind() {
        let mut atoms = to_atoms_with("123", Kind::Words);
        assert_eq!(atoms.processor().kind(), Kind::Words);
        assert_eq!(atoms.value_of("words"), None);
    }

    #[test]
    fn registered_processors_follow_registration_order() {
        let kinds: Vec<Kind> = registered_processors().iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, Kind::ALL);
    }

    #[test]
    fn normalize_answers_empty_for_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
