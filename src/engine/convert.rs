//! Compatibility, derivation and supplemental fact resolution.
//!
//! Two edge sets drive this module, both declared by the kinds themselves:
//!
//! - `converts_to`: authored conversions a kind knows how to perform on its
//!   own values.
//! - `creatable_from`: kinds whose values carry enough information to
//!   construct a value of the declaring kind.
//!
//! Both graphs may be cyclic (the numeric family is, deliberately), so every
//! traversal threads a visited set. Derivation never coerces silently: a
//! value is either compatible as-is, constructible, or the lookup fails.

use std::collections::HashSet;

use crate::engine::registry;
use crate::{AtomMap, Atoms, Kind, Processor, ProcessorRef};

/// True when `source`'s values can be read directly as `target` values:
/// same kind, or `source` produces a superset of `target`'s required atoms.
pub(crate) fn compatible_kinds(target: &dyn Processor, source: &dyn Processor) -> bool {
    if source.kind() == target.kind() {
        return true;
    }
    target.value_atoms().iter().all(|name| source.atom_names().contains(name))
}

/// True when `atoms` is compatible with `target` without transformation.
pub(crate) fn is_compatible(target: &dyn Processor, atoms: &mut Atoms) -> bool {
    compatible_kinds(target, &*atoms.processor())
}

/// True when a `target` value can be constructed from a `source`-kind value,
/// directly or through intermediate kinds. Cycle-safe.
pub(crate) fn is_creatable_from(target: &dyn Processor, source: Kind) -> bool {
    let mut visited = HashSet::from([target.kind()]);
    reachable(target.creatable_from(), source, &mut visited)
}

fn reachable(edges: &[Kind], goal: Kind, visited: &mut HashSet<Kind>) -> bool {
    for &edge in edges {
        if edge == goal {
            return true;
        }
        if visited.insert(edge) {
            let intermediate = registry::instance_of(edge);
            if reachable(intermediate.creatable_from(), goal, visited) {
                return true;
            }
        }
    }
    false
}

/// Return `atoms` unchanged if compatible with `target`, derive a new value
/// if possible, fail otherwise. No partial results.
pub(crate) fn make_compatible(target: &ProcessorRef, atoms: &mut Atoms) -> Option<Atoms> {
    if is_compatible(&**target, atoms) {
        return Some(atoms.clone());
    }
    if is_creatable_from(&**target, atoms.processor().kind()) {
        return create_from(target, atoms);
    }
    None
}

/// Construct a `target` value from `source`.
///
/// The kind's `direct_create` shortcut runs first; otherwise the source's
/// fact map goes through the acceptance-predicate path below.
pub(crate) fn create_from(target: &ProcessorRef, source: &mut Atoms) -> Option<Atoms> {
    let mut visited = HashSet::from([target.kind()]);
    create_from_inner(target, source, &mut visited)
}

fn create_from_inner(
    target: &ProcessorRef,
    source: &mut Atoms,
    visited: &mut HashSet<Kind>,
) -> Option<Atoms> {
    if let Some(created) = target.direct_create(source) {
        log::trace!(
            "derived `{}` from `{}` via direct conversion",
            target.kind().name(),
            source.processor().kind().name()
        );
        return Some(created);
    }
    let values = source.data().clone();
    create_from_map_inner(target, &values, visited)
}

/// Construct a `target` value from a bare fact map: accept-and-render when
/// the map satisfies the predicate, else try each `creatable_from` edge
/// (cheapest confidence first) as an intermediate step.
pub(crate) fn create_from_map(target: &ProcessorRef, values: &AtomMap) -> Option<Atoms> {
    let mut visited = HashSet::from([target.kind()]);
    create_from_map_inner(target, values, &mut visited)
}

fn create_from_map_inner(
    target: &ProcessorRef,
    values: &AtomMap,
    visited: &mut HashSet<Kind>,
) -> Option<Atoms> {
    if target.accepts_map(values) {
        let text = target.format_map(values, None);
        return Some(Atoms::from_parts(target.clone(), text));
    }
    let mut edges: Vec<ProcessorRef> =
        target.creatable_from().iter().map(|&kind| registry::instance_of(kind)).collect();
    edges.sort_by(|a, b| a.default_confidence().total_cmp(&b.default_confidence()));
    for edge in edges {
        if !visited.insert(edge.kind()) {
            continue;
        }
        if edge.accepts_map(values) {
            let mut intermediate = create_from_map_inner(&edge, values, visited)?;
            return create_from_inner(target, &mut intermediate, visited);
        }
    }
    None
}

/// Resolve a fact the bound kind could not produce directly.
///
/// Search order: the memoized supplement list, then authored `converts_to`
/// conversions toward a kind exposing the name, then generic construction
/// (from the Atoms itself or any existing supplement). A successful result
/// joins the supplement list and is never recomputed for this instance.
pub(crate) fn resolve_supplement(atoms: &mut Atoms, name: &str) -> Option<String> {
    let processor = atoms.processor();

    for i in 0..atoms.supplements.len() {
        if atoms.supplements[i].data().contains_key(name) {
            return atoms.supplements[i].data().get(name).cloned().flatten();
        }
    }

    let mut providers: Vec<ProcessorRef> = registry::all()
        .into_iter()
        .filter(|p| p.kind() != processor.kind() && p.atom_names().iter().any(|n| *n == name))
        .collect();
    providers.sort_by(|a, b| b.default_confidence().total_cmp(&a.default_confidence()));
    if providers.is_empty() {
        return None;
    }

    for &target in processor.converts_to() {
        if !providers.iter().any(|p| p.kind() == target) {
            continue;
        }
        if let Some(mut converted) = processor.convert_to(target, atoms) {
            log::trace!("supplement for `{name}` via authored conversion to `{}`", target.name());
            let value = converted.value_of(name);
            atoms.supplements.push(converted);
            return value;
        }
    }

    for candidate in &providers {
        for i in 0..=atoms.supplements.len() {
            let source_kind = if i == 0 {
                processor.kind()
            } else {
                atoms.supplements[i - 1].processor().kind()
            };
            if !is_creatable_from(&**candidate, source_kind) {
                continue;
            }
            let created = if i == 0 {
                create_from(candidate, atoms)
            } else {
                create_from(candidate, &mut atoms.supplements[i - 1])
            };
            if let Some(mut result) = created {
                log::trace!(
                    "supplement for `{name}` constructed as `{}` from `{}`",
                    candidate.kind().name(),
                    source_kind.name()
                );
                let value = result.value_of(name);
                atoms.supplements.push(result);
                return value;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::instance_of;

    #[test]
    fn reachability_terminates_on_cyclic_edges() {
        // The numeric family is mutually creatable: a cycle by construction.
        let integer = instance_of(Kind::Integer);
        assert!(is_creatable_from(&*integer, Kind::Float));
        assert!(is_creatable_from(&*integer, Kind::Currency));
        assert!(!is_creatable_from(&*integer, Kind::Words));
        assert!(!is_creatable_from(&*integer, Kind::Empty));
    }

    #[test]
    fn make_compatible_passes_through_superset_kinds() {
        let integer = instance_of(Kind::Integer);
        let mut price = Atoms::with_kind("$12.50", Kind::Currency);
        let compatible = make_compatible(&integer, &mut price);
        assert_eq!(compatible.unwrap().value_of("number").as_deref(), Some("12.5"));
    }

    #[test]
    fn make_compatible_refuses_unrelated_kinds() {
        let words = instance_of(Kind::Words);
        let mut number = Atoms::with_kind("42", Kind::Integer);
        assert!(make_compatible(&words, &mut number).is_none());
    }

    #[test]
    fn create_from_reparses_the_shared_number_atom() {
        let integer = instance_of(Kind::Integer);
        let mut fractional = Atoms::with_kind("2.5", Kind::Float);
        let mut derived = create_from(&integer, &mut fractional).unwrap();
        assert_eq!(derived.processor().kind(), Kind::Integer);
        assert_eq!(derived.value_of("number").as_deref(), Some("2"));
    }

    #[test]
    fn create_from_fails_without_a_path() {
        let integer = instance_of(Kind::Integer);
        let mut words = Atoms::with_kind("hello there", Kind::Words);
        assert!(create_from(&integer, &mut words).is_none());
    }

    #[test]
    fn create_from_map_renders_through_the_default_template() {
        let integer = instance_of(Kind::Integer);
        let mut values = AtomMap::new();
        values.insert("number".to_string(), Some("3".to_string()));
        let mut created = create_from_map(&integer, &values).unwrap();
        assert_eq!(created.source_value(), "3");
        assert_eq!(created.value_of("integer").as_deref(), Some("3"));
    }

    #[test]
    fn create_from_map_rejects_insufficient_maps() {
        let integer = instance_of(Kind::Integer);
        let mut values = AtomMap::new();
        values.insert("words".to_string(), Some("three".to_string()));
        assert!(create_from_map(&integer, &values).is_none());
    }
}
