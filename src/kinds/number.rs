//! Shared behavior of the numeric family (integer, float, currency).
//!
//! All three kinds expose a `number` atom carrying the full numeric text.
//! That shared atom is what makes the family mutually derivable: any member
//! can be constructed from any other by re-parsing `number` and re-rendering
//! it in the target's surface form.

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::{AtomMap, Atoms, Kind};

/// Cache identity of every numeric kind: the number is the value, the
/// surface decoration (sign glyphs, digit grouping) is not.
pub(crate) const NUMBER_ATOMS: &[&str] = &["number"];

/// Canonicalize the numeric atoms in place.
///
/// Each atom is re-rendered through a real numeric parse, which folds
/// trailing fractional zeros, leading `+` signs and leading zeros into one
/// canonical spelling. An atom whose text fails to parse becomes absent
/// rather than keeping (or inventing) a value.
pub(crate) fn normalize_number_atoms(values: &mut AtomMap) {
    renormalize::<f64>(values, "number");
    renormalize::<i64>(values, "integer");
    renormalize::<i64>(values, "decimal");
}

fn renormalize<T: FromStr + Display>(values: &mut AtomMap, name: &str) {
    if let Some(entry) = values.get_mut(name) {
        *entry = entry.take().and_then(|raw| raw.parse::<T>().ok().map(|v| v.to_string()));
    }
}

/// Numeric ordering over the shared `number` atom; an unparsable or absent
/// side counts as zero.
pub(crate) fn compare_number_maps(left: &AtomMap, right: &AtomMap) -> Ordering {
    number_in(left).total_cmp(&number_in(right))
}

fn number_in(values: &AtomMap) -> f64 {
    values
        .get("number")
        .and_then(|value| value.as_deref())
        .and_then(|text| text.parse().ok())
        .unwrap_or(0.0)
}

/// The source's `number` atom as a parsed value, if it has one.
pub(crate) fn number_of(source: &mut Atoms) -> Option<f64> {
    source.data().get("number").cloned().flatten().and_then(|text| text.parse().ok())
}

/// Render a numeric value in `kind`'s surface form so that re-atomizing the
/// result yields a well-formed value of that kind.
pub(crate) fn from_number(kind: Kind, value: f64) -> String {
    match kind {
        Kind::Integer => (value.trunc() as i64).to_string(),
        Kind::Currency => format!("${value}"),
        _ => value.to_string(),
    }
}

/// Generic numeric conversion: re-parse the source's `number` atom and
/// rebuild it as a `target`-kind value.
pub(crate) fn convert_number(target: Kind, source: &mut Atoms) -> Option<Atoms> {
    let value = number_of(source)?;
    Some(Atoms::with_kind(from_number(target, value), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Option<&str>)]) -> AtomMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.map(str::to_string))).collect()
    }

    #[test]
    fn normalization_folds_signs_and_zeros() {
        let mut values =
            map(&[("number", Some("+1.100")), ("integer", Some("+001")), ("decimal", Some("100"))]);
        normalize_number_atoms(&mut values);
        assert_eq!(values.get("number"), Some(&Some("1.1".to_string())));
        assert_eq!(values.get("integer"), Some(&Some("1".to_string())));
        assert_eq!(values.get("decimal"), Some(&Some("100".to_string())));
    }

    #[test]
    fn unparsable_atoms_become_absent() {
        let mut values = map(&[("number", Some("lots")), ("integer", None)]);
        normalize_number_atoms(&mut values);
        assert_eq!(values.get("number"), Some(&None));
        assert_eq!(values.get("integer"), Some(&None));
    }

    #[test]
    fn comparison_is_numeric_not_lexical() {
        let two = map(&[("number", Some("2"))]);
        let ten = map(&[("number", Some("10"))]);
        assert_eq!(compare_number_maps(&two, &ten), Ordering::Less);
    }

    #[test]
    fn surface_forms_reparse_under_their_own_kind() {
        assert_eq!(from_number(Kind::Integer, 2.9), "2");
        assert_eq!(from_number(Kind::Float, 2.5), "2.5");
        assert_eq!(from_number(Kind::Currency, 12.5), "$12.5");
    }
}
