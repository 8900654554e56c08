//! Monetary amounts: a currency glyph followed by a number.

use std::cmp::Ordering;

use crate::kinds::number;
use crate::{confidence, AtomMap, Atoms, Kind, Processor, RuleSet};

const CURRENCY_ATOMS: &[&str] = &["currency_sign", "number"];

pub(crate) struct CurrencyValue {
    rules: RuleSet,
}

impl CurrencyValue {
    pub(crate) fn new() -> Self {
        CurrencyValue {
            rules: RuleSet::new(vec![pattern_rule! {
                regex: r"(?<currency_sign>[$])(?<number>(?<integer>[+-]?[0-9]+)(?:[.](?<decimal>[0-9]+))?)",
                template: "${currency_sign}${number}",
            }]),
        }
    }
}

impl Processor for CurrencyValue {
    fn kind(&self) -> Kind {
        Kind::Currency
    }

    fn rule_set(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }

    fn default_confidence(&self) -> f32 {
        confidence::HIGH
    }

    fn value_atoms(&self) -> &[&'static str] {
        CURRENCY_ATOMS
    }

    fn converts_to(&self) -> &[Kind] {
        &[Kind::Float, Kind::Integer]
    }

    fn creatable_from(&self) -> &[Kind] {
        &[Kind::Integer, Kind::Float]
    }

    fn normalize_values(&self, values: &mut AtomMap) {
        if let Some(entry) = values.get_mut("currency_sign") {
            if entry.is_none() {
                *entry = Some("$".to_string());
            }
        }
        number::normalize_number_atoms(values);
    }

    fn compare_maps(&self, left: &AtomMap, right: &AtomMap) -> Ordering {
        number::compare_number_maps(left, right)
    }

    /// Derived amounts carry the default glyph so the result re-parses as a
    /// well-formed currency value.
    fn direct_create(&self, source: &mut Atoms) -> Option<Atoms> {
        number::convert_number(Kind::Currency, source)
    }

    fn convert_to(&self, target: Kind, source: &mut Atoms) -> Option<Atoms> {
        if !self.converts_to().contains(&target) {
            return None;
        }
        number::convert_number(target, source)
    }
}
