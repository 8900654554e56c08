//! Whole numbers, optionally signed.

use std::cmp::Ordering;

use crate::kinds::number;
use crate::{confidence, AtomMap, Atoms, Kind, Processor, RuleSet};

pub(crate) struct IntegerValue {
    rules: RuleSet,
}

impl IntegerValue {
    pub(crate) fn new() -> Self {
        IntegerValue {
            rules: RuleSet::new(vec![pattern_rule! {
                regex: r"(?<number>[+-]?(?<integer>[0-9]+))",
                template: "${number}",
            }]),
        }
    }
}

impl Processor for IntegerValue {
    fn kind(&self) -> Kind {
        Kind::Integer
    }

    fn rule_set(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }

    fn default_confidence(&self) -> f32 {
        confidence::HIGH
    }

    fn value_atoms(&self) -> &[&'static str] {
        number::NUMBER_ATOMS
    }

    fn converts_to(&self) -> &[Kind] {
        &[Kind::Float]
    }

    fn creatable_from(&self) -> &[Kind] {
        &[Kind::Float, Kind::Currency]
    }

    fn normalize_values(&self, values: &mut AtomMap) {
        number::normalize_number_atoms(values);
    }

    fn compare_maps(&self, left: &AtomMap, right: &AtomMap) -> Ordering {
        number::compare_number_maps(left, right)
    }

    fn direct_create(&self, source: &mut Atoms) -> Option<Atoms> {
        number::convert_number(Kind::Integer, source)
    }

    fn convert_to(&self, target: Kind, source: &mut Atoms) -> Option<Atoms> {
        if !self.converts_to().contains(&target) {
            return None;
        }
        number::convert_number(target, source)
    }
}
