//! Decimal numbers. Also matches whole numbers, at a lower confidence than
//! the integer kind so that digit-only input stays integral.

use std::cmp::Ordering;

use crate::kinds::number;
use crate::{AtomMap, Atoms, Kind, Processor, RuleSet};

pub(crate) struct FloatValue {
    rules: RuleSet,
}

impl FloatValue {
    pub(crate) fn new() -> Self {
        FloatValue {
            rules: RuleSet::new(vec![pattern_rule! {
                regex: r"(?<number>[+-]?(?<integer>[0-9]+)(?:[.](?<decimal>[0-9]+))?)",
                template: "${number}",
            }]),
        }
    }
}

impl Processor for FloatValue {
    fn kind(&self) -> Kind {
        Kind::Float
    }

    fn rule_set(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }

    fn value_atoms(&self) -> &[&'static str] {
        number::NUMBER_ATOMS
    }

    fn converts_to(&self) -> &[Kind] {
        &[Kind::Integer]
    }

    fn creatable_from(&self) -> &[Kind] {
        &[Kind::Integer, Kind::Currency]
    }

    /// A sign split from its digits ("- 5") is glued back before matching.
    fn prepare_value(&self, text: &str) -> String {
        regex!(r"([+-])\s+").replace_all(text, "${1}").into_owned()
    }

    fn normalize_values(&self, values: &mut AtomMap) {
        number::normalize_number_atoms(values);
    }

    fn compare_maps(&self, left: &AtomMap, right: &AtomMap) -> Ordering {
        number::compare_number_maps(left, right)
    }

    fn direct_create(&self, source: &mut Atoms) -> Option<Atoms> {
        number::convert_number(Kind::Float, source)
    }

    fn convert_to(&self, target: Kind, source: &mut Atoms) -> Option<Atoms> {
        if !self.converts_to().contains(&target) {
            return None;
        }
        number::convert_number(target, source)
    }
}
