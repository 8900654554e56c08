//! Catch-all for non-empty input no other kind wants. Keeps the text as-is
//! (minus surrounding whitespace) under a minimal confidence, so any typed
//! match beats it.

use crate::{confidence, Kind, Processor, RuleSet};

pub(crate) struct UntypedValue {
    rules: RuleSet,
}

impl UntypedValue {
    pub(crate) fn new() -> Self {
        UntypedValue {
            rules: RuleSet::new(vec![pattern_rule! {
                regex: r"\s*(?<value>\S.*?)\s*$",
                template: "${value}",
            }]),
        }
    }
}

impl Processor for UntypedValue {
    fn kind(&self) -> Kind {
        Kind::Untyped
    }

    fn rule_set(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }

    fn default_confidence(&self) -> f32 {
        confidence::MINIMAL
    }
}
