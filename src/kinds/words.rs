//! Free text reduced to its words: digits and punctuation are stripped,
//! whitespace collapsed, and every word uppercased. Individual words come
//! back as indexed `word.<i>` atoms.

use crate::{AtomMap, Kind, Processor, RuleSet};

const WORDS_ATOMS: &[&str] = &["words"];

pub(crate) struct WordsValue {
    rules: RuleSet,
}

impl WordsValue {
    pub(crate) fn new() -> Self {
        WordsValue {
            rules: RuleSet::new(vec![pattern_rule! {
                regex: r"\W?(?<words>(?:\w+\s*)+)\W*",
                template: "${words}",
                repeats: [("word" in "words", r"\w+")],
            }]),
        }
    }
}

impl Processor for WordsValue {
    fn kind(&self) -> Kind {
        Kind::Words
    }

    fn rule_set(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }

    fn value_atoms(&self) -> &[&'static str] {
        WORDS_ATOMS
    }

    fn prepare_value(&self, text: &str) -> String {
        let stripped = regex!(r"[^\w\s]|[0-9]").replace_all(text, "");
        regex!(r"\s\s+").replace_all(&stripped, " ").into_owned()
    }

    fn normalize_values(&self, values: &mut AtomMap) {
        for value in values.values_mut() {
            if let Some(v) = value.take() {
                *value = Some(v.trim().to_uppercase());
            }
        }
    }
}
