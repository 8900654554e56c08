extern crate self as atomos;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod atoms;
mod engine;
mod kinds;

pub use api::{
    normalize, parse_processor, processor_for, registered_processors, to_atoms, to_atoms_with,
};
pub use atoms::Atoms;
pub use engine::{RegistryError, Score};

// --- Core vocabulary ---------------------------------------------------------

/// Name of the atom every kind exposes: the canonical rendering of the input.
pub const NORMAL_VALUE: &str = "value";

const VALUE_ONLY: &[&str] = &[NORMAL_VALUE];

/// Mapping from atom name to its (possibly absent) string value.
///
/// A present key with a `None` value means the bound kind knows the atom but
/// could not extract it from the source text. Ordered so that hashing,
/// rendering and test output stay deterministic.
pub type AtomMap = BTreeMap<String, Option<String>>;

/// Shared handle to a registered processor singleton.
pub type ProcessorRef = Arc<dyn Processor>;

/// Standard confidence weights a kind can adopt or adjust.
pub mod confidence {
    pub const HIGH: f32 = 1.0;
    pub const NORMAL: f32 = 0.9;
    pub const LOW: f32 = 0.8;
    pub const LOWER: f32 = 0.5;
    pub const MINIMAL: f32 = 0.01;
    pub const IGNORE: f32 = 0.0;
    /// Reserved weight of the universal fallback kind. Never multiplied into
    /// a rank; only consulted for tie-breaking and fallback selection.
    pub const FALLBACK: f32 = f32::MAX;
}

/// Registered processor kinds.
///
/// Enum order is registration order: it is the final tie-break during
/// selection and the iteration order of the registry. The set is closed on
/// purpose — discovery happens through this static table, not by scanning
/// loaded code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Empty,
    Untyped,
    Words,
    Integer,
    Float,
    Currency,
}

impl Kind {
    pub const ALL: [Kind; 6] =
        [Kind::Empty, Kind::Untyped, Kind::Words, Kind::Integer, Kind::Float, Kind::Currency];

    /// Short registry name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Empty => "empty",
            Kind::Untyped => "untyped",
            Kind::Words => "words",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Currency => "currency",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

// --- Match rules -------------------------------------------------------------

/// Explicit stand-in for a repeated capture group.
///
/// The `regex` crate keeps only the last capture of a group under a
/// quantifier, so kinds that need one atom per occurrence declare the
/// occurrences here: after a rule matches, `element` is scanned over the
/// `within` group's span, producing `name` (first occurrence), `name.<i>`
/// per occurrence and `name.count` when there is more than one.
#[derive(Debug)]
pub struct Repeat {
    pub name: &'static str,
    pub within: &'static str,
    pub element: &'static Regex,
}

/// One match rule of a kind: a matching shape plus the canonical template
/// its captures render through. Templates use `${atomName}` placeholders.
#[derive(Debug)]
pub struct PatternRule {
    pub regex: &'static Regex,
    pub template: &'static str,
    pub repeats: Vec<Repeat>,
}

/// Ordered rule list of a pattern-based kind, with the atom-name set derived
/// from the rules' named capture groups and repeat declarations.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
    atoms: Vec<&'static str>,
}

impl RuleSet {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        let mut atoms: Vec<&'static str> = vec![NORMAL_VALUE];
        for rule in &rules {
            for name in rule.regex.capture_names().flatten() {
                if !atoms.contains(&name) {
                    atoms.push(name);
                }
            }
            for repeat in &rule.repeats {
                if !atoms.contains(&repeat.name) {
                    atoms.push(repeat.name);
                }
            }
        }
        RuleSet { rules, atoms }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Atom names declared by this rule set, in declaration order.
    pub fn atoms(&self) -> &[&'static str] {
        &self.atoms
    }
}

// --- Processor trait ---------------------------------------------------------

/// A recognizer/normalizer for one value family.
///
/// Implementations are immutable singletons owned by the registry
/// (`engine/registry.rs`). A kind supplies its rule set, confidence weight
/// and conversion edges; the engine supplies matching, scoring, rendering
/// and derivation through the default methods.
pub trait Processor: Send + Sync {
    fn kind(&self) -> Kind;

    /// Match rules for pattern-based kinds. Kinds without rules (the reserved
    /// fallback) override the matching entry points instead.
    fn rule_set(&self) -> Option<&RuleSet> {
        None
    }

    fn default_confidence(&self) -> f32 {
        confidence::NORMAL
    }

    /// Full atom-name set this kind can produce.
    fn atom_names(&self) -> &[&'static str] {
        match self.rule_set() {
            Some(set) => set.atoms(),
            None => VALUE_ONLY,
        }
    }

    /// Subset of `atom_names` that determines cache identity and equality.
    fn value_atoms(&self) -> &[&'static str] {
        self.atom_names()
    }

    /// Kinds this one can convert its own values into (authored conversions).
    fn converts_to(&self) -> &[Kind] {
        &[]
    }

    /// Kinds whose values can be used to construct values of this kind.
    /// The edge graph may be cyclic; resolution carries a visited set.
    fn creatable_from(&self) -> &[Kind] {
        &[]
    }

    /// Pure normalization applied before matching. Identity by default.
    fn prepare_value(&self, text: &str) -> String {
        text.to_string()
    }

    /// Kind-specific canonicalization applied after extraction.
    fn normalize_values(&self, _values: &mut AtomMap) {}

    /// Template used when none is supplied: the first rule's template.
    fn default_template(&self) -> &'static str {
        self.rule_set()
            .and_then(|set| set.rules().first())
            .map(|rule| rule.template)
            .unwrap_or("${value}")
    }

    /// Extract named atoms from `text`.
    ///
    /// Every declared atom name is seeded as absent, the canonical rendering
    /// is recorded under [`NORMAL_VALUE`], the first matching rule's captures
    /// are merged in, and `normalize_values` runs as a post-pass. Matching is
    /// performed against the canonical text, which is what makes atomization
    /// idempotent.
    fn atomize(&self, text: &str) -> AtomMap {
        let mut map = AtomMap::new();
        for name in self.atom_names() {
            map.insert((*name).to_string(), None);
        }
        let canonical = self.format_value(text);
        map.insert(NORMAL_VALUE.to_string(), canonical.clone());
        if let (Some(canonical), Some(set)) = (canonical, self.rule_set()) {
            for rule in set.rules() {
                if let Some(caps) = rule.regex.captures(&canonical) {
                    crate::engine::pattern::merge_captures(&mut map, rule, &caps);
                    break;
                }
            }
        }
        self.normalize_values(&mut map);
        map
    }

    /// Canonicalize `text`: extract under the first matching rule and render
    /// back through that rule's own template. `None` when no rule matches.
    fn format_value(&self, text: &str) -> Option<String> {
        let Some(set) = self.rule_set() else {
            return Some(text.trim().to_string());
        };
        let working = self.prepare_value(text);
        for rule in set.rules() {
            if let Some(caps) = rule.regex.captures(&working) {
                let mut values = crate::engine::pattern::capture_map(rule, &caps);
                self.normalize_values(&mut values);
                return Some(crate::engine::pattern::render(rule.template, &values));
            }
        }
        None
    }

    /// Render an atom map through `template` (default: the kind's own).
    fn format_map(&self, values: &AtomMap, template: Option<&str>) -> String {
        crate::engine::pattern::render(
            template.unwrap_or_else(|| self.default_template()),
            values,
        )
    }

    /// Match quality of this kind against `text`; `None` when the text is
    /// empty or no rule finds meaningful content.
    fn score(&self, text: &str) -> Option<Score> {
        let set = self.rule_set()?;
        if text.is_empty() {
            return None;
        }
        let working = self.prepare_value(text);
        crate::engine::score::score_rules(
            set.rules(),
            &working,
            text.len(),
            self.default_confidence(),
        )
    }

    /// Acceptance predicate for bulk writes and construction: the map must
    /// carry every key in `value_atoms`.
    fn accepts_map(&self, values: &AtomMap) -> bool {
        self.value_atoms().iter().all(|name| values.contains_key(*name))
    }

    /// Lexical comparison over `value_atoms` in declared order. Numeric
    /// kinds override with numeric comparison.
    fn compare_maps(&self, left: &AtomMap, right: &AtomMap) -> Ordering {
        for name in self.value_atoms() {
            let l = left.get(*name).and_then(|v| v.as_deref()).unwrap_or("");
            let r = right.get(*name).and_then(|v| v.as_deref()).unwrap_or("");
            match l.cmp(r) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Kind-specific shortcut consulted before the generic derivation path
    /// (the numeric family re-parses the shared `number` atom here).
    fn direct_create(&self, _source: &mut Atoms) -> Option<Atoms> {
        None
    }

    /// Authored conversion toward a kind listed in `converts_to`.
    fn convert_to(&self, _target: Kind, _source: &mut Atoms) -> Option<Atoms> {
        None
    }
}

impl fmt::Debug for dyn Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor").field("kind", &self.kind()).finish()
    }
}
