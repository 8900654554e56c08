//! Capture extraction and canonical-template rendering.
//!
//! Pure helpers shared by the `Processor` default methods. A rule's captures
//! become atoms; a rule's template turns atoms back into canonical text.
//! Substitution is a single pass and non-recursive: a `${name}` token whose
//! atom is absent (or unknown) renders as the empty string.

use regex::Captures;

use crate::{AtomMap, PatternRule};

/// Build an atom map from a successful match of `rule`.
///
/// Named groups that did not participate are recorded as absent. Repeat
/// declarations then expand their group's span into `name`, `name.<i>` and
/// `name.count` atoms.
pub(crate) fn capture_map(rule: &PatternRule, caps: &Captures<'_>) -> AtomMap {
    let mut map = AtomMap::new();
    merge_captures(&mut map, rule, caps);
    map
}

/// Merge the captures of `rule` into an existing atom map, overwriting any
/// atoms that were already present.
pub(crate) fn merge_captures(map: &mut AtomMap, rule: &PatternRule, caps: &Captures<'_>) {
    for name in rule.regex.capture_names().flatten() {
        map.insert(name.to_string(), caps.name(name).map(|m| m.as_str().to_string()));
    }
    for repeat in &rule.repeats {
        let Some(span) = caps.name(repeat.within) else {
            map.entry(repeat.name.to_string()).or_insert(None);
            continue;
        };
        let occurrences: Vec<&str> =
            repeat.element.find_iter(span.as_str()).map(|m| m.as_str()).collect();
        map.insert(repeat.name.to_string(), occurrences.first().map(|s| s.to_string()));
        if occurrences.len() > 1 {
            for (i, occurrence) in occurrences.iter().enumerate() {
                map.insert(format!("{}.{i}", repeat.name), Some(occurrence.to_string()));
            }
            map.insert(format!("{}.count", repeat.name), Some(occurrences.len().to_string()));
        }
    }
}

/// Substitute every `${name}` token in `template` with the atom's current
/// value. Single pass, no escaping, no nesting; an unterminated token is
/// kept literally.
pub(crate) fn render(template: &str, values: &AtomMap) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if let Some(Some(value)) = values.get(name) {
                    out.push_str(value);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Option<&str>)]) -> AtomMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.map(str::to_string))).collect()
    }

    #[test]
    fn render_substitutes_known_names() {
        let values = map(&[("sign", Some("$")), ("number", Some("12"))]);
        assert_eq!(render("${sign}${number}!", &values), "$12!");
    }

    #[test]
    fn render_blanks_absent_and_unknown_names() {
        let values = map(&[("number", None)]);
        assert_eq!(render("<${number}><${missing}>", &values), "<><>");
    }

    #[test]
    fn render_keeps_unterminated_token_literal() {
        let values = map(&[("number", Some("7"))]);
        assert_eq!(render("${number} then ${broken", &values), "7 then ${broken");
    }

    #[test]
    fn capture_map_records_non_participating_groups_as_absent() {
        let rule = pattern_rule! {
            regex: r"(?<number>[0-9]+)(?:[.](?<decimal>[0-9]+))?",
            template: "${number}",
        };
        let caps = rule.regex.captures("42").unwrap();
        let values = capture_map(&rule, &caps);
        assert_eq!(values.get("number"), Some(&Some("42".to_string())));
        assert_eq!(values.get("decimal"), Some(&None));
    }

    #[test]
    fn repeats_produce_indexed_atoms_and_count() {
        let rule = pattern_rule! {
            regex: r"(?<words>(?:\w+\s*)+)",
            template: "${words}",
            repeats: [("word" in "words", r"\w+")],
        };
        let caps = rule.regex.captures("lorem ipsum dolor").unwrap();
        let values = capture_map(&rule, &caps);
        assert_eq!(values.get("word"), Some(&Some("lorem".to_string())));
        assert_eq!(values.get("word.1"), Some(&Some("ipsum".to_string())));
        assert_eq!(values.get("word.2"), Some(&Some("dolor".to_string())));
        assert_eq!(values.get("word.count"), Some(&Some("3".to_string())));
    }

    #[test]
    fn repeats_skip_indexing_for_single_occurrence() {
        let rule = pattern_rule! {
            regex: r"(?<words>(?:\w+\s*)+)",
            template: "${words}",
            repeats: [("word" in "words", r"\w+")],
        };
        let caps = rule.regex.captures("lorem").unwrap();
        let values = capture_map(&rule, &caps);
        assert_eq!(values.get("word"), Some(&Some("lorem".to_string())));
        assert!(!values.contains_key("word.0"));
        assert!(!values.contains_key("word.count"));
    }
}
