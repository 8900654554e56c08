//! Match quality and best-processor selection.
//!
//! A [`Score`] is ephemeral: it exists only while ranking candidates for one
//! piece of text. The combined rank is `coverage x confidence`; ties fall
//! back to confidence, then to the kind's static default weight, then to
//! registration order (the first candidate wins).

use crate::{PatternRule, Processor, ProcessorRef};

/// Match quality of one processor against one text value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Fraction of the input the processor found meaningful, in [0, 1].
    pub coverage: f32,
    /// The processor's trust in its own match.
    pub confidence: f32,
}

impl Score {
    /// Combined rank used for ordering.
    pub fn rank(&self) -> f32 {
        self.coverage * self.confidence
    }
}

/// Score `working` (already prepared) against an ordered rule list.
///
/// Coverage is the primary-match span over the raw input length, weighted by
/// the fraction of capture slots that captured non-empty content. The first
/// matching rule decides.
pub(crate) fn score_rules(
    rules: &[PatternRule],
    working: &str,
    source_len: usize,
    confidence: f32,
) -> Option<Score> {
    if source_len == 0 {
        return None;
    }
    for rule in rules {
        let Some(caps) = rule.regex.captures(working) else { continue };
        let primary_len = caps.get(0).map(|m| m.len()).unwrap_or(0);
        let mut slots = 0usize;
        let mut filled = 0usize;
        for group in caps.iter() {
            slots += 1;
            if group.is_some_and(|m| !m.is_empty()) {
                filled += 1;
            }
        }
        let primary = primary_len as f32 / source_len as f32;
        let captured = filled as f32 / slots as f32;
        return Some(Score { coverage: primary * captured, confidence });
    }
    None
}

/// Pick the best-scoring processor for `text` among `candidates`, or `None`
/// if nothing produced a score.
pub(crate) fn select_best(candidates: &[ProcessorRef], text: &str) -> Option<ProcessorRef> {
    let mut best: Option<(ProcessorRef, Score)> = None;
    for candidate in candidates {
        let Some(score) = candidate.score(text) else { continue };
        log::trace!(
            "score {}: coverage={:.3} confidence={:.3} rank={:.3}",
            candidate.kind().name(),
            score.coverage,
            score.confidence,
            score.rank()
        );
        best = match best {
            None => Some((candidate.clone(), score)),
            Some((incumbent, incumbent_score)) => {
                if beats(candidate, &score, &incumbent, &incumbent_score) {
                    Some((candidate.clone(), score))
                } else {
                    Some((incumbent, incumbent_score))
                }
            }
        };
    }
    best.map(|(processor, _)| processor)
}

/// Strict ordering between a challenger and the incumbent. Equality on every
/// criterion keeps the incumbent, which preserves registration order.
fn beats(
    challenger: &ProcessorRef,
    challenger_score: &Score,
    incumbent: &ProcessorRef,
    incumbent_score: &Score,
) -> bool {
    use std::cmp::Ordering::*;
    match challenger_score.rank().total_cmp(&incumbent_score.rank()) {
        Greater => return true,
        Less => return false,
        Equal => {}
    }
    match challenger_score.confidence.total_cmp(&incumbent_score.confidence) {
        Greater => return true,
        Less => return false,
        Equal => {}
    }
    challenger.default_confidence().total_cmp(&incumbent.default_confidence()) == Greater
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry;
    use crate::Kind;

    #[test]
    fn select_best_prefers_full_typed_matches() {
        let all = registry::all();
        assert_eq!(select_best(&all, "123").unwrap().kind(), Kind::Integer);
        assert_eq!(select_best(&all, "1.25").unwrap().kind(), Kind::Float);
        assert_eq!(select_best(&all, "$123.45").unwrap().kind(), Kind::Currency);
        assert_eq!(select_best(&all, "plain old text").unwrap().kind(), Kind::Words);
    }

    #[test]
    fn select_best_is_deterministic() {
        let all = registry::all();
        let first = select_best(&all, "$9.99").unwrap().kind();
        for _ in 0..10 {
            assert_eq!(select_best(&all, "$9.99").unwrap().kind(), first);
        }
    }

    #[test]
    fn pattern_kinds_never_score_empty_input() {
        for processor in registry::all() {
            if processor.kind() == Kind::Empty {
                continue;
            }
            assert!(processor.score("").is_none(), "kind {:?}", processor.kind());
        }
    }

    #[test]
    fn coverage_shrinks_with_unmatched_input() {
        let integer = registry::instance_of(Kind::Integer);
        let full = integer.score("123").unwrap();
        let partial = integer.score("123 and change").unwrap();
        assert!(full.rank() > partial.rank());
    }
}
