//! Reserved fallback for empty input. Never competes with pattern kinds:
//! it scores only when the text is empty, and selection falls back to it
//! when nothing else scores at all.

use crate::engine::Score;
use crate::{confidence, Kind, Processor};

pub(crate) struct EmptyValue;

impl Processor for EmptyValue {
    fn kind(&self) -> Kind {
        Kind::Empty
    }

    fn default_confidence(&self) -> f32 {
        confidence::FALLBACK
    }

    fn format_value(&self, _text: &str) -> Option<String> {
        Some(String::new())
    }

    fn score(&self, text: &str) -> Option<Score> {
        text.is_empty()
            .then_some(Score { coverage: confidence::HIGH, confidence: confidence::HIGH })
    }
}
