//! Display helpers. Pure functions, no I/O.

use serde::Serialize;

use crate::mappings::{self, UNKNOWN_LABEL};
use crate::models::VocabularyRecord;

/// Text shown on a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFace {
    pub front: String,
    pub back: String,
    pub reading: String,
}

/// Returns the first candidate that is present and non-empty, in order.
pub fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .flatten()
        .find(|value| !value.is_empty())
}

/// Front prefers kanji, then hiragana, then katakana. Reading prefers
/// hiragana over katakana.
pub fn display_triple(record: &VocabularyRecord) -> CardFace {
    let kanji = record.kanji.as_deref();
    let hiragana = record.hiragana.as_deref();
    let katakana = record.katakana.as_deref();

    let front = first_non_empty(&[kanji, hiragana, katakana]).unwrap_or_default();
    let back = first_non_empty(&[record.meaning.as_deref()]).unwrap_or_default();
    let reading = first_non_empty(&[hiragana, katakana]).unwrap_or_default();

    CardFace {
        front: front.to_string(),
        back: back.to_string(),
        reading: reading.to_string(),
    }
}

pub fn category_label(code: i32) -> &'static str {
    mappings::categories().label_of(code).unwrap_or(UNKNOWN_LABEL)
}

pub fn difficulty_label(code: i32) -> &'static str {
    mappings::difficulties().label_of(code).unwrap_or(UNKNOWN_LABEL)
}

pub fn word_type_label(code: i32) -> &'static str {
    mappings::word_types().label_of(code).unwrap_or(UNKNOWN_LABEL)
}
