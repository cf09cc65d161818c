//! Built-in sample cards shown when the remote service is unreachable or
//! returns nothing.

use std::sync::OnceLock;

use crate::mappings::{self, CodeTable, ALL};
use crate::models::VocabularyRecord;

const SAMPLE_CREATED_DATE: &str = "2024-01-01T00:00:00Z";

static SAMPLE_FLASHCARDS: OnceLock<Vec<VocabularyRecord>> = OnceLock::new();

fn greeting(id: i64, hiragana: &str, meaning: &str, example: &str, difficulty: i32) -> VocabularyRecord {
    VocabularyRecord {
        id,
        kanji: None,
        hiragana: Some(hiragana.to_string()),
        katakana: None,
        meaning: Some(meaning.to_string()),
        example: Some(example.to_string()),
        word_type: 0,
        difficulty,
        category: 1,
        created_date: SAMPLE_CREATED_DATE.to_string(),
        last_reviewed_date: None,
        review_count: 0,
        is_favorite: false,
    }
}

pub fn sample_flashcards() -> &'static [VocabularyRecord] {
    SAMPLE_FLASHCARDS.get_or_init(|| {
        vec![
            greeting(1, "こんにちは", "你好", "こんにちは、元気ですか？", 1),
            greeting(2, "ありがとう", "謝謝", "ありがとうございます。", 1),
            greeting(3, "すみません", "對不起", "すみません、遅れました。", 1),
            greeting(4, "はじめまして", "初次見面", "はじめまして、よろしくお願いします。", 2),
            greeting(5, "おはよう", "早安", "おはよう、今日もがんばろう。", 1),
        ]
    })
}

/// Filters by category name, resolving it the way `list_by_category` does:
/// `"all"` or an unknown name keeps every record.
pub fn filter_by_category(records: &[VocabularyRecord], name: &str) -> Vec<VocabularyRecord> {
    filter_by(records, mappings::categories(), name, |r| r.category)
}

/// Difficulty counterpart of [`filter_by_category`].
pub fn filter_by_difficulty(records: &[VocabularyRecord], name: &str) -> Vec<VocabularyRecord> {
    filter_by(records, mappings::difficulties(), name, |r| r.difficulty)
}

fn filter_by(
    records: &[VocabularyRecord],
    table: &CodeTable,
    name: &str,
    code_of: impl Fn(&VocabularyRecord) -> i32,
) -> Vec<VocabularyRecord> {
    let code = if name == ALL { None } else { table.code_of(name) };
    match code {
        Some(code) => records.iter().filter(|r| code_of(r) == code).cloned().collect(),
        None => records.to_vec(),
    }
}
