//! Category / difficulty code tables.
//!
//! The remote service only speaks integer codes. Human-readable names (used
//! for filters) and localized labels (used for display) live here, each table
//! built once per process and looked up in both directions.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/// Label returned for any code outside a table.
pub const UNKNOWN_LABEL: &str = "未知";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub code: i32,
    pub name: &'static str,
    pub label: &'static str,
}

const fn entry(code: i32, name: &'static str, label: &'static str) -> CodeEntry {
    CodeEntry { code, name, label }
}

const CATEGORY_ENTRIES: [CodeEntry; 12] = [
    entry(0, "basic", "基礎"),
    entry(1, "greetings", "問候語"),
    entry(2, "food", "食物"),
    entry(3, "numbers", "數字"),
    entry(4, "colors", "顏色"),
    entry(5, "family", "家庭"),
    entry(6, "time", "時間"),
    entry(7, "weather", "天氣"),
    entry(8, "transportation", "交通"),
    entry(9, "body", "身體"),
    entry(10, "school", "學校"),
    entry(11, "nature", "自然"),
];

const DIFFICULTY_ENTRIES: [CodeEntry; 4] = [
    entry(1, "beginner", "初級"),
    entry(2, "elementary", "初中級"),
    entry(3, "intermediate", "中級"),
    entry(4, "advanced", "高級"),
];

const WORD_TYPE_ENTRIES: [CodeEntry; 4] = [
    entry(0, "generic", "一般詞彙"),
    entry(1, "verb", "動詞"),
    entry(2, "adjective", "形容詞"),
    entry(3, "noun", "名詞"),
];

/// Bidirectional code table: code → entry and name → code.
#[derive(Debug)]
pub struct CodeTable {
    entries: &'static [CodeEntry],
    by_code: HashMap<i32, CodeEntry>,
    by_name: HashMap<&'static str, i32>,
}

impl CodeTable {
    fn build(entries: &'static [CodeEntry]) -> Self {
        let by_code = entries.iter().map(|e| (e.code, *e)).collect();
        let by_name = entries.iter().map(|e| (e.name, e.code)).collect();
        Self {
            entries,
            by_code,
            by_name,
        }
    }

    /// Resolves a filter name to its code. Matching is exact.
    pub fn code_of(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, code: i32) -> Option<&'static str> {
        self.by_code.get(&code).map(|e| e.name)
    }

    pub fn label_of(&self, code: i32) -> Option<&'static str> {
        self.by_code.get(&code).map(|e| e.label)
    }

    pub fn contains(&self, code: i32) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Entries in code order.
    pub fn entries(&self) -> &'static [CodeEntry] {
        self.entries
    }

    /// Resolves an optional filter selection. `None`, `"all"` and unknown
    /// names all resolve to `None`.
    pub fn resolve_filter(&self, selection: Option<&str>) -> Option<i32> {
        selection.filter(|s| *s != ALL).and_then(|s| self.code_of(s))
    }
}

static CATEGORIES: OnceLock<CodeTable> = OnceLock::new();
static DIFFICULTIES: OnceLock<CodeTable> = OnceLock::new();
static WORD_TYPES: OnceLock<CodeTable> = OnceLock::new();

pub fn categories() -> &'static CodeTable {
    CATEGORIES.get_or_init(|| CodeTable::build(&CATEGORY_ENTRIES))
}

pub fn difficulties() -> &'static CodeTable {
    DIFFICULTIES.get_or_init(|| CodeTable::build(&DIFFICULTY_ENTRIES))
}

pub fn word_types() -> &'static CodeTable {
    WORD_TYPES.get_or_init(|| CodeTable::build(&WORD_TYPE_ENTRIES))
}
