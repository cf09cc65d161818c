//! 数据模型定义
//!
//! 远端单字卡服务的记录结构、创建草稿，以及所有数据访问操作共用的响应信封。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// VocabularyRecord - 单字卡记录
// ============================================================

/// 单字卡记录（服务端为准，客户端只持有临时副本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    /// 服务端分配的唯一标识
    pub id: i64,
    /// 汉字表记
    #[serde(default)]
    pub kanji: Option<String>,
    /// 平假名表记
    #[serde(default)]
    pub hiragana: Option<String>,
    /// 片假名表记
    #[serde(default)]
    pub katakana: Option<String>,
    /// 中文意义
    #[serde(default)]
    pub meaning: Option<String>,
    /// 例句
    #[serde(default)]
    pub example: Option<String>,
    /// 单字类型 (0-3)
    #[serde(default)]
    pub word_type: i32,
    /// 难易度 (1-4)
    #[serde(default)]
    pub difficulty: i32,
    /// 分类 (0-11)
    #[serde(default)]
    pub category: i32,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub last_reviewed_date: Option<String>,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub is_favorite: bool,
}

// ============================================================
// FlashcardDraft - 创建草稿
// ============================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("中文意義為必填項目")]
    MissingMeaning,

    #[error("至少需要填寫一種日文表記（漢字、平假名或片假名）")]
    MissingJapanese,
}

/// 新单字卡草稿，所有文字字段均可省略
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDraft {
    pub kanji: Option<String>,
    pub hiragana: Option<String>,
    pub katakana: Option<String>,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub word_type: Option<i32>,
    pub difficulty: Option<i32>,
    pub category: Option<i32>,
}

impl FlashcardDraft {
    /// 表单层校验：中文意义必填，且至少有一种日文表记。
    ///
    /// 数据访问层本身不调用此方法。
    pub fn validate(&self) -> Result<(), DraftError> {
        if is_blank(&self.meaning) {
            return Err(DraftError::MissingMeaning);
        }
        if is_blank(&self.kanji) && is_blank(&self.hiragana) && is_blank(&self.katakana) {
            return Err(DraftError::MissingJapanese);
        }
        Ok(())
    }

    /// 规范化为创建请求体
    pub fn to_request(&self, now: DateTime<Utc>) -> CreateFlashcardRequest {
        CreateFlashcardRequest {
            kanji: trimmed(&self.kanji),
            hiragana: trimmed(&self.hiragana),
            katakana: trimmed(&self.katakana),
            meaning: trimmed(&self.meaning),
            example: trimmed(&self.example),
            word_type: self.word_type.unwrap_or(0),
            difficulty: self.difficulty.unwrap_or(0),
            category: self.category.unwrap_or(0),
            review_count: 0,
            is_favorite: false,
            created_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            last_reviewed_date: None,
        }
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// POST /Flashcards 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashcardRequest {
    pub kanji: String,
    pub hiragana: String,
    pub katakana: String,
    pub meaning: String,
    pub example: String,
    pub word_type: i32,
    pub difficulty: i32,
    pub category: i32,
    pub review_count: i32,
    pub is_favorite: bool,
    pub created_date: String,
    pub last_reviewed_date: Option<String>,
}

/// PUT /Flashcards/{id} 请求体，服务端维护的字段不发送
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlashcardRequest<'a> {
    pub kanji: Option<&'a str>,
    pub hiragana: Option<&'a str>,
    pub katakana: Option<&'a str>,
    pub meaning: Option<&'a str>,
    pub example: Option<&'a str>,
    pub word_type: i32,
    pub difficulty: i32,
    pub category: i32,
    pub is_favorite: bool,
}

impl<'a> From<&'a VocabularyRecord> for UpdateFlashcardRequest<'a> {
    fn from(record: &'a VocabularyRecord) -> Self {
        Self {
            kanji: record.kanji.as_deref(),
            hiragana: record.hiragana.as_deref(),
            katakana: record.katakana.as_deref(),
            meaning: record.meaning.as_deref(),
            example: record.example.as_deref(),
            word_type: record.word_type,
            difficulty: record.difficulty,
            category: record.category,
            is_favorite: record.is_favorite,
        }
    }
}

// ============================================================
// ApiResponse - 统一响应信封
// ============================================================

/// 每个数据访问操作的统一返回值
///
/// `success = true` 时带 `data`（无返回值的操作只带 `message`），
/// `success = false` 时 `error` 为可直接展示的描述。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// 无数据的成功响应
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 成功时取出数据
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
