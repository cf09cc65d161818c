//! 单字卡管理
//!
//! 列表搜索与分类筛选、乐观删除、编辑保存，以及创建表单提交。

use tracing::{info, warn};

use crate::api::FlashcardApi;
use crate::models::{ApiResponse, FlashcardDraft, VocabularyRecord};

/// 操作结果提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// 搜索词为空时全部匹配，否则匹配汉字、平假名、片假名或中文意义中的子串
pub fn matches_search(card: &VocabularyRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    [&card.kanji, &card.hiragana, &card.katakana, &card.meaning]
        .into_iter()
        .flatten()
        .any(|text| text.contains(term))
}

pub struct CardManager {
    api: FlashcardApi,
    cards: Vec<VocabularyRecord>,
    notice: Option<Notice>,
}

impl CardManager {
    pub fn new(api: FlashcardApi) -> Self {
        Self {
            api,
            cards: Vec::new(),
            notice: None,
        }
    }

    pub fn cards(&self) -> &[VocabularyRecord] {
        &self.cards
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// 加载失败时保留现有列表并显示提示
    pub async fn load(&mut self) {
        let response = self.api.list_all().await;
        match response.into_data() {
            Some(cards) => {
                info!(count = cards.len(), "flashcards loaded for management");
                self.cards = cards;
            }
            None => self.notice = Some(Notice::Error("載入單字卡失敗".to_string())),
        }
    }

    /// 按搜索词与分类代码筛选，`category = None` 表示全部分类
    pub fn filtered(&self, search: &str, category: Option<i32>) -> Vec<&VocabularyRecord> {
        self.cards
            .iter()
            .filter(|card| matches_search(card, search))
            .filter(|card| category.map_or(true, |code| card.category == code))
            .collect()
    }

    /// 乐观删除：先从本地列表移除，服务端失败时只显示提示，不回滚
    pub async fn delete(&mut self, id: i64) -> ApiResponse<()> {
        self.cards.retain(|card| card.id != id);

        let response = self.api.delete(id).await;
        self.notice = Some(match response.error_message() {
            None => Notice::Success("單字卡刪除成功".to_string()),
            Some(error) => {
                warn!(card_id = id, error, "delete failed, local list left as is");
                Notice::Error(format!("刪除失敗：{error}"))
            }
        });
        response
    }

    /// 保存编辑；成功时用服务端返回的记录替换本地副本，失败时本地不变
    pub async fn save_edit(&mut self, record: &VocabularyRecord) -> ApiResponse<VocabularyRecord> {
        let response = self.api.update(record).await;
        match (&response.data, response.error_message()) {
            (Some(updated), None) => {
                if let Some(slot) = self.cards.iter_mut().find(|card| card.id == updated.id) {
                    *slot = updated.clone();
                }
                self.notice = Some(Notice::Success("單字卡更新成功".to_string()));
            }
            (_, error) => {
                let error = error.unwrap_or("更新失敗");
                self.notice = Some(Notice::Error(format!("更新失敗：{error}")));
            }
        }
        response
    }

    /// 校验草稿后提交；校验失败不发出请求
    pub async fn create(&mut self, draft: &FlashcardDraft) -> ApiResponse<VocabularyRecord> {
        if let Err(err) = draft.validate() {
            self.notice = Some(Notice::Error(err.to_string()));
            return ApiResponse::failure(err.to_string());
        }

        let response = self.api.create(draft).await;
        match (&response.data, response.error_message()) {
            (Some(created), None) => {
                self.cards.push(created.clone());
                self.notice = Some(Notice::Success("單字卡創建成功！".to_string()));
            }
            (_, error) => {
                let error = error.unwrap_or("創建失敗");
                self.notice = Some(Notice::Error(error.to_string()));
            }
        }
        response
    }
}
