//! 学习会话
//!
//! 单页学习流程的状态：当前卡片列表、索引、翻面状态与已学习集合。
//! 读取失败（或返回空列表）时自动切换到内置范例资料，
//! 记录进度失败不会阻塞翻页。

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::FlashcardApi;
use crate::fallback;
use crate::format::{display_triple, CardFace};
use crate::mappings::ALL;
use crate::models::{ApiResponse, VocabularyRecord};

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Fallback,
}

/// 加载状态机：`Loading → Loaded | Failed`，`Failed` 立即转入以范例资料填充的 `Loaded`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(DataSource),
    Failed(String),
}

/// 本次加载使用的筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection<'a> {
    All,
    Category(&'a str),
    Difficulty(&'a str),
}

pub struct StudySession {
    api: FlashcardApi,
    cards: Vec<VocabularyRecord>,
    current_index: usize,
    is_flipped: bool,
    studied: HashSet<i64>,
    state: LoadState,
    notice: Option<String>,
    selected_category: String,
    selected_difficulty: String,
}

impl StudySession {
    pub fn new(api: FlashcardApi) -> Self {
        Self {
            api,
            cards: Vec::new(),
            current_index: 0,
            is_flipped: false,
            studied: HashSet::new(),
            state: LoadState::Loading,
            notice: None,
            selected_category: ALL.to_string(),
            selected_difficulty: ALL.to_string(),
        }
    }

    // ========== 加载 ==========

    /// 加载全部卡片（也用作手动重新加载）
    pub async fn load_all(&mut self) {
        self.load(Selection::All).await;
    }

    /// 切换分类；`"all"` 表示不筛选
    pub async fn select_category(&mut self, category: &str) {
        self.selected_category = category.to_string();
        let selection = if category == ALL {
            Selection::All
        } else {
            Selection::Category(category)
        };
        self.load(selection).await;
    }

    /// 切换难度；`"all"` 表示不筛选
    pub async fn select_difficulty(&mut self, difficulty: &str) {
        self.selected_difficulty = difficulty.to_string();
        let selection = if difficulty == ALL {
            Selection::All
        } else {
            Selection::Difficulty(difficulty)
        };
        self.load(selection).await;
    }

    async fn load(&mut self, selection: Selection<'_>) {
        self.transition(LoadState::Loading);
        self.notice = None;
        self.reset();

        let response = match selection {
            Selection::All => self.api.list_all().await,
            Selection::Category(name) => self.api.list_by_category(name).await,
            Selection::Difficulty(name) => self.api.list_by_difficulty(name).await,
        };

        match response.into_data() {
            Some(cards) if !cards.is_empty() => {
                self.cards = cards;
                self.transition(LoadState::Loaded(DataSource::Remote));
            }
            Some(_) => self.fall_back(selection, "沒有找到單字卡".to_string()),
            None => self.fall_back(selection, "載入單字卡失敗，使用範例資料".to_string()),
        }
    }

    fn fall_back(&mut self, selection: Selection<'_>, notice: String) {
        self.transition(LoadState::Failed(notice.clone()));

        let samples = fallback::sample_flashcards();
        self.cards = match selection {
            Selection::All => samples.to_vec(),
            Selection::Category(name) => fallback::filter_by_category(samples, name),
            Selection::Difficulty(name) => fallback::filter_by_difficulty(samples, name),
        };
        self.notice = Some(notice);
        self.transition(LoadState::Loaded(DataSource::Fallback));
    }

    fn transition(&mut self, next: LoadState) {
        debug!(from = ?self.state, to = ?next, "study session state");
        if let LoadState::Failed(reason) = &next {
            warn!(reason = %reason, "remote load failed, switching to sample cards");
        }
        self.state = next;
    }

    // ========== 导航 ==========

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    /// 标记当前卡片为已学习并上报进度，然后前进一张（停在最后一张）。
    ///
    /// 返回进度上报结果；无论成功与否都会翻页。
    pub async fn next(&mut self) -> Option<ApiResponse<()>> {
        let progress = match self.cards.get(self.current_index) {
            Some(card) => {
                let id = card.id;
                self.studied.insert(id);
                let response = self.api.record_progress(id).await;
                if !response.is_success() {
                    warn!(card_id = id, error = ?response.error_message(), "progress not recorded");
                }
                Some(response)
            }
            None => None,
        };

        self.is_flipped = false;
        if self.current_index + 1 < self.cards.len() {
            self.current_index += 1;
        }
        progress
    }

    pub fn previous(&mut self) {
        self.is_flipped = false;
        self.current_index = self.current_index.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.is_flipped = false;
        self.studied.clear();
    }

    // ========== 查询 ==========

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn source(&self) -> Option<DataSource> {
        match self.state {
            LoadState::Loaded(source) => Some(source),
            _ => None,
        }
    }

    /// 单行提示（使用范例资料时）
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn cards(&self) -> &[VocabularyRecord] {
        &self.cards
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn current_card(&self) -> Option<&VocabularyRecord> {
        self.cards.get(self.current_index)
    }

    pub fn current_face(&self) -> Option<CardFace> {
        self.current_card().map(display_triple)
    }

    pub fn studied_count(&self) -> usize {
        self.studied.len()
    }

    pub fn is_studied(&self, id: i64) -> bool {
        self.studied.contains(&id)
    }

    /// 已学习比例（0-100），空列表为 0
    pub fn progress_percent(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.studied.len() as f64 / self.cards.len() as f64 * 100.0
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn selected_difficulty(&self) -> &str {
        &self.selected_difficulty
    }
}
