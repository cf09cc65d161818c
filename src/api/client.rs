use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::{rejection_from_body, ApiError};
use crate::config::Config;
use crate::mappings::{self, CodeTable};
use crate::models::{ApiResponse, FlashcardDraft, UpdateFlashcardRequest, VocabularyRecord};

pub const DEFAULT_RANDOM_COUNT: u32 = 5;
pub const PROGRESS_RECORDED: &str = "進度記錄成功";
pub const DELETED: &str = "單字卡刪除成功";

/// Client for the remote `/Flashcards` service.
///
/// Every operation returns an [`ApiResponse`]; transport, HTTP and
/// validation failures are all folded into `success: false` with a
/// displayable `error`. Holds no session state, so clones are cheap and
/// calls are independent of each other.
#[derive(Debug, Clone)]
pub struct FlashcardApi {
    flashcards_url: String,
    client: reqwest::Client,
}

impl FlashcardApi {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            flashcards_url: config.flashcards_url(),
            client,
        }
    }

    pub fn from_env() -> Self {
        Self::new(&Config::from_env())
    }

    pub fn flashcards_url(&self) -> &str {
        &self.flashcards_url
    }

    pub async fn list_all(&self) -> ApiResponse<Vec<VocabularyRecord>> {
        info!(url = %self.flashcards_url, "loading flashcards");
        let request = self.client.get(&self.flashcards_url);
        envelope("list_all", self.fetch_records(request).await)
    }

    /// Unknown category names fall back to [`list_all`](Self::list_all).
    pub async fn list_by_category(&self, category: &str) -> ApiResponse<Vec<VocabularyRecord>> {
        self.list_filtered("list_by_category", mappings::categories(), "Category", category)
            .await
    }

    /// Unknown difficulty names fall back to [`list_all`](Self::list_all).
    pub async fn list_by_difficulty(&self, difficulty: &str) -> ApiResponse<Vec<VocabularyRecord>> {
        self.list_filtered("list_by_difficulty", mappings::difficulties(), "Difficulty", difficulty)
            .await
    }

    async fn list_filtered(
        &self,
        operation: &'static str,
        table: &CodeTable,
        param: &str,
        name: &str,
    ) -> ApiResponse<Vec<VocabularyRecord>> {
        let Some(code) = table.code_of(name) else {
            debug!(operation, name, "unknown filter name, listing all");
            return self.list_all().await;
        };

        let request = self
            .client
            .get(&self.flashcards_url)
            .query(&[(param, code)]);
        envelope(operation, self.fetch_records(request).await)
    }

    /// Server-side random sample. `"all"` and unknown names are left out of
    /// the query instead of failing.
    pub async fn list_random(
        &self,
        count: Option<u32>,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> ApiResponse<Vec<VocabularyRecord>> {
        let count = count.unwrap_or(DEFAULT_RANDOM_COUNT);
        let mut query: Vec<(&str, i64)> = vec![("count", i64::from(count))];
        if let Some(code) = mappings::categories().resolve_filter(category) {
            query.push(("category", i64::from(code)));
        }
        if let Some(code) = mappings::difficulties().resolve_filter(difficulty) {
            query.push(("difficulty", i64::from(code)));
        }

        let request = self
            .client
            .get(format!("{}/random", self.flashcards_url))
            .query(&query);
        envelope("list_random", self.fetch_records(request).await)
    }

    /// Best-effort review bump. Callers should never gate navigation on it.
    pub async fn record_progress(&self, id: i64) -> ApiResponse<()> {
        let request = self.client.post(format!("{}/{id}/review", self.flashcards_url));
        let result = self.send(request).await.map(|_| ());
        match envelope("record_progress", result) {
            resp if resp.is_success() => ApiResponse::done(PROGRESS_RECORDED),
            resp => resp,
        }
    }

    pub async fn create(&self, draft: &FlashcardDraft) -> ApiResponse<VocabularyRecord> {
        let body = draft.to_request(Utc::now());
        debug!(?body, "creating flashcard");

        let request = self.client.post(&self.flashcards_url).json(&body);
        let result = match request.send().await {
            Ok(response) => write_result(response, "創建失敗").await,
            Err(err) => Err(ApiError::Transport(err)),
        };
        envelope("create", result)
    }

    /// Full replace of the editable fields of `record`.
    pub async fn update(&self, record: &VocabularyRecord) -> ApiResponse<VocabularyRecord> {
        let body = UpdateFlashcardRequest::from(record);
        let request = self
            .client
            .put(format!("{}/{}", self.flashcards_url, record.id))
            .json(&body);
        let result = match request.send().await {
            Ok(response) => write_result(response, "更新失敗").await,
            Err(err) => Err(ApiError::Transport(err)),
        };
        envelope("update", result)
    }

    pub async fn delete(&self, id: i64) -> ApiResponse<()> {
        let request = self.client.delete(format!("{}/{id}", self.flashcards_url));
        let result = self.send(request).await.map(|_| ());
        match envelope("delete", result) {
            resp if resp.is_success() => ApiResponse::done(DELETED),
            resp => resp,
        }
    }

    pub async fn list_categories(&self) -> ApiResponse<Vec<Value>> {
        let request = self.client.get(format!("{}/categories", self.flashcards_url));
        envelope("list_categories", self.fetch_json(request).await)
    }

    pub async fn list_difficulties(&self) -> ApiResponse<Vec<Value>> {
        let request = self.client.get(format!("{}/difficulties", self.flashcards_url));
        envelope("list_difficulties", self.fetch_json(request).await)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "flashcard api response");
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::HttpStatus(status))
        }
    }

    async fn fetch_records(&self, request: RequestBuilder) -> Result<Vec<VocabularyRecord>, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        one_or_many(value)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Arrays pass through; a lone object becomes a one-element list.
fn one_or_many<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

async fn write_result(response: Response, failure_prefix: &str) -> Result<VocabularyRecord, ApiError> {
    let status = response.status();
    debug!(status = status.as_u16(), "flashcard write response");

    if status.is_success() {
        let bytes = response.bytes().await?;
        return Ok(serde_json::from_slice(&bytes)?);
    }

    let fallback = format!("{failure_prefix}：HTTP {}", status.as_u16());
    match response.bytes().await {
        Ok(body) => Err(rejection_from_body(&body, fallback)),
        Err(err) => {
            debug!(error = %err, "failed to read error body");
            Err(ApiError::Rejected(fallback))
        }
    }
}

fn envelope<T>(operation: &'static str, result: Result<T, ApiError>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(err) => {
            warn!(operation, error = %err, "flashcard request failed");
            ApiResponse::failure(err.to_string())
        }
    }
}
