use axum::http::Method;
use serde_json::json;

use nihongo_flashcards::api::client::{DELETED, PROGRESS_RECORDED};
use nihongo_flashcards::models::{FlashcardDraft, VocabularyRecord};

mod common;

use common::{card_json, unreachable_api, MockService};

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn list_all_returns_every_record() {
    let mock = MockService::new()
        .json(
            Method::GET,
            "/Flashcards",
            200,
            json!([card_json(1, "ねこ", "貓", 0, 1), card_json(2, "いぬ", "狗", 0, 1)]),
        )
        .start()
        .await;

    let response = mock.api().list_all().await;
    assert!(response.success);
    let cards = response.data.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].meaning.as_deref(), Some("狗"));

    let request = mock.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/Flashcards");
    assert_eq!(request.query, None);
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn single_object_is_normalized_to_list() {
    let mock = MockService::new()
        .json(Method::GET, "/Flashcards", 200, card_json(9, "みず", "水", 11, 1))
        .start()
        .await;

    let cards = mock.api().list_all().await.into_data().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, 9);
}

#[tokio::test]
async fn http_failure_becomes_envelope() {
    let mock = MockService::new()
        .route(Method::GET, "/Flashcards", 500, "oops")
        .start()
        .await;

    let response = mock.api().list_all().await;
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error.as_deref(), Some("HTTP error! status: 500"));
}

#[tokio::test]
async fn unreachable_host_becomes_envelope() {
    let response = unreachable_api().list_all().await;
    assert!(!response.success);
    assert!(!response.error.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_failure_not_a_panic() {
    let mock = MockService::new()
        .route(Method::GET, "/Flashcards", 200, "not json")
        .start()
        .await;

    let response = mock.api().list_all().await;
    assert!(!response.success);
    assert!(response.error.unwrap().starts_with("invalid response body"));
}

#[tokio::test]
async fn category_name_resolves_to_code() {
    let mock = MockService::new()
        .json(Method::GET, "/Flashcards", 200, json!([card_json(1, "こんにちは", "你好", 1, 1)]))
        .start()
        .await;
    let api = mock.api();

    assert!(api.list_by_category("greetings").await.success);
    assert_eq!(mock.last_request().query.as_deref(), Some("Category=1"));

    assert!(api.list_by_category("not-a-real-category").await.success);
    let request = mock.last_request();
    assert_eq!(request.path, "/api/Flashcards");
    assert_eq!(request.query, None);
}

#[tokio::test]
async fn difficulty_name_resolves_to_code() {
    let mock = MockService::new()
        .json(Method::GET, "/Flashcards", 200, json!([]))
        .start()
        .await;
    let api = mock.api();

    let response = api.list_by_difficulty("advanced").await;
    assert_eq!(response.data, Some(Vec::new()));
    assert_eq!(mock.last_request().query.as_deref(), Some("Difficulty=4"));

    api.list_by_difficulty("hard").await;
    assert_eq!(mock.last_request().query, None);
}

#[tokio::test]
async fn random_sample_query_shape() {
    let mock = MockService::new()
        .json(Method::GET, "/Flashcards/random", 200, json!([card_json(3, "あか", "紅色", 4, 1)]))
        .start()
        .await;
    let api = mock.api();

    api.list_random(None, None, None).await;
    assert_eq!(mock.last_request().query.as_deref(), Some("count=5"));

    api.list_random(Some(10), Some("colors"), Some("intermediate")).await;
    assert_eq!(
        mock.last_request().query.as_deref(),
        Some("count=10&category=4&difficulty=3")
    );

    let response = api.list_random(Some(3), Some("all"), Some("unknown")).await;
    assert!(response.success);
    assert_eq!(mock.last_request().query.as_deref(), Some("count=3"));
}

#[tokio::test]
async fn server_side_lookup_lists() {
    let mock = MockService::new()
        .json(Method::GET, "/Flashcards/categories", 200, json!(["basic", "greetings"]))
        .json(Method::GET, "/Flashcards/difficulties", 200, json!([{ "id": 1, "name": "beginner" }]))
        .start()
        .await;
    let api = mock.api();

    let categories = api.list_categories().await.into_data().unwrap();
    assert_eq!(categories, vec![json!("basic"), json!("greetings")]);

    let difficulties = api.list_difficulties().await.into_data().unwrap();
    assert_eq!(difficulties[0]["name"], "beginner");
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn record_progress_posts_to_review() {
    let mock = MockService::new()
        .route(Method::POST, "/Flashcards/42/review", 200, "")
        .start()
        .await;

    let response = mock.api().record_progress(42).await;
    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some(PROGRESS_RECORDED));

    let request = mock.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/Flashcards/42/review");
}

#[tokio::test]
async fn record_progress_not_found_is_soft_failure() {
    let mock = MockService::new().start().await;

    let response = mock.api().record_progress(42).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("HTTP error! status: 404"));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn create_sends_normalized_body() {
    let mut created = card_json(77, "こんにちは", "你好", 1, 1);
    created["kanji"] = json!("");
    let mock = MockService::new()
        .json(Method::POST, "/Flashcards", 201, created)
        .start()
        .await;

    let draft = FlashcardDraft {
        meaning: Some("你好".into()),
        hiragana: Some("  こんにちは  ".into()),
        word_type: Some(0),
        difficulty: Some(1),
        category: Some(1),
        ..Default::default()
    };
    let response = mock.api().create(&draft).await;
    assert!(response.success);
    assert_eq!(response.data.unwrap().id, 77);

    let body = mock.last_request().body.unwrap();
    assert_eq!(body["hiragana"], "こんにちは");
    assert_eq!(body["kanji"], "");
    assert_eq!(body["katakana"], "");
    assert_eq!(body["example"], "");
    assert_eq!(body["meaning"], "你好");
    assert_eq!(body["wordType"], 0);
    assert_eq!(body["difficulty"], 1);
    assert_eq!(body["category"], 1);
    assert_eq!(body["reviewCount"], 0);
    assert_eq!(body["isFavorite"], false);
    assert!(body["lastReviewedDate"].is_null());
    assert!(body["createdDate"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn create_missing_codes_sends_zeroes() {
    let mock = MockService::new()
        .json(Method::POST, "/Flashcards", 200, card_json(5, "", "水", 0, 0))
        .start()
        .await;

    let draft = FlashcardDraft {
        meaning: Some("水".into()),
        kanji: Some("水".into()),
        ..Default::default()
    };
    assert!(mock.api().create(&draft).await.success);

    let body = mock.last_request().body.unwrap();
    assert_eq!(body["category"], 0);
    assert_eq!(body["difficulty"], 0);
    assert_eq!(body["wordType"], 0);
}

#[tokio::test]
async fn create_validation_errors_are_rendered() {
    let mock = MockService::new()
        .json(Method::POST, "/Flashcards", 422, json!({ "errors": { "meaning": ["required"] } }))
        .start()
        .await;

    let response = mock.api().create(&FlashcardDraft::default()).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("驗證錯誤:\nmeaning: required"));
}

#[tokio::test]
async fn create_prefers_title_then_message_then_status() {
    let titled = MockService::new()
        .json(
            Method::POST,
            "/Flashcards",
            400,
            json!({ "title": "Bad card", "errors": { "kanji": ["too long"] } }),
        )
        .start()
        .await;
    let response = titled.api().create(&FlashcardDraft::default()).await;
    assert_eq!(response.error.as_deref(), Some("Bad card"));

    let messaged = MockService::new()
        .json(Method::POST, "/Flashcards", 409, json!({ "message": "duplicate" }))
        .start()
        .await;
    let response = messaged.api().create(&FlashcardDraft::default()).await;
    assert_eq!(response.error.as_deref(), Some("duplicate"));

    let garbled = MockService::new()
        .route(Method::POST, "/Flashcards", 500, "<html>")
        .start()
        .await;
    let response = garbled.api().create(&FlashcardDraft::default()).await;
    assert_eq!(response.error.as_deref(), Some("創建失敗：HTTP 500"));
}

#[tokio::test]
async fn create_against_unreachable_host() {
    let draft = FlashcardDraft {
        meaning: Some("你好".into()),
        hiragana: Some("こんにちは".into()),
        ..Default::default()
    };
    let response = unreachable_api().create(&draft).await;
    assert!(!response.success);
    assert!(response.error.is_some());
}

#[tokio::test]
async fn update_puts_editable_fields() {
    let mut updated = card_json(3, "すみません", "不好意思", 1, 2);
    updated["isFavorite"] = json!(true);
    let mock = MockService::new()
        .json(Method::PUT, "/Flashcards/3", 200, updated)
        .start()
        .await;

    let record: VocabularyRecord =
        serde_json::from_value(card_json(3, "すみません", "不好意思", 1, 2)).unwrap();
    let response = mock.api().update(&record).await;
    assert!(response.data.unwrap().is_favorite);

    let request = mock.last_request();
    assert_eq!(request.method, Method::PUT);
    let body = request.body.unwrap();
    assert_eq!(body["meaning"], "不好意思");
    assert_eq!(body["difficulty"], 2);
    assert!(body.get("id").is_none());
    assert!(body.get("reviewCount").is_none());
}

#[tokio::test]
async fn update_failure_uses_status_fallback() {
    let mock = MockService::new().start().await;
    let record: VocabularyRecord = serde_json::from_value(card_json(3, "a", "b", 0, 1)).unwrap();

    let response = mock.api().update(&record).await;
    assert_eq!(response.error.as_deref(), Some("更新失敗：HTTP 404"));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let mock = MockService::new()
        .route(Method::DELETE, "/Flashcards/8", 204, "")
        .start()
        .await;
    let api = mock.api();

    let response = api.delete(8).await;
    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some(DELETED));
    assert_eq!(mock.last_request().method, Method::DELETE);

    let response = api.delete(9).await;
    assert!(!response.success);
}
