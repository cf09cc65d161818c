#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;

use nihongo_flashcards::{Config, FlashcardApi};

/// One request as seen by the mock service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<(Method, String), (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Canned remote vocabulary service bound to an ephemeral local port.
pub struct MockService {
    pub base_url: String,
    routes: HashMap<(Method, String), (StatusCode, String)>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            routes: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `path` is relative to the API base, e.g. `/Flashcards/random`.
    pub fn route(mut self, method: Method, path: &str, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.routes
            .insert((method, format!("/api{path}")), (status, body.into()));
        self
    }

    pub fn json(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.route(method, path, status, body.to_string())
    }

    pub async fn start(mut self) -> Self {
        let state = MockState {
            routes: Arc::new(self.routes.clone()),
            requests: Arc::clone(&self.requests),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        self.base_url = format!("http://{addr}/api");
        self
    }

    pub fn api(&self) -> FlashcardApi {
        FlashcardApi::new(&Config::with_base_url(self.base_url.clone()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock service")
    }
}

async fn handle(State(state): State<MockState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let header_text = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let recorded = RecordedRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(String::from),
        content_type: header_text(header::CONTENT_TYPE),
        accept: header_text(header::ACCEPT),
        body: serde_json::from_slice(&bytes).ok(),
    };
    state.requests.lock().unwrap().push(recorded);

    match state.routes.get(&(parts.method, parts.uri.path().to_string())) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Base URL nothing listens on.
pub fn unreachable_api() -> FlashcardApi {
    FlashcardApi::new(&Config::with_base_url("http://127.0.0.1:1/api"))
}

pub fn card_json(id: i64, hiragana: &str, meaning: &str, category: i32, difficulty: i32) -> Value {
    serde_json::json!({
        "id": id,
        "kanji": null,
        "hiragana": hiragana,
        "katakana": null,
        "meaning": meaning,
        "example": null,
        "wordType": 0,
        "difficulty": difficulty,
        "category": category,
        "createdDate": "2024-03-01T10:00:00Z",
        "lastReviewedDate": null,
        "reviewCount": 0,
        "isFavorite": false
    })
}
