use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failures inside the data-access layer. Never returned to callers
/// directly; every public operation renders them into an `ApiResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {}", .0.as_u16())]
    HttpStatus(reqwest::StatusCode),

    /// Structured field-level rejection, already rendered one field per line.
    #[error("驗證錯誤:\n{0}")]
    Validation(String),

    /// Server-supplied title or message, or the generic write failure text.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body shapes the service returns on rejected writes.
#[derive(Debug, Default, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    errors: Option<Map<String, Value>>,
    #[serde(default)]
    message: Option<String>,
}

/// Picks the most specific description out of a rejected write's body:
/// title, then field errors, then message, then `fallback`. A body that
/// does not parse yields `fallback`.
pub(crate) fn rejection_from_body(body: &[u8], fallback: String) -> ApiError {
    let parsed = match serde_json::from_slice::<ServerErrorBody>(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(error = %err, "error body not parseable");
            return ApiError::Rejected(fallback);
        }
    };

    if let Some(title) = parsed.title.filter(|t| !t.is_empty()) {
        return ApiError::Rejected(title);
    }
    if let Some(errors) = parsed.errors {
        return ApiError::Validation(render_field_errors(&errors));
    }
    if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
        return ApiError::Rejected(message);
    }
    ApiError::Rejected(fallback)
}

/// `field: msg1, msg2` per line, in the order the server sent them.
pub(crate) fn render_field_errors(errors: &Map<String, Value>) -> String {
    errors
        .iter()
        .map(|(field, messages)| {
            let text = match messages {
                Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
                other => value_text(other),
            };
            format!("{field}: {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
