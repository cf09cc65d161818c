use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://japaneseflashcardapi-production.up.railway.app/api";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = normalize_base_url(
            env_string("FLASHCARD_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        );

        let timeout = Duration::from_millis(
            env_string("FLASHCARD_API_TIMEOUT_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        );

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            timeout,
            log_level,
        }
    }

    /// Same defaults as `from_env`, pointed at `api_base_url`.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url.into()),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_level: "info".to_string(),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_base_url: Option<String>, timeout: Option<Duration>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = normalize_base_url(url);
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        self
    }

    pub fn flashcards_url(&self) -> String {
        format!("{}/Flashcards", self.api_base_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
