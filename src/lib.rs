pub mod api;
pub mod config;
pub mod fallback;
pub mod format;
pub mod logging;
pub mod manage;
pub mod mappings;
pub mod models;
pub mod session;

pub use api::{ApiError, FlashcardApi};
pub use config::Config;
pub use format::{category_label, difficulty_label, display_triple, CardFace};
pub use models::{ApiResponse, FlashcardDraft, VocabularyRecord};
