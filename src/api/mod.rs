//! Data-access layer: the only code that talks to the remote vocabulary
//! service.

pub mod client;
pub mod error;

pub use client::{FlashcardApi, DEFAULT_RANDOM_COUNT};
pub use error::ApiError;
