/// Domain module containing the journal's core entities and their validation
///
/// This module defines entries, goals, archived reports and user settings,
/// plus the streak calculation that runs over journal entries.

pub mod types;
pub mod entry;
pub mod goal;
pub mod report;
pub mod settings;
pub mod streak;

// Re-export public types for easy access
pub use types::*;
pub use entry::*;
pub use goal::*;
pub use report::*;
pub use settings::*;
pub use streak::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("Invalid PIN: {0}")]
    InvalidPin(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown emotion: {0}")]
    InvalidEmotion(String),

    #[error("Invalid media item: {0}")]
    InvalidMedia(String),
}
