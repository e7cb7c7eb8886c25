//! Error type shared by every recipe book operation.

use thiserror::Error;

/// Errors raised by the recipe book.
///
/// Insertion errors (`Format`, `Capacity`) are raised before any state is
/// touched. Persistence errors never affect the in-memory book.
#[derive(Debug, Error)]
pub enum RecipeBookError {
    /// Ingredient string did not split into exactly `quantity::name`.
    #[error("malformed ingredient '{input}': expected '<quantity>::<name>', found {parts} part(s)")]
    Format { input: String, parts: usize },

    /// Ordinal or vertex id outside the fixed graph capacity.
    #[error("ordinal {ordinal} exceeds recipe book capacity {capacity}")]
    Capacity { ordinal: usize, capacity: usize },

    /// Lookup found nothing.
    #[error("recipe not found: {0}")]
    NotFound(String),

    /// Saved recipe stream is unreadable (bad magic, CRC mismatch, codec failure).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// I/O failure while saving or loading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration cannot back a usable book.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<bincode::Error> for RecipeBookError {
    fn from(e: bincode::Error) -> Self {
        RecipeBookError::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecipeBookError>;
