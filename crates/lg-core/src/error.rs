//! Error types for Lucky Games

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum LgError {
    #[error("Wheel needs at least one segment")]
    EmptySegments,

    #[error("Slot needs at least one reel")]
    NoReels,

    #[error("Reel {reel} out of range ({count} reels)")]
    ReelOutOfRange { reel: usize, count: usize },

    #[error("Reel {reel} has no symbols")]
    EmptyReel { reel: usize },

    #[error("Slot declares {declared} reels but {actual} are present")]
    ReelCountMismatch { declared: usize, actual: usize },

    #[error("Invalid spin duration: {0}ms")]
    InvalidDuration(u32),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown id: {0}")]
    UnknownId(String),

    #[error("Invalid forced outcome: {0}")]
    InvalidOutcome(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type LgResult<T> = Result<T, LgError>;
