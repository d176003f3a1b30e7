use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("milestone multiple must be greater than zero")]
    InvalidMultiple,
    #[error("border width `{0}` must be a finite, non-negative number")]
    InvalidBorderWidth(f64),
    #[error("outline feather `{0}` must be between 0 and 4")]
    InvalidOutlineFeather(u8),
    #[error("invalid highlight pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("invalid color `{0}`, expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
}

/// Why a chat message yielded no streak. Both variants are non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreakError {
    #[error("no task streak in message")]
    NotFound,
    #[error("task streak `{0}` does not fit in 32 bits")]
    Overflow(String),
}
