//! Core error types

use thiserror::Error;

/// Errors raised while building core values from configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A color string was not `#rgb`, `#rrggbb` or `#rrggbbaa`
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Video settings that no renderer can honor
    #[error("Invalid video config: {0}")]
    InvalidVideo(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
