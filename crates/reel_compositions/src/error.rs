//! Composition errors

use reel_animation::AnimationError;
use reel_core::CoreError;
use thiserror::Error;

/// Failure to register, configure or instantiate a composition
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("no composition registered with id `{0}`")]
    NotFound(String),

    #[error("composition `{0}` is already registered")]
    Duplicate(String),

    /// Props did not match the scene's expected shape
    #[error("invalid props: {0}")]
    Props(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// No duration given and the scene has no natural length
    #[error("composition `{0}` needs an explicit duration")]
    MissingDuration(String),

    #[error("composition `{id}` has invalid video settings: {source}")]
    InvalidVideo {
        id: String,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, CompositionError>;
