//! Error types for rfplens

use thiserror::Error;

/// Result type alias using RfpLensError
pub type Result<T> = std::result::Result<T, RfpLensError>;

/// Error type alias for convenience
pub type Error = RfpLensError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const SERVICE_ERROR: i32 = 4;
}

/// Main error type for rfplens
#[derive(Debug, Error)]
pub enum RfpLensError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The vector store or query embedding could not be reached. Never
    /// recovered by substituting empty context.
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    /// The language model service gave no usable response.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The language model call exceeded its deadline.
    #[error("Model timed out after {seconds}s")]
    ModelTimeout { seconds: u64 },

    /// The language model returned an empty or filtered completion.
    #[error("Model refused: {0}")]
    ModelRefusal(String),

    /// Caller-initiated cancellation mid-loop.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RfpLensError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DocumentNotFound(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            Self::RetrievalUnavailable(_)
            | Self::ModelUnavailable(_)
            | Self::ModelTimeout { .. }
            | Self::ModelRefusal(_) => exit_codes::SERVICE_ERROR,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether this error came from an external collaborator and the whole
    /// question can be retried by the caller.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::RetrievalUnavailable(_)
                | Self::ModelUnavailable(_)
                | Self::ModelTimeout { .. }
                | Self::ModelRefusal(_)
        )
    }
}
