use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionsError {
    /// A facade operation was called without a region code.
    #[error("Require code")]
    RequireCode,

    /// A search operation was called without a name fragment.
    #[error("Require name")]
    RequireName,

    /// A code had an unusable shape (wrong number of dot segments).
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// The call's cancellation signal fired before or during execution.
    #[error("Aborted")]
    Aborted,

    /// The backend answered with a non-success status.
    #[error("Oops")]
    Upstream { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A custom cache driver failed; the reference in-memory driver never does.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl RegionsError {
    /// Check whether the error came from a fired cancellation signal.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Upstream HTTP status, if this is an upstream failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegionsError>;
