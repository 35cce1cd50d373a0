use thiserror::Error;

#[derive(Error, Debug)]
pub enum TunebreedError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown candidate: expected {expected:?}, got {got}")]
    UnknownCandidate { expected: Option<String>, got: String },

    #[error("Unresolved scale: {0}")]
    UnresolvedScale(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Session lock poisoned: {0}")]
    SessionPoisoned(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TunebreedError>;
