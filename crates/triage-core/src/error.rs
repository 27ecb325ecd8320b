use thiserror::Error;

/// Top-level error type for the triage workspace.
///
/// The conversation engine itself never fails; these variants cover the
/// layers around it: configuration, record files and exports. Subsystem crates
/// define their own error types and implement `From<SubsystemError> for
/// TriageError` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Records error: {0}")]
    Records(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Config(err.to_string())
    }
}

/// A specialized `Result` type for triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;
