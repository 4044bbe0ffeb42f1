use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Holding input ───────────────────────────────────────────────
    #[error("Please fill in all fields: '{0}' is empty")]
    MissingField(&'static str),

    #[error("Invalid number for '{field}': '{value}' ({reason})")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Reports ─────────────────────────────────────────────────────
    #[error("A report is already being generated")]
    ReportInProgress,

    #[error("Report generation was cancelled")]
    ReportCancelled,

    #[error("Report generation failed: {0}")]
    ReportFailed(String),

    #[error("No async runtime available to run report generation")]
    NoRuntime,

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Serialization / File ────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            CoreError::ReportCancelled
        } else {
            CoreError::ReportFailed(e.to_string())
        }
    }
}
