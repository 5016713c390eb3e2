use thiserror::Error;

/// Errors surfaced by the editing core.
///
/// Every variant is recoverable: the failed operation is abandoned and the
/// committed state of the session is left untouched.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The input was not a decodable image
    #[error("failed to decode image: {0}")]
    Decode(String),
    /// The composite could not be encoded for export
    #[error("failed to encode image: {0}")]
    Encode(String),
    /// Degenerate crop rectangle or non-positive resize dimensions
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A destructive operation was requested while another one is running
    #[error("another destructive operation is already in progress")]
    ConcurrentOperation,
    /// The host session gate did not report an authenticated user
    #[error("session is not authenticated")]
    Unauthenticated,
    /// The intent needs a different interaction mode than the active one
    #[error("operation requires {expected} mode, but the editor is in {actual} mode")]
    InvalidMode {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("font error: {0}")]
    Font(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EditorError {
    fn from(error: serde_json::Error) -> Self {
        EditorError::Config(error.to_string())
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
