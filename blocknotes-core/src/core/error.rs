//! Error types for the Blocknotes core library.

use thiserror::Error;

/// All errors that can occur within the Blocknotes core library.
///
/// The document codec never surfaces [`MalformedDocument`](Self::MalformedDocument)
/// or [`OutOfRange`](Self::OutOfRange) to its callers; they are produced by the
/// fallible layer underneath it and masked by the total wrappers in
/// [`crate::core::codec`].
#[derive(Debug, Error)]
pub enum BlocknotesError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Input did not match the editor JSON envelope.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A block index was past the end of the document.
    #[error("Block index {index} out of range for document of {len} blocks")]
    OutOfRange { index: usize, len: usize },

    /// A note ID was requested that does not exist in the database.
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// A note failed validation before being written.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The opened file is not a valid Blocknotes database.
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized to or deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`BlocknotesError`].
pub type Result<T> = std::result::Result<T, BlocknotesError>;

impl BlocknotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::MalformedDocument(_) => "Note content could not be read".to_string(),
            Self::OutOfRange { .. } => "That block no longer exists".to_string(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::InvalidDatabase(_) => "Could not open notes database".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_index_and_len() {
        let e = BlocknotesError::OutOfRange { index: 4, len: 2 };
        let msg = e.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_validation_user_message_is_passthrough() {
        let e = BlocknotesError::ValidationFailed("Title must not be empty".to_string());
        assert_eq!(e.user_message(), "Title must not be empty");
    }

    #[test]
    fn test_note_not_found_user_message() {
        let e = BlocknotesError::NoteNotFound(7);
        assert_eq!(e.user_message(), "Note no longer exists");
        assert!(e.to_string().contains('7'));
    }
}
