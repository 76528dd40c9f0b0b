//! Error types for the noteboard application.
//!
//! Every failure a notes session can run into is one of these variants. None
//! of them is fatal to a running session; callers decide whether to warn,
//! degrade or propagate.

use std::io;

use thiserror::Error;

/// The main error type for the noteboard application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Both title and body were blank when saving a note.
    #[error("Cannot save an empty note")]
    EmptyNote,

    /// An update or pin toggle targeted an id that is not in the collection.
    #[error("Note not found: {id}")]
    NoteNotFound { id: i64 },

    /// Every possible note id is already taken.
    #[error("No note id is free")]
    IdsExhausted,

    /// The key-value store could not read or write a key.
    #[error("Storage failure for key '{key}': {message}")]
    Persistence { key: String, message: String },

    /// A persisted blob exists but does not have the expected shape.
    #[error("Malformed stored data under key '{key}': {message}")]
    MalformedStoredData { key: String, message: String },

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown note color: {value}")]
    InvalidColor { value: String },

    #[error("Unknown theme: {value}")]
    InvalidTheme { value: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{message}")]
    EditorError { message: String },
}

impl NotesError {
    pub(crate) fn persistence(key: &str, message: impl ToString) -> Self {
        NotesError::Persistence {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn malformed(key: &str, message: impl ToString) -> Self {
        NotesError::MalformedStoredData {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = NotesError::NoteNotFound { id: 42 };
        assert_eq!(err.to_string(), "Note not found: 42");

        let err = NotesError::persistence("notes", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Storage failure for key 'notes': quota exceeded"
        );

        let err = NotesError::InvalidColor {
            value: "orange".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown note color: orange");
    }
}
