//! Crate-level error types for bibleref diagnostics.
use std::path::PathBuf;

/// Every error carries enough context to explain itself: the document path,
/// the unresolved token, or the reason validation failed.
#[allow(clippy::error_impl_error, reason = "crate-level error type shared by library and binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.bibleref.toml` parsed but holds an unusable value.
    #[error("config invalid: {reason}")]
    ConfigInvalid {
        /// Description of the offending value.
        reason: String,
    },

    /// The document parsed as JSON but lacks the minimum content.
    #[error("document invalid: {reason}")]
    DocumentInvalid {
        /// First missing piece found.
        reason: String,
    },

    /// The document file does not exist on disk.
    #[error("document not found: {}", path.display())]
    DocumentNotFound {
        /// Path to the missing document.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The document is not valid JSON or has the wrong shape.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No book in the document or canon matches the token.
    #[error("unknown book: `{token}`")]
    UnknownBook {
        /// Book name, id or number as typed.
        token: String,
    },

    /// The book exists but has no such chapter.
    #[error("unknown chapter: {book} {chapter}")]
    UnknownChapter {
        /// Display name of the book.
        book: String,
        /// Chapter number that was requested.
        chapter: u32,
    },

    /// The chapter exists but no verse covers the number.
    #[error("unknown verse: {book} {chapter}:{verse}")]
    UnknownVerse {
        /// Display name of the book.
        book: String,
        /// Chapter number.
        chapter: u32,
        /// Verse number that was requested.
        verse: u32,
    },
}
