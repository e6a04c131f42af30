//! Error types for presentation processing.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing, or writing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The document could not be decoded or encoded.
    #[error("Document codec error: {0}")]
    CodecError(String),

    /// The metadata store failed.
    #[error("Metadata store error: {0}")]
    StoreError(String),

    /// A slide action has no text element to work on.
    #[error("Slide {slide} has no text element")]
    MissingTextElement {
        /// 1-based cue position.
        slide: usize,
    },

    /// The identifier index does not line up with the cue list.
    #[error("Identifier index out of sync: {cues} cues but {identifiers} identifiers")]
    IdentifierMismatch {
        /// Number of cues in the document.
        cues: usize,
        /// Number of identifiers across all groups.
        identifiers: usize,
    },

    /// An identifier group entry names a different cue than the one at its
    /// position.
    #[error("Identifier {identifier} at position {position} does not match cue {cue}")]
    IdentifierOutOfOrder {
        /// 1-based cue position.
        position: usize,
        /// Uuid of the cue at that position.
        cue: String,
        /// Identifier listed for that position.
        identifier: String,
    },

    /// A cue was inserted past the end of the document.
    #[error("Cannot insert at position {index} in a document with {len} cues")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Current number of cues.
        len: usize,
    },

    /// A decision provider answered with something that was not offered.
    #[error("Invalid decision {answer:?}, expected one of {candidates:?}")]
    InvalidDecision {
        /// The answer received.
        answer: String,
        /// The candidates that were offered.
        candidates: Vec<String>,
    },
}
