use thiserror::Error;

/// Errors raised while parsing tree encodings or mining a forest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MineError {
    #[error("Malformed tree encoding {input:?}: {reason}")]
    MalformedEncoding { input: String, reason: String },

    #[error("Node position {position} does not exist in a tree with {nodes} nodes")]
    InvalidPosition { position: usize, nodes: usize },

    #[error("Minimum support must be at least 1, got {0}")]
    UnsupportedMinSupport(usize),

    #[error("No occurrence list recorded for pattern {0:?}")]
    MissingOccurrenceList(String),

    #[error("Cannot join label-tracking and scope-vector occurrence lists")]
    MixedOccurrenceKinds,

    #[error("Attach depth {depth} lies outside a rightmost path of length {path_len}")]
    DetachedOccurrence { depth: usize, path_len: usize },

    #[error("Mining deadline exceeded")]
    DeadlineExceeded,

    #[error("Invalid codec configuration: {0}")]
    InvalidCodec(String),
}

impl MineError {
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        MineError::MalformedEncoding {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type MineResult<T> = Result<T, MineError>;
