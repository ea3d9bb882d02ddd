use thiserror::Error;

/// Errors found while decoding IFO and ISO 9660 structures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// Magic bytes at the start of a structure do not match
    #[error("bad signature: expected {expected}")]
    BadSignature { expected: &'static str },

    /// A table points outside the data that was read
    #[error("truncated {what}: need {needed} bytes, have {actual}")]
    Truncated {
        what: &'static str,
        needed: usize,
        actual: usize,
    },

    /// A required file or directory is missing
    #[error("{0} not found")]
    NotFound(String),

    /// Any other inconsistency
    #[error("{0}")]
    Invalid(String),
}

impl StructureError {
    pub fn truncated(what: &'static str, needed: usize, actual: usize) -> Self {
        Self::Truncated {
            what,
            needed,
            actual,
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// I/O or structural failure while reading an ISO 9660 image.
#[derive(Debug, Error)]
pub enum IsoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Structure(#[from] StructureError),
}
