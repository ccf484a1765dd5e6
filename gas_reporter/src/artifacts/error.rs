//!
//! The contract artifact error.
//!

use std::path::PathBuf;

///
/// The contract artifact error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The build system has not produced an artifact for the contract.
    #[error("Artifact of contract `{name}` not found")]
    NotFound {
        /// The contract name.
        name: String,
    },
    /// The artifact file cannot be read.
    #[error("Artifact file {path:?} reading: {error}")]
    Reading {
        /// The artifact file path.
        path: PathBuf,
        /// The underlying IO error.
        error: std::io::Error,
    },
    /// The artifact file is not valid JSON of the expected shape.
    #[error("Artifact file {path:?} parsing: {error}")]
    Parsing {
        /// The artifact file path.
        path: PathBuf,
        /// The underlying JSON error.
        error: serde_json::Error,
    },
    /// The bytecode contains characters other than hexadecimal digits and link placeholders.
    #[error("Artifact of contract `{name}` has invalid bytecode: {reason}")]
    InvalidBytecode {
        /// The contract name.
        name: String,
        /// The description.
        reason: String,
    },
}

impl Error {
    ///
    /// Whether the artifact is simply missing, which is not worth a warning.
    ///
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
