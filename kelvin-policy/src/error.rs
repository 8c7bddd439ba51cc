//! Errors raised while loading a policy artifact.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a policy artifact.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The path matches neither supported artifact format.
    ///
    /// Fatal: without a policy no episode can run, so the caller aborts
    /// before touching the environment.
    #[error("unsupported model format: {0:?} is neither an archive file nor a checkpoint directory")]
    UnsupportedModelFormat(PathBuf),

    /// The artifact was recognized but could not be decoded.
    #[error("malformed policy artifact {path:?}: {reason}")]
    MalformedArtifact {
        /// Path of the offending artifact.
        path: PathBuf,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The artifact's dimensions disagree with each other.
    #[error("inconsistent policy dimensions: {0}")]
    DimensionMismatch(String),
}
