//! Errors raised by the merge operations.

/// Merge errors
///
/// The documented input space (records, arrays, scalars, accessors) never
/// produces an error; these cover cyclic inputs and bad option documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// A record already being walked was reached again.
    #[error("cycle detected at `{path}`")]
    CycleDetected { path: String },

    /// Unknown option key, malformed options document or unreadable options file.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
