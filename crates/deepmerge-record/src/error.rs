//! Errors raised by the record model.

/// Record model errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("cannot serialize cyclic record (revisited at `{key}`)")]
    Cycle { key: String },
}
