use crate::artifacts::diff::header::PatchType;
use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Failures the diff engine reports to its caller
///
/// Engine functions return `anyhow::Result`; these kinds can be recovered
/// with `err.downcast_ref::<DiffError>()`.
#[derive(Debug, Error)]
pub enum DiffError {
    /// The object reader could not produce the content of a blob
    #[error("content of object {id} is unavailable: {reason}")]
    ContentUnavailable { id: ObjectId, reason: String },

    /// Only unified patches can be rendered
    #[error("patch type {0:?} is not supported")]
    UnsupportedPatchType(PatchType),

    /// A tree listing or change record violates the engine's invariants
    #[error("malformed entry: {0}")]
    MalformedEntry(String),

    /// Formatting was cancelled between two records
    #[error("diff formatting was cancelled")]
    Cancelled,
}
