use junction_core::StorageError;
use thiserror::Error;

/// Errors returned by PNR issuance.
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    /// Every attempt produced a candidate that was already issued.
    ///
    /// This is the terminal signal that the keyspace is saturated for the
    /// configured width; callers must widen the PNR length rather than
    /// retry.
    #[error("pnr issuance exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },
    /// A store failure unrelated to PNR uniqueness, passed through
    /// unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
