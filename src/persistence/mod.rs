//! Save-and-resume storage for wizard progress
//!
//! A single snapshot slot holds the whole form plus the step the user was on.

mod snapshot;
mod store;

pub use snapshot::{SnapshotPolicy, WizardProgress, SNAPSHOT_KEY};
pub use store::FileProgressStore;

use thiserror::Error;

/// Failure to read, write, or decode the snapshot slot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("saved progress is not accessible: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved progress could not be decoded: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("saved progress is not a JSON object")]
    NotAnObject,
    #[error("saved progress has schema version {found:?}, expected {expected}")]
    IncompatibleSchema { found: Option<u64>, expected: u32 },
    #[error("progress cannot be loaded while a submission is in flight")]
    SubmissionInFlight,
}

/// Storage for the single snapshot slot
#[cfg_attr(test, mockall::automock)]
pub trait ProgressStore: Send + Sync {
    /// Overwrite the slot with `progress`
    fn save(&self, progress: &WizardProgress) -> Result<(), PersistenceError>;

    /// Read the slot; `Ok(None)` when nothing has been saved
    fn load(&self) -> Result<Option<WizardProgress>, PersistenceError>;

    /// Remove the slot; succeeds when it is already empty
    fn clear(&self) -> Result<(), PersistenceError>;
}
