//! Port interfaces for dataset workflows

use std::time::Duration;

use dataverse_domain::{Lock, Result};

/// Source of the current lock set of one dataset.
pub trait LockSource {
    /// Fetch the locks currently held on the dataset.
    fn current_locks(&self) -> Result<Vec<Lock>>;
}

/// Blocking pause between two attempts of a retry loop.
pub trait Sleeper {
    /// Sleep for `duration`.
    ///
    /// # Errors
    /// Returns `DataverseError::Interrupted` when the wait was cancelled.
    fn sleep(&self, duration: Duration) -> Result<()>;
}
