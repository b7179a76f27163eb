//! Waiting for a dataset lock condition
//!
//! Each attempt fetches the dataset's locks once and checks the condition.
//! With a budget of `n` attempts there are at most `n` fetches and `n - 1`
//! sleeps; no sleep follows the last failed check.

use std::fmt;

use dataverse_domain::{DataverseError, Lock, Result, RetryPolicy};
use tracing::{debug, error};

use super::ports::{LockSource, Sleeper};

/// The lock state a caller waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockCondition {
    /// At least one lock of the given type is present.
    Locked(String),
    /// No locks at all.
    Unlocked,
}

impl LockCondition {
    pub fn locked(lock_type: impl Into<String>) -> Self {
        Self::Locked(lock_type.into())
    }

    pub fn is_satisfied(&self, locks: &[Lock]) -> bool {
        match self {
            Self::Locked(lock_type) => locks.iter().any(|lock| &lock.lock_type == lock_type),
            Self::Unlocked => locks.is_empty(),
        }
    }
}

impl fmt::Display for LockCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked(lock_type) => write!(f, "a lock of type {lock_type} is present"),
            Self::Unlocked => f.write_str("no locks are present"),
        }
    }
}

/// Poll `source` until `condition` holds or the budget is spent.
///
/// # Errors
/// - `DataverseError::LockTimeout` after `policy.max_attempts` unsatisfied checks
/// - `DataverseError::Interrupted` if the sleeper was cancelled
/// - any error returned while fetching the locks, unchanged
/// - `DataverseError::Configuration` for a policy without attempts
pub fn await_lock_state<L, S>(
    source: &L,
    sleeper: &S,
    condition: &LockCondition,
    policy: RetryPolicy,
) -> Result<()>
where
    L: LockSource + ?Sized,
    S: Sleeper + ?Sized,
{
    policy.validate()?;

    let mut attempt: u32 = 0;
    loop {
        let locks = source.current_locks()?;
        attempt += 1;

        if condition.is_satisfied(&locks) {
            debug!(attempt, %condition, "lock condition satisfied");
            return Ok(());
        }

        if attempt >= policy.max_attempts {
            error!(
                attempt,
                max_attempts = policy.max_attempts,
                delay_ms = policy.delay_millis,
                %condition,
                "gave up waiting for lock condition"
            );
            return Err(DataverseError::LockTimeout {
                condition: condition.to_string(),
                attempts: attempt,
                delay_millis: policy.delay_millis,
            });
        }

        debug!(
            attempt,
            max_attempts = policy.max_attempts,
            delay_ms = policy.delay_millis,
            locks = locks.len(),
            "lock condition not met, sleeping"
        );
        sleeper.sleep(policy.delay())?;
    }
}
