//! Retrying a publish that the server rejects while indexing is pending
//!
//! With `assureIsIndexed=true` the server answers 409 until search indexing of
//! the dataset has finished. Only that status is retried; every other failure
//! is returned on first occurrence without using up the budget.

use dataverse_domain::{DataverseError, Result, RetryPolicy};
use tracing::{debug, error, warn};

use super::ports::Sleeper;

/// Run `publish` until it succeeds, fails with something other than a 409, or
/// the budget runs out.
///
/// # Errors
/// - `DataverseError::PublishRetryExhausted` carrying the last 409 response
///   after `policy.max_attempts` conflicts
/// - any non-409 error from `publish`, unchanged
/// - `DataverseError::Interrupted` if the sleeper was cancelled
/// - `DataverseError::Configuration` for a policy without attempts
pub fn publish_with_retry<T, F, S>(mut publish: F, sleeper: &S, policy: RetryPolicy) -> Result<T>
where
    F: FnMut() -> Result<T>,
    S: Sleeper + ?Sized,
{
    policy.validate()?;

    let mut attempt: u32 = 0;
    loop {
        match publish() {
            Ok(result) => {
                debug!(conflicts = attempt, "publish accepted");
                return Ok(result);
            }
            Err(DataverseError::Api(err)) if err.is_conflict() => {
                attempt += 1;
                if attempt >= policy.max_attempts {
                    error!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        delay_ms = policy.delay_millis,
                        url = %err.url,
                        "dataset still not indexed, giving up"
                    );
                    return Err(DataverseError::PublishRetryExhausted {
                        attempts: attempt,
                        delay_millis: policy.delay_millis,
                        last: err,
                    });
                }
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay_millis,
                    "publish conflicted, dataset not yet indexed"
                );
                sleeper.sleep(policy.delay())?;
            }
            Err(other) => {
                error!(error = %other, "publish failed");
                return Err(other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dataverse_domain::{ApiError, DatasetPublicationResult};
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct CountingSleeper {
        sleeps: Mutex<u32>,
    }

    impl Sleeper for CountingSleeper {
        fn sleep(&self, _duration: Duration) -> Result<()> {
            *self.sleeps.lock() += 1;
            Ok(())
        }
    }

    fn conflict(attempt: u32) -> DataverseError {
        ApiError::new(409, "http://localhost/api/datasets/7/actions/:publish", format!("try {attempt}"))
            .into()
    }

    fn published() -> DatasetPublicationResult {
        DatasetPublicationResult {
            id: Some(7),
            identifier: Some("FK2/XYZ".into()),
            ..DatasetPublicationResult::default()
        }
    }

    #[test]
    fn succeeds_after_two_conflicts() {
        let sleeper = CountingSleeper::default();
        let mut calls = 0;

        let result = publish_with_retry(
            || {
                calls += 1;
                if calls <= 2 {
                    Err(conflict(calls))
                } else {
                    Ok(published())
                }
            },
            &sleeper,
            RetryPolicy::new(5, 10),
        )
        .expect("published");

        assert_eq!(calls, 3);
        assert_eq!(*sleeper.sleeps.lock(), 2);
        assert_eq!(result, published());
    }

    #[test]
    fn exhausting_budget_surfaces_last_conflict() {
        let sleeper = CountingSleeper::default();
        let mut calls = 0;

        let err = publish_with_retry::<DatasetPublicationResult, _, _>(
            || {
                calls += 1;
                Err(conflict(calls))
            },
            &sleeper,
            RetryPolicy::new(3, 10),
        )
        .expect_err("exhausted");

        assert_eq!(calls, 3);
        assert_eq!(*sleeper.sleeps.lock(), 2);
        assert_eq!(err.status(), Some(409));
        let last = err.api_error().expect("api error");
        assert_eq!(last.body, "try 3");
        assert!(matches!(err, DataverseError::PublishRetryExhausted { attempts: 3, delay_millis: 10, .. }));
    }

    #[test]
    fn other_api_errors_propagate_immediately() {
        let sleeper = CountingSleeper::default();
        let mut calls = 0;

        let err = publish_with_retry::<DatasetPublicationResult, _, _>(
            || {
                calls += 1;
                Err(ApiError::new(403, "u", "not allowed").into())
            },
            &sleeper,
            RetryPolicy::new(5, 10),
        )
        .expect_err("forbidden");

        assert_eq!(calls, 1);
        assert_eq!(*sleeper.sleeps.lock(), 0);
        assert!(matches!(err, DataverseError::Api(ref api) if api.status == 403));
    }

    #[test]
    fn non_conflict_after_conflict_is_returned_as_is() {
        let sleeper = CountingSleeper::default();
        let mut calls = 0;

        let err = publish_with_retry::<DatasetPublicationResult, _, _>(
            || {
                calls += 1;
                if calls == 1 {
                    Err(conflict(calls))
                } else {
                    Err(DataverseError::Transport("connection refused".into()))
                }
            },
            &sleeper,
            RetryPolicy::new(5, 10),
        )
        .expect_err("transport");

        assert_eq!(calls, 2);
        assert_eq!(*sleeper.sleeps.lock(), 1);
        assert!(matches!(err, DataverseError::Transport(_)));
    }
}
