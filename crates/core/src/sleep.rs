//! Sleep primitives for retry loops

use std::sync::Arc;
use std::time::{Duration, Instant};

use dataverse_domain::{DataverseError, Result};
use parking_lot::{Condvar, Mutex};

use crate::dataset::ports::Sleeper;

/// Plain `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) -> Result<()> {
        std::thread::sleep(duration);
        Ok(())
    }
}

/// A sleeper that another thread can interrupt.
///
/// Clones share the cancellation state. Once cancelled, every current and
/// future sleep fails with [`DataverseError::Interrupted`] until [`reset`] is
/// called.
///
/// [`reset`]: CancellableSleeper::reset
#[derive(Debug, Clone, Default)]
pub struct CancellableSleeper {
    state: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

impl CancellableSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake up all sleeping waiters and fail them.
    pub fn cancel(&self) {
        let mut cancelled = self.state.cancelled.lock();
        *cancelled = true;
        self.state.wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.cancelled.lock()
    }

    pub fn reset(&self) {
        *self.state.cancelled.lock() = false;
    }
}

impl Sleeper for CancellableSleeper {
    fn sleep(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        let mut cancelled = self.state.cancelled.lock();

        while !*cancelled {
            if self.state.wakeup.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }

        if *cancelled {
            return Err(DataverseError::Interrupted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn sleeps_for_the_full_duration() {
        let sleeper = CancellableSleeper::new();
        let started = Instant::now();
        sleeper.sleep(Duration::from_millis(30)).expect("sleep");
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn cancel_interrupts_a_sleeping_thread() {
        let sleeper = CancellableSleeper::new();
        let waiter = sleeper.clone();
        let handle = thread::spawn(move || waiter.sleep(Duration::from_secs(30)));

        thread::sleep(Duration::from_millis(50));
        sleeper.cancel();

        let result = handle.join().expect("join");
        assert!(matches!(result, Err(DataverseError::Interrupted)));
    }

    #[test]
    fn cancelled_sleeper_fails_until_reset() {
        let sleeper = CancellableSleeper::new();
        sleeper.cancel();
        assert!(sleeper.is_cancelled());
        assert!(sleeper.sleep(Duration::from_millis(1)).is_err());

        sleeper.reset();
        assert!(sleeper.sleep(Duration::from_millis(1)).is_ok());
    }

    #[test]
    fn thread_sleeper_never_fails() {
        assert!(ThreadSleeper.sleep(Duration::from_millis(1)).is_ok());
    }
}
