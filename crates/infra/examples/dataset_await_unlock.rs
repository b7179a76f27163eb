//! Example: Waiting for a dataset to be unlocked, giving up after a deadline
//!
//! Starts the wait on a worker thread and cancels it after a deadline to show
//! how a `CancellableSleeper` interrupts a blocked call.
//!
//! ```bash
//! cargo run -p dataverse-infra --example dataset_await_unlock -- doi:10.5072/FK2/ABC123
//! ```

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use dataverse_core::CancellableSleeper;
use dataverse_domain::{DataverseError, RetryPolicy};
use dataverse_infra::{config, DataverseClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let pid = std::env::args().nth(1).context("usage: dataset_await_unlock <persistent id>")?;

    let sleeper = CancellableSleeper::new();
    let client = DataverseClient::new(config::load()?)?.with_sleeper(sleeper.clone());

    let (done_tx, done_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let outcome = client.dataset_by_pid(pid).await_unlock_with(RetryPolicy::new(120, 1000));
        let _ = done_tx.send(outcome);
    });

    // Cancel only if the wait is still running when the deadline passes.
    let outcome = match done_rx.recv_timeout(Duration::from_secs(30)) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            sleeper.cancel();
            done_rx.recv().context("worker exited without a result")?
        }
        Err(RecvTimeoutError::Disconnected) => anyhow::bail!("worker thread panicked"),
    };
    if worker.join().is_err() {
        anyhow::bail!("worker thread panicked");
    }

    match outcome {
        Ok(()) => println!("Dataset is unlocked"),
        Err(DataverseError::Interrupted) => println!("Gave up waiting"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
