//! Example: Publishing a dataset once indexing has finished
//!
//! Waits for all locks to clear, then publishes with `assureIsIndexed`,
//! retrying while the server reports 409.
//!
//! # Setup
//!
//! Put `DATAVERSE_BASE_URL` and `DATAVERSE_API_KEY` in the environment or a
//! `.env` file, then run:
//!
//! ```bash
//! cargo run -p dataverse-infra --example dataset_publish -- 42 major
//! ```

use anyhow::{bail, Context};
use dataverse_domain::UpdateType;
use dataverse_infra::{config, DataverseClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let dataset_id: u64 = args.next().context("usage: dataset_publish <id> [major|minor]")?.parse()?;
    let update_type = match args.next().as_deref() {
        None | Some("major") => UpdateType::Major,
        Some("minor") => UpdateType::Minor,
        Some(other) => bail!("unknown update type: {other}"),
    };

    let client = DataverseClient::new(config::load()?)?;
    let dataset = client.dataset(dataset_id);

    dataset.await_unlock()?;
    let published = dataset.publish_assure_indexed(update_type)?.data()?;

    println!(
        "Published {}:{}/{}",
        published.protocol.unwrap_or_default(),
        published.authority.unwrap_or_default(),
        published.identifier.unwrap_or_default()
    );
    Ok(())
}
