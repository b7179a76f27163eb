//! Example: Downloading the first bytes of a data file
//!
//! ```bash
//! cargo run -p dataverse-infra --example file_download_range -- 7 0 1023
//! ```

use std::io::Read;

use anyhow::Context;
use dataverse_domain::{DataverseError, FileDownloadOptions, FileRange};
use dataverse_infra::{config, DataverseClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let file_id: u64 = args.first().context("usage: file_download_range <id> <start> <end>")?.parse()?;
    let start: u64 = args.get(1).map_or(Ok(0), |s| s.parse())?;
    let end: u64 = args.get(2).map_or(Ok(1023), |s| s.parse())?;

    let client = DataverseClient::new(config::load()?)?;
    let options = FileDownloadOptions { format: Some("original".to_string()), ..Default::default() };

    let bytes = client.basic_file_access(file_id).get_file_range(
        &options,
        FileRange::new(start, end),
        |mut response| {
            let mut buf = Vec::new();
            response.read_to_end(&mut buf).map_err(|e| DataverseError::Io(e.to_string()))?;
            Ok(buf)
        },
    )?;

    println!("Received {} bytes", bytes.len());
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
