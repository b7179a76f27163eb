//! Names of exported dataset version bags
//!
//! Archived versions are stored as `<space>[-datacite.]v<major>.<minor>.(zip|xml)`,
//! for example `doi-10-5072-dar-kxteqtv1.0.zip` or
//! `doi-10-5072-dar-kxteqt-datacite.v1.0.xml`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DataverseError, Result};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<space>[A-Za-z0-9-]+?)(-(?P<schema>datacite)\.)?v(?P<major>[0-9]+)\.(?P<minor>[0-9]+)(?P<extension>\.zip|\.xml)$",
    )
    .expect("export name pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDatasetVersionName {
    pub space_name: String,
    pub schema: Option<String>,
    pub major_version: u32,
    pub minor_version: u32,
    /// Including the leading dot.
    pub extension: String,
}

impl ExportedDatasetVersionName {
    /// # Errors
    /// Returns `DataverseError::InvalidArgument` when `name` does not follow the
    /// export naming pattern.
    pub fn parse(name: &str) -> Result<Self> {
        let nonconforming = || {
            DataverseError::InvalidArgument(format!(
                "Name does not conform to dataset version export naming pattern: {name}"
            ))
        };
        let captures = NAME_PATTERN.captures(name).ok_or_else(nonconforming)?;

        let number = |group: &str| -> Result<u32> {
            captures
                .name(group)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(nonconforming)
        };

        Ok(Self {
            space_name: captures["space"].to_string(),
            schema: captures.name("schema").map(|m| m.as_str().to_string()),
            major_version: number("major")?,
            minor_version: number("minor")?,
            extension: captures["extension"].to_string(),
        })
    }
}

impl std::str::FromStr for ExportedDatasetVersionName {
    type Err = DataverseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
