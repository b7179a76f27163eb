//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `DATAVERSE_BASE_URL` is set. An invalid
//!    variable is then an error, not a reason to read a file
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//!
//! ## Environment Variables
//! - `DATAVERSE_BASE_URL`: installation URL (required)
//! - `DATAVERSE_API_KEY`: API token
//! - `DATAVERSE_UNBLOCK_KEY`: key for endpoints blocked to the public
//! - `DATAVERSE_TIMEOUT_SECS`: request timeout
//! - `DATAVERSE_LOCK_MAX_ATTEMPTS`, `DATAVERSE_LOCK_DELAY_MS`: lock-await budget
//! - `DATAVERSE_INDEXING_MAX_ATTEMPTS`, `DATAVERSE_INDEXING_DELAY_MS`: publish
//!   retry budget
//!
//! ## File Locations
//! `dataverse.toml`, `dataverse.json`, `config.toml` and `config.json` are
//! probed in the working directory, its two parents, and next to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use dataverse_domain::{ClientConfig, DataverseError, Result, RetryPolicy};

pub const ENV_BASE_URL: &str = "DATAVERSE_BASE_URL";
pub const ENV_API_KEY: &str = "DATAVERSE_API_KEY";
pub const ENV_UNBLOCK_KEY: &str = "DATAVERSE_UNBLOCK_KEY";
pub const ENV_TIMEOUT_SECS: &str = "DATAVERSE_TIMEOUT_SECS";
pub const ENV_LOCK_MAX_ATTEMPTS: &str = "DATAVERSE_LOCK_MAX_ATTEMPTS";
pub const ENV_LOCK_DELAY_MS: &str = "DATAVERSE_LOCK_DELAY_MS";
pub const ENV_INDEXING_MAX_ATTEMPTS: &str = "DATAVERSE_INDEXING_MAX_ATTEMPTS";
pub const ENV_INDEXING_DELAY_MS: &str = "DATAVERSE_INDEXING_DELAY_MS";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["dataverse.toml", "dataverse.json", "config.toml", "config.json"];

/// Load configuration from the environment when `DATAVERSE_BASE_URL` is set,
/// otherwise from a file.
///
/// # Errors
/// Returns `DataverseError::Configuration` if a set environment variable is
/// invalid, or if no file yields a valid configuration.
pub fn load() -> Result<ClientConfig> {
    if optional_env(ENV_BASE_URL).is_none() {
        tracing::debug!(variable = ENV_BASE_URL, "Not set, loading configuration from file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from `DATAVERSE_*` variables. Unset optional variables
/// keep their defaults.
///
/// # Errors
/// Returns `DataverseError::Configuration` if `DATAVERSE_BASE_URL` is missing
/// or a numeric variable does not parse.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var(ENV_BASE_URL)?);
    config.api_token = optional_env(ENV_API_KEY);
    config.unblock_key = optional_env(ENV_UNBLOCK_KEY);

    if let Some(timeout) = env_number(ENV_TIMEOUT_SECS)? {
        config.timeout_secs = timeout;
    }
    config.await_lock_state =
        env_policy(config.await_lock_state, ENV_LOCK_MAX_ATTEMPTS, ENV_LOCK_DELAY_MS)?;
    config.await_indexing =
        env_policy(config.await_indexing, ENV_INDEXING_MAX_ATTEMPTS, ENV_INDEXING_DELAY_MS)?;

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file; `None` probes the standard locations.
///
/// # Errors
/// Returns `DataverseError::Configuration` if no file is found, the format is
/// invalid, or the result does not validate.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DataverseError::Configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DataverseError::Configuration(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        DataverseError::Configuration(format!("Failed to read config file: {}", e))
    })?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DataverseError::Configuration(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DataverseError::Configuration(format!("Invalid JSON format: {}", e))),
        _ => Err(DataverseError::Configuration(format!("Unsupported config format: {}", extension))),
    }
}

/// The first existing config file, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        DataverseError::Configuration(format!("Missing required environment variable: {}", key))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                DataverseError::Configuration(format!("Invalid value for {}: {}", key, e))
            })
        })
        .transpose()
}

fn env_policy(default: RetryPolicy, attempts_key: &str, delay_key: &str) -> Result<RetryPolicy> {
    Ok(RetryPolicy {
        max_attempts: env_number(attempts_key)?.unwrap_or(default.max_attempts),
        delay_millis: env_number(delay_key)?.unwrap_or(default.delay_millis),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 8] = [
        ENV_BASE_URL,
        ENV_API_KEY,
        ENV_UNBLOCK_KEY,
        ENV_TIMEOUT_SECS,
        ENV_LOCK_MAX_ATTEMPTS,
        ENV_LOCK_DELAY_MS,
        ENV_INDEXING_MAX_ATTEMPTS,
        ENV_INDEXING_DELAY_MS,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "https://demo.dataverse.org");
        std::env::set_var(ENV_API_KEY, "token-123");
        std::env::set_var(ENV_UNBLOCK_KEY, "unblock");
        std::env::set_var(ENV_TIMEOUT_SECS, "5");
        std::env::set_var(ENV_LOCK_MAX_ATTEMPTS, "4");
        std::env::set_var(ENV_LOCK_DELAY_MS, "10");
        std::env::set_var(ENV_INDEXING_MAX_ATTEMPTS, "3");
        std::env::set_var(ENV_INDEXING_DELAY_MS, "20");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.base_url, "https://demo.dataverse.org");
        assert_eq!(config.api_token.as_deref(), Some("token-123"));
        assert_eq!(config.unblock_key.as_deref(), Some("unblock"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.await_lock_state, RetryPolicy::new(4, 10));
        assert_eq!(config.await_indexing, RetryPolicy::new(3, 20));
    }

    #[test]
    fn test_load_from_env_keeps_defaults_for_unset_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_BASE_URL, "http://localhost:8080");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api_token, None);
        assert_eq!(config.await_lock_state, RetryPolicy::lock_state());
        assert_eq!(config.await_indexing, RetryPolicy::indexing());
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, DataverseError::Configuration(ref m) if m.contains(ENV_BASE_URL)));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_BASE_URL, "http://localhost:8080");
        std::env::set_var(ENV_LOCK_MAX_ATTEMPTS, "many");

        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, DataverseError::Configuration(ref m) if m.contains(ENV_LOCK_MAX_ATTEMPTS)));
    }

    #[test]
    fn test_load_from_env_rejects_zero_attempts() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_BASE_URL, "http://localhost:8080");
        std::env::set_var(ENV_INDEXING_MAX_ATTEMPTS, "0");

        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(DataverseError::Configuration(_))));
    }

    #[test]
    fn test_load_reports_invalid_env_var_instead_of_falling_back() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_BASE_URL, "https://demo.dataverse.org");
        std::env::set_var(ENV_TIMEOUT_SECS, "thirty");

        let result = load();
        clear_env();

        let err = result.unwrap_err();
        assert!(
            matches!(err, DataverseError::Configuration(ref m) if m.contains(ENV_TIMEOUT_SECS)),
            "got {err:?}"
        );
    }

    #[test]
    fn test_load_prefers_env_when_base_url_is_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_BASE_URL, "https://demo.dataverse.org");

        let result = load();
        clear_env();

        assert_eq!(result.expect("config from env").base_url, "https://demo.dataverse.org");
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = temp_config(
            r#"
base_url = "https://dataverse.example.edu"
api_token = "from-file"
timeout_secs = 12

[await_lock_state]
max_attempts = 2
delay_millis = 50
"#,
            "toml",
        );

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from TOML");
        assert_eq!(config.base_url, "https://dataverse.example.edu");
        assert_eq!(config.api_token.as_deref(), Some("from-file"));
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.await_lock_state, RetryPolicy::new(2, 50));
        assert_eq!(config.await_indexing, RetryPolicy::indexing());
    }

    #[test]
    fn test_load_from_file_json() {
        let path = temp_config(
            r#"{"base_url": "http://localhost:8080", "await_indexing": {"max_attempts": 5, "delay_millis": 100}}"#,
            "json",
        );

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from JSON");
        assert_eq!(config.await_indexing, RetryPolicy::new(5, 100));
        assert_eq!(config.timeout_secs, dataverse_domain::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/dataverse.toml"))).unwrap_err();
        assert!(matches!(err, DataverseError::Configuration(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = temp_config(r#"{ "base_url": "#, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(DataverseError::Configuration(ref m)) if m.contains("Invalid JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("base_url: x", &PathBuf::from("dataverse.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
