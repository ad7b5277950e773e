//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_ID_LEN, DEFAULT_MAX_MIB, DEFAULT_NOT_FOUND_DELAY, MAX_CONFIG_ID_LEN, MIB,
};
use crate::error::ConfigError;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base storage directory.
pub const DIR_VAR: &str = "DPB_DIR";
/// Per-paste upload limit in whole MiB.
pub const MAX_MIB_VAR: &str = "DPB_MAX_MIB";
/// Identifier length in hex characters.
pub const ID_LEN_VAR: &str = "DPB_ID_LEN";
/// Not-found delay in milliseconds.
pub const NOT_FOUND_DELAY_VAR: &str = "DPB_NOT_FOUND_DELAY_MS";
/// Optional ceiling on identifier claim attempts per store.
pub const MAX_CLAIM_ATTEMPTS_VAR: &str = "DPB_MAX_CLAIM_ATTEMPTS";

/// Runtime configuration for the paste engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub id_len: usize,
    pub not_found_delay: Duration,
    pub max_claim_attempts: Option<u32>,
}

impl Config {
    /// Build a configuration for `base_dir` with every other field defaulted.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_upload_bytes: DEFAULT_MAX_MIB * MIB,
            id_len: DEFAULT_ID_LEN,
            not_found_delay: DEFAULT_NOT_FOUND_DELAY,
            max_claim_attempts: None,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `DPB_DIR` is missing or not a directory,
    /// or when any numeric variable is malformed or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = lookup(DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(DIR_VAR))?;
        ensure_directory(&base_dir)?;

        let mut config = Self::new(base_dir);

        if let Some(value) = lookup(MAX_MIB_VAR) {
            let mib: usize = parse_positive(MAX_MIB_VAR, &value)?;
            config.max_upload_bytes = mib.checked_mul(MIB).ok_or(ConfigError::Invalid {
                name: MAX_MIB_VAR,
                value,
                reason: "is too large",
            })?;
        }

        if let Some(value) = lookup(ID_LEN_VAR) {
            let len: usize = parse_positive(ID_LEN_VAR, &value)?;
            if len > MAX_CONFIG_ID_LEN {
                return Err(ConfigError::Invalid {
                    name: ID_LEN_VAR,
                    value,
                    reason: "must be at most 32",
                });
            }
            config.id_len = len;
        }

        if let Some(value) = lookup(NOT_FOUND_DELAY_VAR) {
            let millis: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: NOT_FOUND_DELAY_VAR,
                value: value.clone(),
                reason: "must be a non-negative integer",
            })?;
            config.not_found_delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(MAX_CLAIM_ATTEMPTS_VAR) {
            config.max_claim_attempts = Some(parse_positive(MAX_CLAIM_ATTEMPTS_VAR, &value)?);
        }

        Ok(config)
    }
}

/// Check that `path` exists and is a directory.
///
/// # Errors
/// Returns [`ConfigError::NotADirectory`] otherwise.
pub fn ensure_directory(path: &Path) -> Result<(), ConfigError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(ConfigError::NotADirectory(path.to_path_buf())),
    }
}

fn parse_positive<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed >= T::from(1) => Ok(parsed),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be an integer >= 1",
        }),
    }
}
