// crates/connector-cleanup-config/src/config.rs
// ============================================================================
// Module: Connector Cleanup Configuration
// Description: Loading and validation of environment-file settings.
// Purpose: Provide strict, fail-closed configuration with hard limits.
// Dependencies: connector-cleanup-core, dotenvy, thiserror, url
// ============================================================================

//! ## Overview
//! Settings come from a dotenv-style file. Entries in the file take
//! precedence over the process environment, which only fills keys the file
//! does not define. `BASE_URL` and `API_KEY` are required; everything else
//! has a default. Empty values count as unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use connector_cleanup_core::DEFAULT_LIST_LIMIT;
use connector_cleanup_core::DEFAULT_NAMESPACE;
use connector_cleanup_core::Namespace;
use connector_cleanup_core::QuerySpec;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment file used when none is given.
pub const DEFAULT_ENV_FILE: &str = "provider/provider.env";
/// Management API path prefix used when none is configured.
pub const DEFAULT_MANAGEMENT_PREFIX: &str = "/data";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default maximum response body size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Smallest accepted listing page size.
pub const MIN_LIST_LIMIT: u32 = 1;
/// Largest accepted listing page size.
pub const MAX_LIST_LIMIT: u32 = 10_000;
/// Maximum environment file size in bytes.
pub(crate) const MAX_ENV_FILE_SIZE: u64 = 64 * 1024;

/// Connector base URL key.
pub const BASE_URL_KEY: &str = "BASE_URL";
/// Management API key.
pub const API_KEY_KEY: &str = "API_KEY";
/// Vocabulary namespace key.
pub const NAMESPACE_KEY: &str = "EDC_NAMESPACE";
/// Management path prefix key.
pub const MANAGEMENT_PREFIX_KEY: &str = "MANAGEMENT_API_PREFIX";
/// Request timeout key.
pub const TIMEOUT_KEY: &str = "REQUEST_TIMEOUT_MS";
/// Listing page size key.
pub const LIST_LIMIT_KEY: &str = "LIST_LIMIT";
/// Response size limit key.
pub const MAX_RESPONSE_BYTES_KEY: &str = "MAX_RESPONSE_BYTES";

// ============================================================================
// SECTION: API Key
// ============================================================================

/// Management API key, redacted in every formatted form.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for use in request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([redacted])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Validated settings for one cleanup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    /// Connector base URL.
    pub base_url: Url,
    /// Management API key.
    pub api_key: ApiKey,
    /// Path prefix of the management API, without a trailing slash.
    pub management_prefix: String,
    /// Vocabulary namespace.
    pub namespace: Namespace,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Listing page size.
    pub list_limit: u32,
    /// Maximum response body size in bytes.
    pub max_response_bytes: usize,
}

impl CleanupConfig {
    /// Loads settings from an environment file, falling back to the process
    /// environment for keys the file does not define.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, unreadable, or
    /// malformed, or when a setting is missing or invalid.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let entries = read_env_file(env_file)?;
        Self::from_lookup(|key| entries.get(key).cloned().or_else(|| env::var(key).ok()))
    }

    /// Builds settings from a key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a setting is missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).map(|raw| raw.trim().to_string()).filter(|raw| !raw.is_empty());

        let raw_base_url = value(BASE_URL_KEY).ok_or(ConfigError::Missing(BASE_URL_KEY))?;
        let api_key = value(API_KEY_KEY).ok_or(ConfigError::Missing(API_KEY_KEY))?;
        let base_url = Url::parse(raw_base_url.trim_end_matches('/'))
            .map_err(|err| ConfigError::Invalid(format!("{BASE_URL_KEY} is not a valid url: {err}")))?;
        let management_prefix = value(MANAGEMENT_PREFIX_KEY)
            .unwrap_or_else(|| DEFAULT_MANAGEMENT_PREFIX.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = Self {
            base_url,
            api_key: ApiKey::new(api_key),
            management_prefix,
            namespace: Namespace::new(
                value(NAMESPACE_KEY).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            ),
            timeout_ms: parse_number(TIMEOUT_KEY, value(TIMEOUT_KEY), DEFAULT_TIMEOUT_MS)?,
            list_limit: parse_number(LIST_LIMIT_KEY, value(LIST_LIMIT_KEY), DEFAULT_LIST_LIMIT)?,
            max_response_bytes: parse_number(
                MAX_RESPONSE_BYTES_KEY,
                value(MAX_RESPONSE_BYTES_KEY),
                DEFAULT_MAX_RESPONSE_BYTES,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the settings for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!("{BASE_URL_KEY} must use http or https")));
        }
        if self.base_url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!("{BASE_URL_KEY} must include a host")));
        }
        if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
            return Err(ConfigError::Invalid(format!(
                "{BASE_URL_KEY} must not include a query or fragment"
            )));
        }
        if self.api_key.expose().chars().any(char::is_control) {
            return Err(ConfigError::Invalid(format!("{API_KEY_KEY} contains control characters")));
        }
        if !self.management_prefix.is_empty() && !self.management_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!("{MANAGEMENT_PREFIX_KEY} must start with '/'")));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(format!("{TIMEOUT_KEY} must be greater than zero")));
        }
        if !(MIN_LIST_LIMIT ..= MAX_LIST_LIMIT).contains(&self.list_limit) {
            return Err(ConfigError::Invalid(format!(
                "{LIST_LIMIT_KEY} must be between {MIN_LIST_LIMIT} and {MAX_LIST_LIMIT}"
            )));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(format!(
                "{MAX_RESPONSE_BYTES_KEY} must be greater than zero"
            )));
        }
        Ok(())
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the listing query for the configured namespace and page size.
    #[must_use]
    pub fn query_spec(&self) -> QuerySpec {
        QuerySpec::new(self.namespace.clone(), self.list_limit)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment file does not exist.
    #[error("environment file not found: {0}")]
    MissingEnvFile(String),
    /// I/O failure while reading the environment file.
    #[error("config io error: {0}")]
    Io(String),
    /// Malformed environment file line.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A required setting is unset or empty.
    #[error("required setting {0} is not set")]
    Missing(&'static str),
    /// A setting has an invalid value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads all entries of an environment file.
fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingEnvFile(path.display().to_string()));
    }
    let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if metadata.len() > MAX_ENV_FILE_SIZE {
        return Err(ConfigError::Invalid("environment file exceeds size limit".to_string()));
    }
    let entries = dotenvy::from_path_iter(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let mut values = BTreeMap::new();
    for entry in entries {
        let (key, value) = entry.map_err(|err| ConfigError::Parse(err.to_string()))?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Parses an optional numeric setting, applying its default when unset.
fn parse_number<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a non-negative integer"))),
    }
}
