//! Console settings loaded from the process environment.
//!
//! # Invariants
//! - Remote mode always carries a non-empty API base URL.
//! - Parsing never reads the environment directly except through
//!   `ConsoleConfig::from_env`, so `from_lookup` stays testable.

use crate::logging::default_log_level;
use crate::model::validation::ValidationProfile;
use crate::repo::remote_store::DEFAULT_PAGE_SIZE;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_MODE: &str = "STAFFDESK_MODE";
pub const ENV_API_URL: &str = "STAFFDESK_API_URL";
pub const ENV_API_TOKEN: &str = "STAFFDESK_API_TOKEN";
pub const ENV_PAGE_SIZE: &str = "STAFFDESK_PAGE_SIZE";
pub const ENV_PROFILE: &str = "STAFFDESK_PROFILE";
pub const ENV_NOTIFY_URL: &str = "STAFFDESK_NOTIFY_URL";
pub const ENV_LOG_LEVEL: &str = "STAFFDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STAFFDESK_LOG_DIR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing env {key}"),
            Self::Invalid { key, value } => write!(f, "invalid value `{value}` for env {key}"),
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the remote content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    /// Session token attached as a bearer credential.
    pub api_token: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    Local,
    Remote(RemoteConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub mode: StorageMode,
    pub profile: ValidationProfile,
    pub notify_url: Option<String>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses settings from an arbitrary key lookup.
    ///
    /// # Errors
    /// - `Missing` when remote mode has no API URL.
    /// - `Invalid` for an unknown mode/profile or a non-positive page size.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let profile = match read(ENV_PROFILE) {
            Some(value) => ValidationProfile::parse(&value).ok_or(ConfigError::Invalid {
                key: ENV_PROFILE,
                value,
            })?,
            None => ValidationProfile::Basic,
        };

        let mode = match read(ENV_MODE).as_deref().map(str::to_ascii_lowercase) {
            None => StorageMode::Local,
            Some(value) if value == "local" => StorageMode::Local,
            Some(value) if value == "remote" => {
                let base_url = read(ENV_API_URL).ok_or(ConfigError::Missing(ENV_API_URL))?;
                let page_size = match read(ENV_PAGE_SIZE) {
                    Some(raw) => match raw.parse::<u32>() {
                        Ok(size) if size > 0 => size,
                        _ => {
                            return Err(ConfigError::Invalid {
                                key: ENV_PAGE_SIZE,
                                value: raw,
                            })
                        }
                    },
                    None => DEFAULT_PAGE_SIZE,
                };
                StorageMode::Remote(RemoteConfig {
                    api_token: read(ENV_API_TOKEN),
                    page_size,
                    ..RemoteConfig::new(base_url)
                })
            }
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: ENV_MODE,
                    value,
                })
            }
        };

        Ok(Self {
            mode,
            profile,
            notify_url: read(ENV_NOTIFY_URL),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConsoleConfig, StorageMode, ENV_API_URL, ENV_PAGE_SIZE};
    use crate::model::validation::ValidationProfile;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ConsoleConfig, ConfigError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_basic_mode() {
        let config = load(&[]).unwrap();
        assert_eq!(config.mode, StorageMode::Local);
        assert_eq!(config.profile, ValidationProfile::Basic);
        assert_eq!(config.notify_url, None);
    }

    #[test]
    fn remote_mode_reads_connection_settings() {
        let config = load(&[
            ("STAFFDESK_MODE", "Remote"),
            ("STAFFDESK_API_URL", "http://localhost:1337/api"),
            ("STAFFDESK_API_TOKEN", "jwt"),
            ("STAFFDESK_PAGE_SIZE", "25"),
            ("STAFFDESK_PROFILE", "extended"),
        ])
        .unwrap();

        let StorageMode::Remote(remote) = config.mode else {
            panic!("expected remote mode");
        };
        assert_eq!(remote.base_url, "http://localhost:1337/api");
        assert_eq!(remote.api_token.as_deref(), Some("jwt"));
        assert_eq!(remote.page_size, 25);
        assert_eq!(config.profile, ValidationProfile::Extended);
    }

    #[test]
    fn remote_mode_requires_url_and_valid_page_size() {
        assert_eq!(
            load(&[("STAFFDESK_MODE", "remote")]),
            Err(ConfigError::Missing(ENV_API_URL))
        );

        let err = load(&[
            ("STAFFDESK_MODE", "remote"),
            ("STAFFDESK_API_URL", "http://localhost"),
            ("STAFFDESK_PAGE_SIZE", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_PAGE_SIZE));
    }
}
