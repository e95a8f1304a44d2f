//! Configuration for reaching the Groups Web Service. Values can come from a TOML file and from the
//! command line (or environment), which are merged into a [`Config`] and then resolved into the
//! [`DirectoryConfig`] the client is built from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "gws/config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value was not set by any configuration source
    #[error("No {0} configured")]
    Missing(&'static str),
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    InvalidToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A partial set of configuration values, as found in a single source. The legacy `gws_` prefixed
/// key names are accepted as aliases
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(alias = "gws_base_url")]
    pub base_url: Option<String>,
    #[serde(alias = "gws_ca_cert")]
    pub ca_cert: Option<PathBuf>,
    #[serde(alias = "gws_client_cert")]
    pub client_cert: Option<PathBuf>,
    #[serde(alias = "gws_client_key")]
    pub client_key: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads a config file from the given path
    pub async fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;
        toml::from_slice(&raw).map_err(|source| ConfigError::InvalidToml {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads a config file, returning an empty config if the file does not exist. Any other
    /// failure to read or parse the file is still an error
    pub async fn load_optional(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        match Config::load(&path).await {
            Err(ConfigError::Io { source, path }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "No config file found");
                Ok(Config::default())
            }
            res => res,
        }
    }

    /// Fills any values unset in `self` with the ones from `other`, so `self` takes precedence
    pub fn or(self, other: Config) -> Config {
        Config {
            base_url: self.base_url.or(other.base_url),
            ca_cert: self.ca_cert.or(other.ca_cert),
            client_cert: self.client_cert.or(other.client_cert),
            client_key: self.client_key.or(other.client_key),
            timeout_secs: self.timeout_secs.or(other.timeout_secs),
        }
    }

    /// Checks that all required values are set
    pub fn resolve(self) -> Result<DirectoryConfig, ConfigError> {
        Ok(DirectoryConfig {
            base_url: self.base_url.ok_or(ConfigError::Missing("base URL"))?,
            ca_cert: self.ca_cert.ok_or(ConfigError::Missing("CA certificate path"))?,
            client_cert: self
                .client_cert
                .ok_or(ConfigError::Missing("client certificate path"))?,
            client_key: self
                .client_key
                .ok_or(ConfigError::Missing("client key path"))?,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Everything needed to reach the Groups Web Service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// The service root, e.g. `https://groups.uw.edu/group_sws/v3`
    pub base_url: String,
    /// The CA certificate the service's certificate must chain to
    pub ca_cert: PathBuf,
    pub client_cert: PathBuf,
    pub client_key: PathBuf,
    /// Overall request timeout. When unset, the HTTP client's default applies
    pub timeout: Option<Duration>,
}

/// Returns the default config file location, `$XDG_CONFIG_HOME/gws/config.toml` on Linux
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|v| v.join(CONFIG_FILE_NAME))
}
