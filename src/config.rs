/// Connection defaults from the iRODS environment file and variables.
///
/// Resolution order, later wins:
///
/// 1. built-in defaults (port 1247, HTTP API on port 9000 of the catalog host)
/// 2. `$IRODS_ENVIRONMENT_FILE`, else `~/.irods/irods_environment.json`
/// 3. `IRODS_HOST`, `IRODS_PORT`, `IRODS_USER_NAME`, `IRODS_ZONE_NAME`,
///    `IRODS_HTTP_API_URL`
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_PORT: u16 = 1247;
pub const DEFAULT_HTTP_API_PORT: u16 = 9000;
pub const DEFAULT_HTTP_API_PATH: &str = "/irods-http-api/0.5.0";

/// Errors while resolving the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read iRODS environment file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot parse iRODS environment file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("iRODS environment is missing '{key}' (set it in irods_environment.json or the environment)")]
    Missing { key: &'static str },

    #[error("Invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Keys read from `irods_environment.json`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct EnvironmentFile {
    irods_host: Option<String>,
    irods_port: Option<u16>,
    irods_user_name: Option<String>,
    irods_zone_name: Option<String>,
    irods_http_api_url: Option<String>,
}

/// Resolved connection defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RodsEnv {
    pub host: String,
    pub port: u16,
    pub user_name: String,
    pub zone_name: String,
    pub http_api_url: String,
}

impl RodsEnv {
    /// Resolve from the process environment and the environment file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed,
    /// or if host, user or zone are not set anywhere.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = var("IRODS_ENVIRONMENT_FILE")
            .map(PathBuf::from)
            .or_else(default_environment_path);
        let file = match path {
            Some(path) => read_environment_file(&path)?,
            None => EnvironmentFile::default(),
        };
        Self::from_sources(file, var)
    }

    fn from_sources(
        file: EnvironmentFile,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let pick = |key: &str, from_file: Option<String>| {
            var(key).filter(|v| !v.is_empty()).or(from_file)
        };

        let host = pick("IRODS_HOST", file.irods_host).ok_or(ConfigError::Missing {
            key: "irods_host",
        })?;
        let user_name = pick("IRODS_USER_NAME", file.irods_user_name).ok_or(
            ConfigError::Missing {
                key: "irods_user_name",
            },
        )?;
        let zone_name = pick("IRODS_ZONE_NAME", file.irods_zone_name).ok_or(
            ConfigError::Missing {
                key: "irods_zone_name",
            },
        )?;

        let port = match var("IRODS_PORT").filter(|v| !v.is_empty()) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "IRODS_PORT",
                value,
            })?,
            None => file.irods_port.unwrap_or(DEFAULT_PORT),
        };

        let http_api_url = pick("IRODS_HTTP_API_URL", file.irods_http_api_url)
            .unwrap_or_else(|| format!("http://{host}:{DEFAULT_HTTP_API_PORT}{DEFAULT_HTTP_API_PATH}"));

        Ok(Self {
            host,
            port,
            user_name,
            zone_name,
            http_api_url,
        })
    }
}

fn default_environment_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".irods").join("irods_environment.json"))
}

fn read_environment_file(path: &Path) -> Result<EnvironmentFile, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no environment file");
            Ok(EnvironmentFile::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
