use std::{net::SocketAddr, path::PathBuf};

use crate::error::ConfigError;

pub const HTTP_ADDR_VAR: &str = "CAMPUS_DIRECTORY_HTTP_ADDR";
pub const BUILDINGS_VAR: &str = "CAMPUS_DIRECTORY_BUILDINGS";
pub const SCHEDULES_VAR: &str = "CAMPUS_DIRECTORY_SCHEDULES";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

/// Where the service listens and which data files it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub http_addr: SocketAddr,
    pub buildings_path: Option<PathBuf>,
    pub schedules_path: Option<PathBuf>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            buildings_path: None,
            schedules_path: None,
        }
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = value(HTTP_ADDR_VAR).unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                key: HTTP_ADDR_VAR,
                value: raw_addr.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            http_addr,
            buildings_path: value(BUILDINGS_VAR).map(PathBuf::from),
            schedules_path: value(SCHEDULES_VAR).map(PathBuf::from),
        })
    }

    pub fn has_sources(&self) -> bool {
        self.buildings_path.is_some() || self.schedules_path.is_some()
    }
}
