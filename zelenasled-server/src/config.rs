//! TOML configuration of the HTTP service

use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use zelenasled_core::RoutingModelConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub model: RoutingModelConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            request_timeout_secs: 30,
            max_concurrent_requests: 64,
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ServerConfig {
    /// Reads `path`; relative dataset paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        let model = &mut self.model;
        resolve(&mut model.walk_network);
        resolve(&mut model.bike_network);
        for path in [
            &mut model.vegetation_index,
            &mut model.heat_index,
            &mut model.noise_overlay,
        ]
        .into_iter()
        .flatten()
        {
            resolve(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        [server]
        bind = "0.0.0.0:9000"
        request_timeout_secs = 5

        [model]
        walk_network = "data/walk.geojson"
        bike_network = "/srv/data/bike.geojson"
        vegetation_index = "data/ndvi.json"

        [model.weights]
        noise = 0.5
    "#;

    #[test]
    fn server_defaults_fill_missing_keys() {
        let config = ServerConfig::parse(CONFIG).unwrap();

        assert_eq!(config.server.bind.port(), 9000);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.max_concurrent_requests, 64);
        assert_eq!(config.model.weights.noise, 0.5);
        assert_eq!(config.model.weights.length, 1.0);
        assert!(config.model.heat_index.is_none());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let mut config = ServerConfig::parse(CONFIG).unwrap();
        config.resolve_paths(Path::new("/etc/zelenasled"));

        assert_eq!(
            config.model.walk_network,
            PathBuf::from("/etc/zelenasled/data/walk.geojson")
        );
        assert_eq!(
            config.model.bike_network,
            PathBuf::from("/srv/data/bike.geojson")
        );
        assert_eq!(
            config.model.vegetation_index,
            Some(PathBuf::from("/etc/zelenasled/data/ndvi.json"))
        );
    }

    #[test]
    fn model_section_is_required() {
        assert!(ServerConfig::parse("[server]\nrequest_timeout_secs = 1\n").is_err());
    }
}
