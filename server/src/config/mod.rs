use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, ServerError};

/// Server settings loaded from a TOML file. Every field has a default, so
/// the server runs without any config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub credentials: Credentials,
}

/// The single accepted credential pair, compared verbatim against decoded
/// AUTH payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "sadia".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            credentials: Credentials::default(),
        }
    }
}

impl ServerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ServerError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
