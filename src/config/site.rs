//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub excerpt_length: usize,
    pub default_category: String,

    // Admin
    pub admin_password: String,

    // Server
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "YBYMythBust".to_string(),
            description: "Busting myths with evidence".to_string(),
            url: "http://localhost:5000".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            excerpt_length: 200,
            default_category: "uncategorized".to_string(),

            admin_password: "admin123".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `ADMIN_PASSWORD` and `PORT` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("ADMIN_PASSWORD").ok(),
            std::env::var("PORT").ok(),
        );
    }

    fn apply_overrides(&mut self, password: Option<String>, port: Option<String>) {
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.admin_password = password;
        }

        if let Some(port) = port {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring invalid PORT {:?}: {}", port, e),
            }
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}
