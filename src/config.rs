use std::collections::HashMap;
use std::collections::HashSet;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

/// API-key credentials, keyed by tenant id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://translations.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut builder = config::Config::builder();

        let base_config = Path::new(&config_dir).join("base.toml");
        if base_config.exists() {
            builder = builder.add_source(File::from(base_config));
        }

        // Local overrides, not committed to git
        let local_config = Path::new(&config_dir).join("local.toml");
        if local_config.exists() {
            builder = builder.add_source(File::from(local_config));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRANSLATION")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        let mut seen = HashSet::new();
        for (tenant_id, api_key) in &self.security.api_keys {
            if api_key.trim().is_empty() {
                anyhow::bail!("API key for tenant '{tenant_id}' must not be blank");
            }
            if !seen.insert(api_key.as_str()) {
                anyhow::bail!("API key for tenant '{tenant_id}' is assigned to more than one tenant");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(entries: &[(&str, &str)]) -> Config {
        Config {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            security: SecurityConfig {
                api_keys: entries
                    .iter()
                    .map(|(tenant, key)| (tenant.to_string(), key.to_string()))
                    .collect(),
            },
        }
    }

    #[test]
    fn accepts_distinct_api_keys() {
        let config = config_with_keys(&[("tenant-a", "key-a"), ("tenant-b", "key-b")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_blank_api_key() {
        let config = config_with_keys(&[("tenant-a", "   ")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_api_keys() {
        let config = config_with_keys(&[("tenant-a", "same"), ("tenant-b", "same")]);
        assert!(config.validate().is_err());
    }
}
