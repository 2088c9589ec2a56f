use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::profile::{DEFAULT_QUERY_HASH_LIMIT, DEFAULT_REGISTRATION_HASH_LIMIT};
use crate::verifier::DEFAULT_ENDPOINT_TEMPLATE;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub verifier: VerifierConfig,
    pub limits: LimitsConfig,
    pub cache: CacheConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path = std::env::var("SOCIALPROOF_API_CONFIG")
            .unwrap_or_else(|_| "config/api.toml".to_string());
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .add_source(File::new(&configured_path, FileFormat::Toml).required(true));

        if let Ok(env_override) = std::env::var("SOCIALPROOF_API_ENV") {
            if !env_override.is_empty() {
                let env_file = format!("config/api.{}.toml", env_override);
                if Path::new(&env_file).exists() {
                    builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
                }
            }
        }

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, &configured_path))?;
        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        assert!(
            !self.database.url.is_empty(),
            "Database URL must be specified"
        );
        assert!(
            self.server.port > 0,
            "Server port must be greater than zero"
        );
        self.limits.ensure_bounds()?;
        self.cache.ensure_bounds()?;
        let _ = self.verifier.request_timeout();
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(self.port != 0, "HTTP port cannot be zero");
        assert!(self.port < 65535, "HTTP port must be below 65535");
        SocketAddr::new(host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// Override used by deployments that front BrightID with a proxy;
    /// placeholders as in `verifier::DEFAULT_ENDPOINT_TEMPLATE`.
    pub endpoint_template: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl VerifierConfig {
    pub fn endpoint_template(&self) -> &str {
        self.endpoint_template
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT_TEMPLATE)
    }

    pub fn request_timeout(&self) -> Duration {
        let millis = self.request_timeout_ms.unwrap_or(3_000);
        assert!(millis >= 100, "Verifier timeout must be at least 100ms");
        assert!(
            millis <= 60_000,
            "Verifier timeout cannot exceed 60 seconds"
        );
        Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_registration_hash_limit")]
    pub registration_hash_limit: usize,
    #[serde(default = "LimitsConfig::default_query_hash_limit")]
    pub query_hash_limit: usize,
}

impl LimitsConfig {
    pub fn ensure_bounds(&self) -> Result<()> {
        assert!(
            self.registration_hash_limit > 0,
            "Registration hash limit must be positive"
        );
        assert!(
            self.registration_hash_limit <= 16,
            "Registration hash limit exceeds bounds"
        );
        assert!(
            self.query_hash_limit > 0,
            "Query hash limit must be positive"
        );
        assert!(
            self.query_hash_limit <= 10_000,
            "Query hash limit exceeds bounds"
        );
        Ok(())
    }

    const fn default_registration_hash_limit() -> usize {
        DEFAULT_REGISTRATION_HASH_LIMIT
    }

    const fn default_query_hash_limit() -> usize {
        DEFAULT_QUERY_HASH_LIMIT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub variations_max_capacity: u64,
    pub variations_ttl_seconds: u64,
}

impl CacheConfig {
    fn ensure_bounds(&self) -> Result<()> {
        assert!(
            self.variations_max_capacity >= 1,
            "Variation cache capacity must be at least 1"
        );
        assert!(
            self.variations_ttl_seconds <= 86_400,
            "Variation cache TTL cannot exceed one day"
        );
        Ok(())
    }
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}
