use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::domain::TariffConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub tariff: TariffConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub datadis: DatadisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub summary_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            summary_ttl_seconds: 300,
        }
    }
}

/// Datadis credentials and endpoints. Everything is optional: with an
/// incomplete config the adapter reports a configuration error and the
/// orchestrator falls back to synthetic data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatadisConfig {
    pub consumption_url: Option<String>,
    pub cups: Option<String>,
    /// Static API token; takes precedence over username/password login.
    pub token: Option<String>,
    pub auth_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub http_timeout_seconds: u64,
}

impl Default for DatadisConfig {
    fn default() -> Self {
        Self {
            consumption_url: None,
            cups: None,
            token: None,
            auth_url: None,
            username: None,
            password: None,
            http_timeout_seconds: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("SBM__").split("__"));
        Ok(figment.extract()?)
    }
}
