//! Конфигурация из переменных окружения (.env поддерживается)

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::models::DEFAULT_MAX_ITERATIONS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: Option<PathBuf>,
    pub log_level: String,
    pub max_iterations: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LABOR_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),
    #[error("LABOR_MAX_ITERATIONS must be a positive integer, got '{0}'")]
    InvalidMaxIterations(String),
    #[error("LABOR_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost(#[source] std::net::AddrParseError),
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Разбор конфигурации из произвольного источника ключей
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("LABOR_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("LABOR_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8000,
        };

        let max_iterations = match lookup("LABOR_MAX_ITERATIONS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxIterations(raw)),
            },
            None => DEFAULT_MAX_ITERATIONS,
        };

        let dataset_path = lookup("LABOR_DATASET")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_level = lookup("LABOR_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            dataset_path,
            log_level,
            max_iterations,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(ConfigError::InvalidHost)?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
