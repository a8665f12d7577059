//! Application configuration loaded via OrthoConfig.
//!
//! Values resolve from CLI flags, `COACH_METRICS_*` environment variables,
//! and an optional configuration file, in that precedence order.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/coach_metrics";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COACH_METRICS")]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum connections held by the pool.
    pub pool_max_size: Option<u32>,
    /// Whether XP awards are applied. Data is tracked either way.
    #[ortho_config(default = true)]
    pub xp_enabled: bool,
}

impl AppConfig {
    /// The configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// The configured database URL, falling back to the default.
    #[must_use]
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// The configured pool size, falling back to the default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Configuration fallback coverage.
    use super::*;

    fn bare_config() -> AppConfig {
        AppConfig {
            bind_addr: None,
            database_url: None,
            pool_max_size: None,
            xp_enabled: true,
        }
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = bare_config();
        assert_eq!(config.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(config.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig {
            bind_addr: Some("127.0.0.1:9999".to_owned()),
            database_url: Some("postgres://db/custom".to_owned()),
            pool_max_size: Some(3),
            xp_enabled: false,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9999");
        assert_eq!(config.database_url(), "postgres://db/custom");
        assert_eq!(config.pool_max_size(), 3);
        assert!(!config.xp_enabled);
    }
}
