//! Runtime configuration loaded from the process environment
//!
//! Values are read after `dotenvy` has merged any `.env` file into the
//! environment, so both sources behave the same way.

use std::env;

/// Default SQLite connection string used when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite:inventory.db";

/// Default listening port used when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 3000;

/// Default upper bound on pooled database connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default directory holding the landing page
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Service configuration
///
/// # Environment Variables
///
/// - `DATABASE_URL` - SQLite connection string (default: "sqlite:inventory.db")
/// - `PORT` - Server port number (default: 3000)
/// - `DATABASE_SSL` - Request encrypted database transport (default: false)
/// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
/// - `STATIC_DIR` - Directory containing `index.html` (default: "public")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Encrypted transport with relaxed certificate checks, for managed hosts.
    /// The embedded engine has no network hop, so this is informational only.
    pub database_ssl: bool,
    pub max_connections: u32,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            database_ssl: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let database_ssl = lookup("DATABASE_SSL")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.database_ssl);

        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_url),
            port,
            database_ssl,
            max_connections,
            static_dir: lookup("STATIC_DIR")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.static_dir),
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "require"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn test_reads_all_values() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:/tmp/assets.db"),
            ("PORT", "8081"),
            ("DATABASE_SSL", "true"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("STATIC_DIR", "web"),
        ]);

        assert_eq!(config.database_url, "sqlite:/tmp/assets.db");
        assert_eq!(config.port, 8081);
        assert!(config.database_ssl);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.static_dir, "web");
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_zero_pool_size_falls_back_to_default() {
        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_ssl_flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" require "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
