//! Server configuration
//!
//! Read from `SHOP_*` environment variables on top of built-in defaults.
//! Database, Redis and remember-me settings have their own `from_env`
//! constructors.

use anyhow::Result;
use ::config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 3000)
    pub port: u16,
    /// Directory holding the `javaScript`, `img` and `CSS` asset folders
    pub static_dir: String,
    /// Idle lifetime of a session in seconds (default: 30 minutes)
    pub session_ttl_seconds: u64,
}

impl ServerConfig {
    /// # Environment Variables
    /// - `SHOP_HOST`
    /// - `SHOP_PORT`
    /// - `SHOP_STATIC_DIR`
    /// - `SHOP_SESSION_TTL_SECONDS`
    pub fn from_env() -> Result<Self> {
        let config = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("static_dir", "static")?
            .set_default("session_ttl_seconds", 1800)?
            .add_source(Environment::with_prefix("SHOP").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "static".to_string(),
            session_ttl_seconds: 1800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 4] = [
        "SHOP_HOST",
        "SHOP_PORT",
        "SHOP_STATIC_DIR",
        "SHOP_SESSION_TTL_SECONDS",
    ];

    fn clear() {
        for var in VARS {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear();
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear();
        unsafe {
            env::set_var("SHOP_PORT", "9000");
            env::set_var("SHOP_SESSION_TTL_SECONDS", "60");
            env::set_var("SHOP_STATIC_DIR", "/srv/shop");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.session_ttl_seconds, 60);
        assert_eq!(config.static_dir, "/srv/shop");
        assert_eq!(config.host, "0.0.0.0");

        clear();
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_port() {
        clear();
        unsafe { env::set_var("SHOP_PORT", "not-a-port") };
        assert!(ServerConfig::from_env().is_err());
        clear();
    }
}
