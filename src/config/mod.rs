//! Configuration module for the recipes gateway.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Address the gateway server binds to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Base URL the client commands talk to
    pub api_url: String,
    /// Bearer token sent by the client, if the gateway sits behind an authenticating proxy
    pub api_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("GATEWAY_DB_PATH")
            .unwrap_or_else(|_| "./data/gateway.sqlite".to_string())
            .into();

        let index_path = env::var("GATEWAY_INDEX_PATH")
            .unwrap_or_else(|_| "./data/index".to_string())
            .into();

        let bind_addr = env::var("GATEWAY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("GATEWAY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_url =
            env::var("GATEWAY_API_URL").unwrap_or_else(|_| format!("http://{}", bind_addr));

        let api_token = env::var("GATEWAY_API_TOKEN").ok();

        Ok(Self {
            db_path,
            index_path,
            bind_addr,
            log_level,
            api_url,
            api_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "GATEWAY_DB_PATH",
        "GATEWAY_INDEX_PATH",
        "GATEWAY_BIND_ADDR",
        "GATEWAY_LOG_LEVEL",
        "GATEWAY_API_URL",
        "GATEWAY_API_TOKEN",
    ];

    // Both cases run in one test: the process environment is shared between test threads.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/gateway.sqlite"));
        assert_eq!(config.index_path, PathBuf::from("./data/index"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert!(config.api_token.is_none());

        env::set_var("GATEWAY_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());
        env::remove_var("GATEWAY_BIND_ADDR");
    }
}
