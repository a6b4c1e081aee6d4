//! Configuration module for the alumni portal.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Populate sample data on startup when the store has no users
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("ALUMNI_PORTAL_DB_PATH")
            .unwrap_or_else(|_| "./data/alumni_portal.sqlite".to_string())
            .into();

        let bind_addr = env::var("ALUMNI_PORTAL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid ALUMNI_PORTAL_BIND_ADDR format");

        let log_level = env::var("ALUMNI_PORTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env_flag("ALUMNI_PORTAL_LOG_JSON", false);
        let seed_sample_data = env_flag("ALUMNI_PORTAL_SEED", true);

        Self {
            db_path,
            bind_addr,
            log_level,
            log_json,
            seed_sample_data,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => parse_flag(&value).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("ALUMNI_PORTAL_DB_PATH");
        env::remove_var("ALUMNI_PORTAL_BIND_ADDR");
        env::remove_var("ALUMNI_PORTAL_LOG_LEVEL");
        env::remove_var("ALUMNI_PORTAL_LOG_JSON");
        env::remove_var("ALUMNI_PORTAL_SEED");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/alumni_portal.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
