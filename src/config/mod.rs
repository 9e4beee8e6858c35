//! Configuration module for the pour schedule backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Email address auto-provisioned with the admin role on first sign-in.
const DEFAULT_ADMIN_EMAIL: &str = "cristianospaula1972@gmail.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Email granted the admin role when auto-provisioned
    pub admin_email: String,
    /// Webhook URL invoked when an order is created (notifications disabled when unset)
    pub notify_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("POUR_API_PSK").ok();

        let db_path = env::var("POUR_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("POUR_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid POUR_BIND_ADDR format");

        let log_level = env::var("POUR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin_email =
            env::var("POUR_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

        let notify_url = env::var("POUR_NOTIFY_URL").ok();

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            admin_email,
            notify_url,
        }
    }
}
