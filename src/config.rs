//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Create the admin user and the demo cache on startup
    pub seed_demo_data: bool,
    /// Username of the seeded administrator
    pub admin_username: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `SEED_DEMO_DATA` - Seed admin and demo cache (default: true)
    /// - `ADMIN_USERNAME` - Seeded admin username (default: admin)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_demo_data),
            admin_username: env::var("ADMIN_USERNAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.admin_username),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            seed_demo_data: true,
            admin_username: "admin".to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
