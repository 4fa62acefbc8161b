//! HTTP server settings.
//!
//! # Environment Variables
//!
//! - `SERVER_ADDR`: listen address (default: `0.0.0.0:3000`)
//! - `COOKIE_SECURE`: mark the refresh cookie `Secure` (default: `false`)

use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub cookie_secure: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            cookie_secure: false,
        }
    }
}
