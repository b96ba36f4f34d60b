// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which itinerary supplier the application runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierMode {
    /// Generative-AI backed supplier
    Live,
    /// Fixed sample data, used when no credential is configured
    Mock,
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Generative-AI API key; empty means mock data
    pub gemini_api_key: String,

    /// Model used for candidates and itineraries
    pub gemini_model: String,

    /// Base URL of the generative-AI REST API
    pub gemini_base_url: String,

    /// Timeout for a single supplier request, in seconds
    pub supplier_timeout_secs: u64,

    /// Marker file holding the persisted sign-in flag
    pub auth_state_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Config {
            server_address: get("SERVER_ADDRESS", "127.0.0.1"),

            server_port: get("SERVER_PORT", "8003").parse().unwrap_or(8003),

            environment: get("ENVIRONMENT", "development"),

            log_level: get("LOG_LEVEL", "info"),

            // Bare API_KEY is accepted as a fallback name
            gemini_api_key: var("GEMINI_API_KEY")
                .or_else(|| var("API_KEY"))
                .unwrap_or_default(),

            gemini_model: get("GEMINI_MODEL", "gemini-2.5-flash"),

            gemini_base_url: get(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),

            supplier_timeout_secs: get("SUPPLIER_TIMEOUT_SECS", "30").parse().unwrap_or(30),

            auth_state_path: PathBuf::from(get("AUTH_STATE_PATH", ".solo-trips-auth")),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.server_address.is_empty() {
            return Err("SERVER_ADDRESS is required".to_string());
        }

        if self.supplier_timeout_secs == 0 {
            return Err("SUPPLIER_TIMEOUT_SECS must be positive".to_string());
        }

        if self.gemini_api_key.is_empty() {
            log::warn!("GEMINI_API_KEY not configured - itineraries will use sample data");
        }

        Ok(())
    }

    /// Supplier selected by the configured credential
    pub fn supplier_mode(&self) -> SupplierMode {
        if self.gemini_api_key.trim().is_empty() {
            SupplierMode::Mock
        } else {
            SupplierMode::Live
        }
    }

    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_secs(self.supplier_timeout_secs)
    }
}
