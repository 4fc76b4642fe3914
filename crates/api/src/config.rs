//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! for everything except the AI gateway key.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `DATABASE_URL`: PostgreSQL connection string; file storage is used when unset
//! - `TIMETABLE_DATA_DIR`: Directory of the file storage (default: "./data")
//! - `TIMETABLE_STORAGE_KEY`: Key of the persisted record (default: "weekly-timetable")
//! - `TIMETABLE_PUBLIC_URL`: Base URL of share links (default: "http://localhost:3000/")
//! - `TIMETABLE_TIMEZONE`: IANA zone used for calendar export (default: "UTC")
//! - `AI_GATEWAY_URL`, `AI_GATEWAY_API_KEY`, `AI_MODEL`, `AI_REQUEST_TIMEOUT_SECONDS`

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use std::env;
use std::path::PathBuf;
use timetable_core::store::DEFAULT_STORAGE_KEY;
use tracing::Level;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Settings of the outbound text-generation gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    /// Requests fail with an upstream error while this is unset.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            request_timeout: 60,
        }
    }
}

/// Configuration for the timetable server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// PostgreSQL connection string; `None` selects file storage
    pub database_url: Option<String>,

    pub data_dir: PathBuf,

    pub storage_key: String,

    /// Page address that share links point at
    pub public_url: String,

    pub timezone: Tz,

    pub gateway: GatewayConfig,
}

fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The TIMETABLE_TIMEZONE value is not a known IANA zone
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Storage settings
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let data_dir = env::var("TIMETABLE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let storage_key =
            env::var("TIMETABLE_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let public_url = env::var("TIMETABLE_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:3000/".to_string());
        let timezone_name = env::var("TIMETABLE_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid TIMETABLE_TIMEZONE value {}: {}", timezone_name, e))?;

        // AI gateway settings
        let gateway = GatewayConfig {
            base_url: env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            api_key: env::var("AI_GATEWAY_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            request_timeout: env::var("AI_REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            database_url,
            data_dir,
            storage_key,
            public_url,
            timezone,
            gateway,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
