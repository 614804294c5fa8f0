use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use crate::services::mailer::DEFAULT_RESEND_API_URL;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAIL_FROM: &str = "noreply@resend.dev";
const DEFAULT_ORGANIZER_EMAIL: &str = "mail@herrlehmanns-weltreise.de";
const DEFAULT_FUNDRAISING_SOURCE_URL: &str =
    "https://www.gofundme.com/f/auf-der-anderen-seite-des-fernsehers-teil-3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid LISTEN_ADDR '{0}'")]
    InvalidListenAddr(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub mail_from: String,
    pub organizer_email: String,
    pub fundraising_source_url: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_raw = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(listen_raw.clone()))?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            resend_api_key: var("RESEND_API_KEY"),
            resend_api_url: var("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            mail_from: var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            organizer_email: var("ORGANIZER_EMAIL")
                .unwrap_or_else(|| DEFAULT_ORGANIZER_EMAIL.to_string()),
            fundraising_source_url: var("FUNDRAISING_SOURCE_URL")
                .unwrap_or_else(|| DEFAULT_FUNDRAISING_SOURCE_URL.to_string()),
            cors_allowed_origins,
        })
    }
}
