//! # configs
//!
//! One immutable configuration struct assembled from the environment at
//! startup and passed by reference to the components that need it.
//! Business logic never reads the environment directly.

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Flat view of the environment. Variable names follow the deployment's
/// conventions (PORT, DATABASE_URL, ADMIN_API_KEY, BREVO_API_KEY, ...).
#[derive(Debug, Deserialize)]
struct RawConfig {
    port: u16,
    host: String,
    database_url: Option<String>,
    db_max_connections: u32,
    admin_api_key: Option<SecretString>,
    brevo_api_key: Option<SecretString>,
    brevo_api_base: String,
    email_from: String,
    email_from_name: String,
    email_to: Option<String>,
    site_phone: Option<String>,
    rate_limit_window_ms: u64,
    rate_limit_max: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Shared secret for the admin listing endpoint. `None` means the
    /// endpoint denies every request.
    pub api_key: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Brevo credential. `None` turns both notification sends into no-ops.
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Recipient of the admin alert. `None` skips the admin alert.
    pub admin_email: Option<String>,
    /// Phone number shown in the customer auto-reply footer.
    pub site_phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub admin: AdminConfig,
    pub mail: MailConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and the process environment into a single
    /// immutable config. Missing optional values are logged as warnings by
    /// the consumers that care, not here.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw: RawConfig = config::Config::builder()
            .set_default("port", 5000_i64)?
            .set_default("host", "0.0.0.0")?
            .set_default("db_max_connections", 5_i64)?
            .set_default("brevo_api_base", "https://api.brevo.com")?
            .set_default("email_from", "no-reply@shreekrishnafabrication.in")?
            .set_default("email_from_name", "Shree Krishna Fabrication")?
            .set_default("rate_limit_window_ms", 60_000_i64)?
            .set_default("rate_limit_max", 10_i64)?
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        Ok(assemble(raw))
    }
}

fn assemble(raw: RawConfig) -> AppConfig {
    let database = match raw.database_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => Some(DatabaseConfig {
            url,
            max_connections: raw.db_max_connections,
        }),
        None => {
            warn!("DATABASE_URL not set, submissions will not survive a restart");
            None
        }
    };

    AppConfig {
        server: ServerConfig {
            host: raw.host,
            port: raw.port,
        },
        database,
        admin: AdminConfig {
            api_key: nonempty_secret(raw.admin_api_key),
        },
        mail: MailConfig {
            api_key: nonempty_secret(raw.brevo_api_key),
            api_base: raw.brevo_api_base.trim_end_matches('/').to_string(),
            sender_email: raw.email_from,
            sender_name: raw.email_from_name,
            admin_email: raw.email_to.filter(|s| !s.trim().is_empty()),
            site_phone: raw.site_phone.filter(|s| !s.trim().is_empty()),
        },
        rate_limit: RateLimitConfig {
            window: Duration::from_millis(raw.rate_limit_window_ms),
            max_requests: raw.rate_limit_max,
        },
    }
}

/// An empty secret behaves like an absent one, so `ADMIN_API_KEY=""` cannot
/// accidentally open the admin endpoint.
fn nonempty_secret(secret: Option<SecretString>) -> Option<SecretString> {
    use secrecy::ExposeSecret;
    secret.filter(|s| !s.expose_secret().trim().is_empty())
}
