//! Runtime configuration loaded from the environment.
//!
//! Every value has a logged default so the server boots in development with
//! no environment at all. `OWNER_PASSWORD_HASH` is the one exception: it has
//! no default, and owner login simply fails while it is unset.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Origins allowed by the cross-origin policy when `ALLOWED_ORIGINS` is
/// unset: the deployed storefront and the local Vite dev server.
const DEFAULT_ORIGINS: [&str; 2] = [
    "https://legendary-sprinkles-9e0733.netlify.app",
    "http://localhost:5173",
];

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server listens on.
    pub port: u16,
    /// MongoDB connection string (consumed by the `mongodb_backend` build).
    pub mongo_uri: String,
    /// MongoDB database name.
    pub mongo_db: String,
    /// Directory uploaded cake images are written to.
    pub upload_dir: String,
    /// Origins allowed by the cross-origin policy, credentials included.
    pub allowed_origins: Vec<String>,
    /// bcrypt hash the owner login password is verified against. Unset
    /// behaves as wrong-password; there is no baked-in default secret.
    pub owner_password_hash: Option<String>,
}

impl AppConfig {
    /// Load the configuration from environment variables, falling back to
    /// logged defaults for anything unset.
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "5000"),
            mongo_uri: try_load("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: try_load("MONGO_DB", "cakeshop"),
            upload_dir: try_load("UPLOAD_DIR", "uploads"),
            allowed_origins: load_origins(),
            owner_password_hash: env::var("OWNER_PASSWORD_HASH").ok(),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn load_origins() -> Vec<String> {
    match env::var("ALLOWED_ORIGINS") {
        Ok(raw) => parse_origins(&raw),
        Err(_) => DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
