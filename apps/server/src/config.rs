use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

pub const DEFAULT_AUTH_COOKIE: &str = "token";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub auth_cookie: String,
    /// JSON document overriding the built-in rate table.
    pub fx_rates_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid PF_LISTEN_ADDR")?;
        let db_path = std::env::var("PF_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("PF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("PF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let raw_secret = std::env::var("PF_JWT_SECRET").context("PF_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&raw_secret)?;
        let auth_cookie = std::env::var("PF_AUTH_COOKIE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_COOKIE.to_string());
        let fx_rates_file = std::env::var("PF_FX_RATES_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            auth_cookie,
            fx_rates_file,
        })
    }
}
