//! Process configuration read from the environment.

use anyhow::{Context, Result};

use trackhub_observability::LogFormat;

/// Secret used when `JWT_SECRET` is unset. Only fit for local development.
pub const DEV_JWT_SECRET: &str = "dev-secret";

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Where documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
    pub cors_origins: Vec<String>,
    pub store: StoreBackend,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `HOST`         | `0.0.0.0`               |
    /// | `PORT`         | `8080`                  |
    /// | `JWT_SECRET`   | `dev-secret`            |
    /// | `JWT_AUDIENCE` | unset (not checked)     |
    /// | `CORS_ORIGINS` | `http://localhost:5173` |
    /// | `DATABASE_URL` | unset (in-memory store) |
    /// | `LOG_FORMAT`   | `json`                  |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] but over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => 8080,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .context("invalid LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store = match var("DATABASE_URL") {
            Some(url) => StoreBackend::Postgres { url },
            None => StoreBackend::InMemory,
        };

        Ok(Self {
            host,
            port,
            jwt_secret: var("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.into()),
            jwt_audience: var("JWT_AUDIENCE"),
            cors_origins,
            store,
            log_format,
        })
    }

    /// In-memory configuration with the given signing secret.
    pub fn local(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: jwt_secret.into(),
            jwt_audience: None,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.into()],
            store: StoreBackend::InMemory,
            log_format: LogFormat::Pretty,
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
