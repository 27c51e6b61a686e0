use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};

/// Where request records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store with a fixed employee roster; state is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Invalid REQUEST_STORE value: {}", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub store_backend: StoreBackend,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup; missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "postgres://localhost/requestflow".to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .unwrap_or_else(|| "your-secret-key-change-this-in-production".to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string());

        let store_backend = match lookup("REQUEST_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        Ok(Config {
            database_url,
            jwt_secret,
            bind_addr,
            store_backend,
        })
    }
}
