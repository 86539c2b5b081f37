//! Environment configuration

use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::Context;
use tracing::{info, warn};

/// Server settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Number of decks shown on the dashboard when the client does not ask.
    pub recent_decks_limit: i64,
    /// Seconds a study session may sit unused before it is discarded.
    pub study_session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: try_load("PORT", 3000)?,
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", 10)?,
            recent_decks_limit: try_load("RECENT_DECKS_LIMIT", 5)?,
            study_session_idle_secs: try_load("STUDY_SESSION_IDLE_SECS", 1800)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn study_session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.study_session_idle_secs)
    }
}

fn try_load<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| {
            warn!("Invalid {key} value {raw:?}: {e}");
            anyhow::anyhow!("invalid {key}: {e}")
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_uses_default() {
        let port: u16 = try_load("FLASHCARDS_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config {
            database_url: "postgres://localhost/flashcards".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_connections: 10,
            recent_decks_limit: 5,
            study_session_idle_secs: 90,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.study_session_idle_timeout(), Duration::from_secs(90));
    }
}
