//! Server configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use tasks::UploadConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
}

impl ApiConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Read configuration through `lookup`
    ///
    /// With `development` set, a missing `JWT_SECRET` falls back to a random
    /// per-process secret; otherwise it is an error.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut auth = match var("JWT_SECRET") {
            Some(secret) => AuthConfig::with_secret(secret.into_bytes()),
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a random secret (tokens will not survive a restart)");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };
        if let Some(raw) = var("TOKEN_TTL_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {raw}"))?;
            if secs == 0 {
                bail!("TOKEN_TTL_SECS must be positive");
            }
            auth.token_ttl = Duration::from_secs(secs);
        }
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        let upload = match var("UPLOAD_DIR") {
            Some(dir) => UploadConfig::with_upload_dir(PathBuf::from(dir)),
            None => UploadConfig::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            auth,
            upload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/tasks")]), true)
                .unwrap();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:4000".parse().unwrap());
        assert_eq!(config.auth.token_ttl_secs(), 86_400);
        assert!(!config.auth.token_secret.is_empty());
        assert_eq!(config.upload.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db/tasks"),
                ("DATABASE_MAX_CONNECTIONS", "20"),
                ("BIND_ADDR", "127.0.0.1:8080"),
                ("JWT_SECRET", "s3cret"),
                ("TOKEN_TTL_SECS", "3600"),
                ("UPLOAD_DIR", "/var/lib/tasks"),
                ("FRONTEND_ORIGINS", "https://app.example.com, "),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.max_connections, 20);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.auth.token_secret, b"s3cret");
        assert_eq!(config.auth.token_ttl_secs(), 3600);
        assert_eq!(config.upload.upload_dir, PathBuf::from("/var/lib/tasks"));
        assert_eq!(config.frontend_origins, ["https://app.example.com"]);
    }

    #[test]
    fn test_missing_required_values() {
        assert!(ApiConfig::from_lookup(lookup(&[]), true).is_err());

        let err = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), false)
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_numbers() {
        for (key, value) in [
            ("DATABASE_MAX_CONNECTIONS", "many"),
            ("TOKEN_TTL_SECS", "0"),
            ("BIND_ADDR", "nowhere"),
        ] {
            let result = ApiConfig::from_lookup(
                lookup(&[("DATABASE_URL", "postgres://db"), (key, value)]),
                true,
            );
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }
}
