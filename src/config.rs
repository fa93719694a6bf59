/*
 * Responsibility
 * - 環境変数の読み込み (JWT_SECRET, DATABASE_URL, CORS, sqids, ...)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - lookup を差し替えられる from_vars() を核にして、テストから直接組み立てられるようにする
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,

    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    // HS256 shared secret; never printed
    pub jwt_secret: String,
    pub token_leeway_seconds: u64,

    pub conceal_foreign_notes: bool,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database", &self.database_url.as_ref().map(|_| "<set>"))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("conceal_foreign_notes", &self.conceal_foreign_notes)
            .finish_non_exhaustive()
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn parse_bool(raw: Option<String>) -> bool {
    matches!(
        raw.unwrap_or_default().trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(var("PORT"), 3000);
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        // Without a database the service falls back to the in-memory store,
        // which is only acceptable outside production.
        let database_url = var("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let db_max_connections = parse_or(var("DB_MAX_CONNECTIONS"), 5u32);
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }
        let db_acquire_timeout =
            Duration::from_secs(parse_or(var("DB_ACQUIRE_TIMEOUT_SECONDS"), 5u64));

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length = parse_or(var("SQIDS_MIN_LENGTH"), 10usize);
        let sqids_alphabet = var("SQIDS_ALPHABET").unwrap_or_else(|| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }
        let token_leeway_seconds = parse_or(var("TOKEN_LEEWAY_SECONDS"), 60u64);

        let conceal_foreign_notes = parse_bool(var("CONCEAL_FOREIGN_NOTES"));

        let request_timeout = Duration::from_secs(parse_or(var("REQUEST_TIMEOUT_SECONDS"), 30u64));
        let request_body_limit_bytes = parse_or(var("REQUEST_BODY_LIMIT_BYTES"), 1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_max_connections,
            db_acquire_timeout,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            jwt_secret,
            token_leeway_seconds,
            conceal_foreign_notes,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.database_url.is_none());
        assert_eq!(config.token_leeway_seconds, 60);
        assert_eq!(config.sqids_min_length, 10);
        assert!(!config.conceal_foreign_notes);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            config_from(&[]).err(),
            Some(ConfigError::Missing("JWT_SECRET"))
        );
        assert_eq!(
            config_from(&[("JWT_SECRET", "")]).err(),
            Some(ConfigError::Invalid("JWT_SECRET"))
        );
    }

    #[test]
    fn production_requires_database() {
        let err = config_from(&[("JWT_SECRET", "s"), ("APP_ENV", "prod")]).err();
        assert_eq!(err, Some(ConfigError::Missing("DATABASE_URL")));

        let config = config_from(&[
            ("JWT_SECRET", "s"),
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://localhost/notes"),
        ])
        .unwrap();
        assert!(config.app_env.is_production());
    }

    #[test]
    fn parses_lists_and_flags() {
        let config = config_from(&[
            ("JWT_SECRET", "s"),
            ("PORT", "5000"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("CONCEAL_FOREIGN_NOTES", "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 5000);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.conceal_foreign_notes);
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = config_from(&[("JWT_SECRET", "do-not-print")]).unwrap();
        assert!(!format!("{config:?}").contains("do-not-print"));
    }
}
