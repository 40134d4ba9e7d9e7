use anyhow::{Context, Result, anyhow};

use super::logging::LogFormat;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database_url: Option<String>,
    pub(crate) database_max_connections: u32,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) log_format: LogFormat,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = get_optional(&lookup, "DATABASE_URL");
        let database_max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let log_format = LogFormat::parse(
            &lookup("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
        )?;
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024_usize)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256_usize)?;
        let http_request_timeout_secs =
            parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10_u64)?;

        Ok(Self {
            database_url,
            database_max_connections,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
