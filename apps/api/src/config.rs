use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request bodies; profiles are small JSON documents.
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_or_default("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            body_limit_bytes: parse_or_default(
                "BODY_LIMIT_BYTES",
                std::env::var("BODY_LIMIT_BYTES").ok(),
                DEFAULT_BODY_LIMIT_BYTES,
            )?,
        })
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_uses_default() {
        assert_eq!(parse_or_default("PORT", None, DEFAULT_PORT).unwrap(), 8080);
    }

    #[test]
    fn test_value_is_trimmed_and_parsed() {
        let limit: usize = parse_or_default("BODY_LIMIT_BYTES", Some(" 2048 ".into()), 0).unwrap();
        assert_eq!(limit, 2048);
    }

    #[test]
    fn test_invalid_value_names_the_variable() {
        let err = parse_or_default::<u16>("PORT", Some("eighty".into()), DEFAULT_PORT).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_out_of_range_port_is_rejected() {
        assert!(parse_or_default::<u16>("PORT", Some("70000".into()), DEFAULT_PORT).is_err());
    }
}
