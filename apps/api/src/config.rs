use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// A missing `GEMINI_API_KEY` is not a startup error; extraction requests
/// fail with an auth error until it is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: match optional_env("PORT") {
                Some(port) => port.parse::<u16>().context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(bytes) => bytes
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => defaults.max_upload_bytes,
            },
        })
    }
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("RECRUIT_API_TEST_BLANK", "  ");
        assert_eq!(optional_env("RECRUIT_API_TEST_BLANK"), None);
        assert_eq!(optional_env("RECRUIT_API_TEST_NEVER_SET"), None);
    }
}
