use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    /// Create candidates locally when the backend is unreachable.
    pub local_fallback_create: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            local_fallback_create: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            backend_url: get_env("BACKEND_URL")?,
            request_timeout_secs: get_env_parse_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            page_size: get_env_parse_or("PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            local_fallback_create: get_env_parse_or("LOCAL_FALLBACK_CREATE", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.backend_url).map_err(|e| {
            Error::Config(format!("Invalid value for BACKEND_URL: {}", e))
        })?;
        if self.page_size == 0 {
            return Err(Error::Config("PAGE_SIZE must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
