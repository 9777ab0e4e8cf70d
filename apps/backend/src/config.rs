//! Environment configuration

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use mixlingo_core::Language;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub source_lang: Language,
    pub provider_timeout: Duration,
    /// `None` means the cache is unbounded.
    pub cache_capacity: Option<NonZeroUsize>,
    pub libretranslate_url: Option<String>,
    pub libretranslate_api_key: Option<String>,
    pub lingva_url: Option<String>,
    pub mymemory_url: Option<String>,
    pub mymemory_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            source_lang: Language::English,
            provider_timeout: Duration::from_millis(5000),
            cache_capacity: None,
            libretranslate_url: None,
            libretranslate_api_key: None,
            lingva_url: None,
            mymemory_url: None,
            mymemory_email: None,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let source_lang = match text("SOURCE_LANG") {
            Some(code) => Language::from_code(&code).ok_or(ConfigError::Invalid {
                name: "SOURCE_LANG",
                value: code,
            })?,
            None => defaults.source_lang,
        };

        let timeout_ms: u64 = parse(&text, "PROVIDER_TIMEOUT_MS")?.unwrap_or(5000);
        let capacity: usize = parse(&text, "TRANSLATION_CACHE_CAPACITY")?.unwrap_or(0);

        Ok(Self {
            host: text("HOST").unwrap_or(defaults.host),
            port: parse(&text, "PORT")?.unwrap_or(defaults.port),
            source_lang,
            provider_timeout: Duration::from_millis(timeout_ms),
            cache_capacity: NonZeroUsize::new(capacity),
            libretranslate_url: text("LIBRETRANSLATE_URL"),
            libretranslate_api_key: text("LIBRETRANSLATE_API_KEY"),
            lingva_url: text("LINGVA_URL"),
            mymemory_url: text("MYMEMORY_URL"),
            mymemory_email: text("MYMEMORY_EMAIL"),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, F>(text: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    text(name)
        .map(|value| value.parse().map_err(|_| ConfigError::Invalid { name, value }))
        .transpose()
}
