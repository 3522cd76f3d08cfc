//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::wizard::ValidationRules;

const DEFAULT_DB_PATH: &str = "./data/hubbly.db";

/// Where finished profiles are written.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Local libSQL database file.
    Local { db_path: PathBuf },
    /// PostgREST-style endpoint.
    Rest {
        base_url: String,
        api_key: SecretString,
    },
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    pub store: StoreConfig,
    /// Deadline for every call to an external collaborator.
    pub service_timeout: Duration,
    /// Upper bound on sisters + brothers.
    pub max_siblings: u32,
    /// Prefix used when a phone number is typed in national format.
    pub default_country_code: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            store: StoreConfig::Local {
                db_path: PathBuf::from(DEFAULT_DB_PATH),
            },
            service_timeout: Duration::from_secs(30),
            max_siblings: 20,
            default_country_code: "+92".to_string(),
        }
    }
}

impl AppConfig {
    /// Build config from `HUBBLY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Unset keys fall back to defaults;
    /// set-but-malformed keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse(&get, "HUBBLY_PORT")?.unwrap_or(defaults.port);
        let service_timeout = parse::<u64, _>(&get, "HUBBLY_SERVICE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.service_timeout);
        let max_siblings = parse(&get, "HUBBLY_MAX_SIBLINGS")?.unwrap_or(defaults.max_siblings);

        let default_country_code = match get("HUBBLY_DEFAULT_COUNTRY_CODE") {
            Some(cc) => {
                let cc = if cc.starts_with('+') { cc } else { format!("+{cc}") };
                if cc.len() < 2 || !cc[1..].chars().all(|c| c.is_ascii_digit()) {
                    return Err(ConfigError::InvalidValue {
                        key: "HUBBLY_DEFAULT_COUNTRY_CODE".into(),
                        message: format!("expected digits like +92, got {cc}"),
                    });
                }
                cc
            }
            None => defaults.default_country_code,
        };

        let store = match get("HUBBLY_REST_URL") {
            Some(base_url) => {
                let api_key = get("HUBBLY_REST_API_KEY")
                    .ok_or_else(|| ConfigError::MissingEnvVar("HUBBLY_REST_API_KEY".into()))?;
                StoreConfig::Rest {
                    base_url,
                    api_key: SecretString::from(api_key),
                }
            }
            None => StoreConfig::Local {
                db_path: PathBuf::from(
                    get("HUBBLY_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
                ),
            },
        };

        Ok(Self {
            port,
            store,
            service_timeout,
            max_siblings,
            default_country_code,
        })
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            max_siblings: self.max_siblings,
        }
    }
}

fn parse<T, G>(get: &G, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
