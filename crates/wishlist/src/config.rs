//! Environment configuration.
//!
//! Read once at startup. Everything but the Appwrite coordinates has a default; leaving
//! `APPWRITE_ENDPOINT` unset selects the in-memory backend.

use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_GATE_DATE: &str = "2024-05-03";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(String),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: String, value: String },
}

/// Coordinates of the hosted document store and file bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub bucket_id: String,
    /// Server API key. Requests go out unauthenticated without one.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub list_limit: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistConfig {
    /// `None` runs against the in-memory backend.
    pub appwrite: Option<AppwriteConfig>,
    pub gate_date: String,
    pub actor_buffer: usize,
}

impl WishlistConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let appwrite = match vars.get("APPWRITE_ENDPOINT") {
            Some(endpoint) => Some(AppwriteConfig {
                endpoint,
                project_id: vars.require("APPWRITE_PROJECT_ID")?,
                database_id: vars.require("APPWRITE_DATABASE_ID")?,
                collection_id: vars.require("APPWRITE_COLLECTION_ID")?,
                bucket_id: vars.require("APPWRITE_BUCKET_ID")?,
                api_key: vars.get("APPWRITE_API_KEY"),
                timeout: Duration::from_secs(vars.parse_or("APPWRITE_TIMEOUT_SECS", "30")?),
                list_limit: vars.parse_or("APPWRITE_LIST_LIMIT", "100")?,
            }),
            None => {
                warn!("APPWRITE_ENDPOINT not set, using the in-memory backend");
                None
            }
        };

        Ok(Self {
            appwrite,
            gate_date: vars.parse_or("WISHLIST_GATE_DATE", DEFAULT_GATE_DATE)?,
            actor_buffer: vars.parse_or("WISHLIST_ACTOR_BUFFER", "32")?,
        })
    }
}

struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    /// Blank values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T::Err: Display,
    {
        let value = self.get(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        });
        value.parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key: key.to_string(),
                value,
            }
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
    fn test_defaults_without_endpoint() {
        let config = WishlistConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.appwrite, None);
        assert_eq!(config.gate_date, "2024-05-03");
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn test_full_appwrite_config() {
        let config = WishlistConfig::from_lookup(lookup(&[
            ("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1"),
            ("APPWRITE_PROJECT_ID", "proj"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_COLLECTION_ID", "col"),
            ("APPWRITE_BUCKET_ID", "imgs"),
            ("APPWRITE_API_KEY", "secret"),
            ("APPWRITE_TIMEOUT_SECS", "5"),
            ("WISHLIST_GATE_DATE", "2025-01-01"),
        ]))
        .unwrap();

        let appwrite = config.appwrite.unwrap();
        assert_eq!(appwrite.bucket_id, "imgs");
        assert_eq!(appwrite.api_key.as_deref(), Some("secret"));
        assert_eq!(appwrite.timeout, Duration::from_secs(5));
        assert_eq!(appwrite.list_limit, 100);
        assert_eq!(config.gate_date, "2025-01-01");
    }

    #[test]
    fn test_endpoint_requires_ids() {
        let result = WishlistConfig::from_lookup(lookup(&[
            ("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1"),
            ("APPWRITE_PROJECT_ID", "proj"),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::Missing("APPWRITE_DATABASE_ID".to_string()))
        );
    }

    #[test]
    fn test_invalid_number() {
        let result = WishlistConfig::from_lookup(lookup(&[("WISHLIST_ACTOR_BUFFER", "lots")]));
        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: "WISHLIST_ACTOR_BUFFER".to_string(),
                value: "lots".to_string(),
            })
        );
    }
}
