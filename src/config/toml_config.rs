use crate::config::Service;
use crate::utils::error::{Result, StatsError};
use crate::utils::logger::redact;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Optional configuration file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub collection: Option<CollectionConfig>,
    pub superjob: Option<SuperJobConfig>,
    pub headhunter: Option<HeadHunterConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    pub languages: Option<Vec<String>>,
    pub services: Option<Vec<Service>>,
    pub timeout_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperJobConfig {
    pub base_url: Option<String>,
    pub secret_key: Option<String>,
    pub town: Option<String>,
    pub catalogues: Option<String>,
}

impl fmt::Debug for SuperJobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperJobConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &redact(&self.secret_key))
            .field("town", &self.town)
            .field("catalogues", &self.catalogues)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadHunterConfig {
    pub base_url: Option<String>,
    pub city: Option<String>,
    pub search_prefix: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses config text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| StatsError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        // An unset `${SJ_SECRET_KEY}` leaves an empty key behind.
        if let Some(superjob) = config.superjob.as_mut() {
            superjob.secret_key = superjob.secret_key.take().filter(|k| !k.trim().is_empty());
        }

        Ok(config)
    }

    /// Replaces `${VAR}` placeholders with environment values; unset variables become empty.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }
}
