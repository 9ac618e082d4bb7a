#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::http::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::adapters::{HeadHunterSettings, SuperJobSettings};
use crate::core::collector::default_languages;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[cfg_attr(feature = "cli", value(name = "superjob"))]
    SuperJob,
    #[cfg_attr(feature = "cli", value(name = "headhunter"))]
    HeadHunter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub languages: Vec<String>,
    pub services: Vec<Service>,
    pub superjob: SuperJobSettings,
    pub headhunter: HeadHunterSettings,
    pub timeout_seconds: u64,
    pub concurrent_requests: usize,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            services: vec![Service::SuperJob, Service::HeadHunter],
            superjob: SuperJobSettings::default(),
            headhunter: HeadHunterSettings::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            concurrent_requests: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Applies every value present in `file` on top of the current settings.
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        if let Some(collection) = file.collection {
            if let Some(languages) = collection.languages {
                self.languages = languages;
            }
            if let Some(services) = collection.services {
                self.services = services;
            }
            if let Some(timeout) = collection.timeout_seconds {
                self.timeout_seconds = timeout;
            }
            if let Some(concurrent) = collection.concurrent_requests {
                self.concurrent_requests = concurrent;
            }
            if let Some(user_agent) = collection.user_agent {
                self.user_agent = user_agent;
            }
        }

        if let Some(superjob) = file.superjob {
            if let Some(base_url) = superjob.base_url {
                self.superjob.base_url = base_url;
            }
            if superjob.secret_key.is_some() {
                self.superjob.secret_key = superjob.secret_key;
            }
            if let Some(town) = superjob.town {
                self.superjob.town = town;
            }
            if let Some(catalogues) = superjob.catalogues {
                self.superjob.catalogues = catalogues;
            }
        }

        if let Some(headhunter) = file.headhunter {
            if let Some(base_url) = headhunter.base_url {
                self.headhunter.base_url = base_url;
            }
            if let Some(city) = headhunter.city {
                self.headhunter.city = city;
            }
            if let Some(prefix) = headhunter.search_prefix {
                self.headhunter.search_prefix = prefix;
            }
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Drops repeated services, keeping the first occurrence.
    pub(crate) fn dedup_services(&mut self) {
        let mut seen = Vec::with_capacity(self.services.len());
        self.services.retain(|service| {
            if seen.contains(service) {
                false
            } else {
                seen.push(*service);
                true
            }
        });
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(StatsError::ConfigValidationError {
                field: "languages".to_string(),
                message: "at least one language is required".to_string(),
            });
        }
        for language in &self.languages {
            validate_non_empty_string("languages", language)?;
        }

        if self.services.is_empty() {
            return Err(StatsError::ConfigValidationError {
                field: "services".to_string(),
                message: "at least one service is required".to_string(),
            });
        }

        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;

        if self.services.contains(&Service::SuperJob) {
            validate_url("superjob.base_url", &self.superjob.base_url)?;
            let secret_key = validate_required_field("SJ_SECRET_KEY", &self.superjob.secret_key)?;
            validate_non_empty_string("SJ_SECRET_KEY", secret_key)?;
        }
        if self.services.contains(&Service::HeadHunter) {
            validate_url("headhunter.base_url", &self.headhunter.base_url)?;
            validate_non_empty_string("headhunter.city", &self.headhunter.city)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AppConfig {
        let mut config = AppConfig::default();
        config.superjob.secret_key = Some("key".to_string());
        config
    }

    #[test]
    fn test_defaults_cover_both_services_and_all_languages() {
        let config = AppConfig::default();
        assert_eq!(config.services, vec![Service::SuperJob, Service::HeadHunter]);
        assert_eq!(config.languages.len(), 8);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.superjob.town, "Moscow");
        assert_eq!(config.headhunter.city, "Москва");
    }

    #[test]
    fn test_superjob_requires_secret_key() {
        let err = AppConfig::default().validate().unwrap_err();
        assert!(matches!(err, StatsError::MissingConfigError { field } if field == "SJ_SECRET_KEY"));

        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_headhunter_alone_needs_no_key() {
        let config = AppConfig {
            services: vec![Service::HeadHunter],
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = with_key();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = with_key();
        config.concurrent_requests = 0;
        assert!(config.validate().is_err());

        let mut config = with_key();
        config.languages = vec!["Python".to_string(), " ".to_string()];
        assert!(config.validate().is_err());

        let mut config = with_key();
        config.headhunter.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dedup_services_keeps_first_occurrence() {
        let mut config = AppConfig {
            services: vec![Service::HeadHunter, Service::SuperJob, Service::HeadHunter],
            ..AppConfig::default()
        };
        config.dedup_services();
        assert_eq!(config.services, vec![Service::HeadHunter, Service::SuperJob]);
    }
}
