use crate::config::{AppConfig, OutputFormat, Service, TomlConfig};
use crate::utils::error::Result;
use crate::utils::logger::redact;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Flags override the config file, which overrides the built-in defaults.
#[derive(Clone, Parser)]
#[command(name = "job-salary-stats")]
#[command(about = "Average programming salaries in Moscow from SuperJob and HeadHunter")]
pub struct CliConfig {
    #[arg(long, env = "SJ_SECRET_KEY", hide_env_values = true)]
    pub sj_secret_key: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Languages to search for, in report order")]
    pub languages: Vec<String>,

    #[arg(long, value_enum, value_delimiter = ',')]
    pub services: Vec<Service>,

    #[arg(long, help = "HTTP request timeout")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Languages collected in parallel per service")]
    pub concurrent_requests: Option<usize>,

    #[arg(long)]
    pub superjob_url: Option<String>,

    #[arg(long)]
    pub headhunter_url: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[arg(long, help = "TOML file with collection/superjob/headhunter sections")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            config = config.merge_file(TomlConfig::from_file(path)?);
        }

        if !self.languages.is_empty() {
            config.languages = self.languages.iter().map(|l| l.trim().to_string()).collect();
        }
        if !self.services.is_empty() {
            config.services = self.services.clone();
        }
        if let Some(key) = self.sj_secret_key.as_ref().filter(|k| !k.trim().is_empty()) {
            config.superjob.secret_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.concurrent_requests = concurrent;
        }
        if let Some(url) = &self.superjob_url {
            config.superjob.base_url = url.clone();
        }
        if let Some(url) = &self.headhunter_url {
            config.headhunter.base_url = url.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }

        config.dedup_services();
        Ok(config)
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("sj_secret_key", &redact(&self.sj_secret_key))
            .field("languages", &self.languages)
            .field("services", &self.services)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("superjob_url", &self.superjob_url)
            .field("headhunter_url", &self.headhunter_url)
            .field("user_agent", &self.user_agent)
            .field("format", &self.format)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .finish()
    }
}
