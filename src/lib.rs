pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HeadHunterClient, HeadHunterSettings, SuperJobClient, SuperJobSettings};
pub use config::{AppConfig, OutputFormat, Service};
pub use crate::core::{collector::StatisticsCollector, engine::StatsEngine};
pub use domain::model::{LanguageStatistics, StatisticsReport};
pub use utils::error::{Result, StatsError};
