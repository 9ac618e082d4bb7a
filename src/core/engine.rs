use crate::adapters::http::build_client;
use crate::adapters::{HeadHunterClient, SuperJobClient};
use crate::config::{AppConfig, Service};
use crate::core::collector::StatisticsCollector;
use crate::domain::model::StatisticsReport;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Client;
use std::sync::Arc;

/// Wires the configured services to the collector.
pub struct StatsEngine {
    config: AppConfig,
    client: Client,
    collector: StatisticsCollector,
}

impl StatsEngine {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config.timeout(), &config.user_agent)?;
        let collector = StatisticsCollector::new(config.languages.clone())
            .with_concurrency(config.concurrent_requests);

        Ok(Self {
            config,
            client,
            collector,
        })
    }

    pub fn services(&self) -> &[Service] {
        &self.config.services
    }

    pub async fn collect(&self, service: Service) -> Result<StatisticsReport> {
        match service {
            Service::SuperJob => {
                let source = SuperJobClient::new(self.config.superjob.clone(), self.client.clone());
                self.collector.collect(Arc::new(source)).await
            }
            Service::HeadHunter => {
                let source =
                    HeadHunterClient::new(self.config.headhunter.clone(), self.client.clone());
                self.collector.collect(Arc::new(source)).await
            }
        }
    }

    /// Collects every configured service in order, stopping at the first failure.
    pub async fn run(&self) -> Result<Vec<StatisticsReport>> {
        let mut reports = Vec::with_capacity(self.config.services.len());
        for service in &self.config.services {
            reports.push(self.collect(*service).await?);
        }
        Ok(reports)
    }
}
