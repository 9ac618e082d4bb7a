use crate::adapters::http::get_json;
use crate::domain::model::{SuperJobVacancy, Vacancy, VacancyPage};
use crate::domain::ports::VacancySource;
use crate::utils::error::Result;
use crate::utils::logger::redact;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;

pub const SUPERJOB_NAME: &str = "SuperJob";
pub const DEFAULT_BASE_URL: &str = "https://api.superjob.ru";
pub const DEFAULT_TOWN: &str = "Moscow";
pub const DEFAULT_CATALOGUES: &str = "Разработка, программирование";

const VACANCIES_PATH: &str = "/2.0/vacancies/";
const APP_KEY_HEADER: &str = "X-Api-App-Id";

#[derive(Clone)]
pub struct SuperJobSettings {
    pub base_url: String,
    pub secret_key: Option<String>,
    pub town: String,
    pub catalogues: String,
}

impl SuperJobSettings {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            ..Self::default()
        }
    }
}

impl fmt::Debug for SuperJobSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperJobSettings")
            .field("base_url", &self.base_url)
            .field("secret_key", &redact(&self.secret_key))
            .field("town", &self.town)
            .field("catalogues", &self.catalogues)
            .finish()
    }
}

impl Default for SuperJobSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            secret_key: None,
            town: DEFAULT_TOWN.to_string(),
            catalogues: DEFAULT_CATALOGUES.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuperJobResponse {
    objects: Vec<SuperJobVacancy>,
    more: bool,
}

pub struct SuperJobClient {
    settings: SuperJobSettings,
    client: Client,
}

impl SuperJobClient {
    pub fn new(settings: SuperJobSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            VACANCIES_PATH
        )
    }
}

#[async_trait]
impl VacancySource for SuperJobClient {
    fn name(&self) -> &str {
        SUPERJOB_NAME
    }

    async fn fetch_page(&self, language: &str, page: u32) -> Result<VacancyPage> {
        let page = page.to_string();
        let mut request = self.client.get(self.endpoint());
        if let Some(secret_key) = &self.settings.secret_key {
            request = request.header(APP_KEY_HEADER, secret_key);
        }
        let request = request.query(&[
            ("keyword", language),
            ("catalogues", self.settings.catalogues.as_str()),
            ("town", self.settings.town.as_str()),
            ("page", page.as_str()),
        ]);

        let response: SuperJobResponse = get_json(SUPERJOB_NAME, request).await?;

        Ok(VacancyPage {
            vacancies: response
                .objects
                .into_iter()
                .map(Vacancy::SuperJob)
                .collect(),
            has_more: response.more,
        })
    }
}
