use crate::adapters::http::get_json;
use crate::domain::model::{HeadHunterVacancy, Vacancy, VacancyPage};
use crate::domain::ports::VacancySource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const HEADHUNTER_NAME: &str = "HeadHunter";
pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";
pub const DEFAULT_CITY: &str = "Москва";
pub const DEFAULT_SEARCH_PREFIX: &str = "Программист";

const VACANCIES_PATH: &str = "/vacancies/";

#[derive(Debug, Clone)]
pub struct HeadHunterSettings {
    pub base_url: String,
    pub city: String,
    pub search_prefix: String,
}

impl Default for HeadHunterSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            city: DEFAULT_CITY.to_string(),
            search_prefix: DEFAULT_SEARCH_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HeadHunterResponse {
    items: Vec<HeadHunterVacancy>,
    pages: u32,
}

pub struct HeadHunterClient {
    settings: HeadHunterSettings,
    client: Client,
}

impl HeadHunterClient {
    pub fn new(settings: HeadHunterSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            VACANCIES_PATH
        )
    }

    fn search_text(&self, language: &str) -> String {
        if self.settings.search_prefix.is_empty() {
            language.to_string()
        } else {
            format!("{} {}", self.settings.search_prefix, language)
        }
    }
}

#[async_trait]
impl VacancySource for HeadHunterClient {
    fn name(&self) -> &str {
        HEADHUNTER_NAME
    }

    async fn fetch_page(&self, language: &str, page: u32) -> Result<VacancyPage> {
        let text = self.search_text(language);
        let page_param = page.to_string();
        let request = self.client.get(self.endpoint()).query(&[
            ("city", self.settings.city.as_str()),
            ("text", text.as_str()),
            ("page", page_param.as_str()),
        ]);

        let response: HeadHunterResponse = get_json(HEADHUNTER_NAME, request).await?;

        Ok(VacancyPage {
            vacancies: response
                .items
                .into_iter()
                .map(Vacancy::HeadHunter)
                .collect(),
            // `pages` is a count; an empty result reports zero pages.
            has_more: page + 1 < response.pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{build_client, DEFAULT_USER_AGENT};
    use crate::utils::error::StatsError;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client_for(server: &MockServer) -> HeadHunterClient {
        let settings = HeadHunterSettings {
            base_url: server.base_url(),
            ..HeadHunterSettings::default()
        };
        HeadHunterClient::new(
            settings,
            build_client(Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap(),
        )
    }

    #[test]
    fn test_search_text_combines_prefix_and_language() {
        let server = MockServer::start();
        let client = client_for(&server);
        assert_eq!(client.search_text("C++"), "Программист C++");
    }

    #[tokio::test]
    async fn test_fetch_page_reports_more_until_last_page() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET)
                .path("/vacancies/")
                .query_param("page", "0")
                .query_param_exists("city")
                .query_param_exists("text");
            then.status(200).json_body(serde_json::json!({
                "items": [{"id": "1", "salary": null}],
                "found": 3, "pages": 2, "per_page": 2, "page": 0
            }));
        });
        let last = server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "1");
            then.status(200).json_body(serde_json::json!({
                "items": [{"id": "3", "salary": {"currency": "RUR", "from": 1, "to": null}}],
                "found": 3, "pages": 2, "per_page": 2, "page": 1
            }));
        });

        let client = client_for(&server);
        let page0 = client.fetch_page("Go", 0).await.unwrap();
        let page1 = client.fetch_page("Go", 1).await.unwrap();

        first.assert();
        last.assert();
        assert!(page0.has_more);
        assert!(!page1.has_more);
    }

    #[tokio::test]
    async fn test_zero_pages_stops_immediately() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(200).json_body(serde_json::json!({
                "items": [], "found": 0, "pages": 0, "per_page": 20, "page": 0
            }));
        });

        let page = client_for(&server).fetch_page("Cobol", 0).await.unwrap();

        assert!(page.vacancies.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_missing_pages_field_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(200).json_body(serde_json::json!({"items": []}));
        });

        let result = client_for(&server).fetch_page("Ruby", 0).await;

        assert!(matches!(result, Err(StatsError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_server_error_is_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(500);
        });

        let result = client_for(&server).fetch_page("C", 0).await;

        assert!(matches!(
            result,
            Err(StatsError::HttpStatus { status: 500, .. })
        ));
    }
}
