use crate::domain::model::VacancyPage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A job board that can be searched page by page.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Display name used for report titles and diagnostics.
    fn name(&self) -> &str;

    /// Fetches one zero-based page of vacancies matching `language`.
    async fn fetch_page(&self, language: &str, page: u32) -> Result<VacancyPage>;
}
