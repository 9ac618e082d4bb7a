use crate::core::salary::{average_salary, estimate_range};
use crate::domain::model::{LanguageStatistics, Vacancy};
use crate::domain::ports::VacancySource;
use crate::utils::error::Result;

/// Fetches every page for `language`, stopping once the source reports no
/// further pages. Records keep the order they were returned in.
pub async fn fetch_all_vacancies<S>(source: &S, language: &str) -> Result<Vec<Vacancy>>
where
    S: VacancySource + ?Sized,
{
    let mut vacancies = Vec::new();
    let mut page = 0u32;

    loop {
        tracing::debug!("📡 {}: fetching '{}' page {}", source.name(), language, page);
        let result = source.fetch_page(language, page).await?;
        tracing::debug!(
            "📡 {}: '{}' page {} returned {} vacancies (more: {})",
            source.name(),
            language,
            page,
            result.vacancies.len(),
            result.has_more
        );
        vacancies.extend(result.vacancies);

        if !result.has_more {
            break;
        }
        page += 1;
    }

    Ok(vacancies)
}

/// Reduces fetched vacancies to counts and an average rouble salary.
pub fn summarize(vacancies: &[Vacancy]) -> LanguageStatistics {
    let estimates: Vec<f64> = vacancies
        .iter()
        .filter_map(|vacancy| vacancy.rub_salary_range())
        .filter_map(|range| estimate_range(&range))
        .collect();

    LanguageStatistics {
        vacancies_found: vacancies.len(),
        vacancies_processed: estimates.len(),
        average_salary: average_salary(&estimates),
    }
}

pub async fn collect_language_statistics<S>(source: &S, language: &str) -> Result<LanguageStatistics>
where
    S: VacancySource + ?Sized,
{
    let vacancies = fetch_all_vacancies(source, language).await?;
    let statistics = summarize(&vacancies);

    tracing::info!(
        "📊 {}: {} found {}, processed {}, average {}",
        source.name(),
        language,
        statistics.vacancies_found,
        statistics.vacancies_processed,
        statistics
            .average_salary
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    Ok(statistics)
}
