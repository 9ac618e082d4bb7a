use crate::core::pipeline::collect_language_statistics;
use crate::domain::model::{LanguageStatistics, StatisticsReport};
use crate::domain::ports::VacancySource;
use crate::utils::error::{Result, StatsError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const DEFAULT_LANGUAGES: [&str; 8] =
    ["Python", "C#", "Java", "JavaScript", "Ruby", "C++", "PHP", "C"];

pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Runs the per-language pipeline for an ordered list of languages.
pub struct StatisticsCollector {
    languages: Vec<String>,
    concurrency: usize,
}

impl StatisticsCollector {
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            languages,
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` languages in flight at once. The report
    /// order does not depend on this setting.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub async fn collect<S>(&self, source: Arc<S>) -> Result<StatisticsReport>
    where
        S: VacancySource + 'static,
    {
        let started = Instant::now();
        tracing::info!(
            "🚀 {}: collecting statistics for {} languages",
            source.name(),
            self.languages.len()
        );

        let report = if self.concurrency > 1 {
            self.collect_concurrently(source).await?
        } else {
            self.collect_sequentially(source.as_ref()).await?
        };

        tracing::info!(
            "✅ {}: collection finished in {:?}",
            report.service,
            started.elapsed()
        );
        Ok(report)
    }

    async fn collect_sequentially<S>(&self, source: &S) -> Result<StatisticsReport>
    where
        S: VacancySource + ?Sized,
    {
        let mut report = StatisticsReport::new(source.name());
        for language in &self.languages {
            let statistics = collect_language_statistics(source, language).await?;
            report.insert(language.clone(), statistics);
        }
        Ok(report)
    }

    async fn collect_concurrently<S>(&self, source: Arc<S>) -> Result<StatisticsReport>
    where
        S: VacancySource + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, language) in self.languages.iter().enumerate() {
            let source = Arc::clone(&source);
            let semaphore = Arc::clone(&semaphore);
            let language = language.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                let statistics = collect_language_statistics(source.as_ref(), &language).await?;
                Ok::<_, StatsError>((index, statistics))
            });
        }

        let mut slots: Vec<Option<LanguageStatistics>> = vec![None; self.languages.len()];
        // Returning early drops the JoinSet, which aborts the remaining tasks.
        while let Some(joined) = tasks.join_next().await {
            let (index, statistics) = joined??;
            slots[index] = Some(statistics);
        }

        let mut report = StatisticsReport::new(source.name());
        for (language, statistics) in self.languages.iter().zip(slots) {
            if let Some(statistics) = statistics {
                report.insert(language.clone(), statistics);
            }
        }
        Ok(report)
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new(default_languages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SuperJobVacancy, Vacancy, VacancyPage};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves one page per language; languages in `failing` return an error.
    struct LanguageSource {
        salaries: HashMap<String, Vec<f64>>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl LanguageSource {
        fn new(salaries: Vec<(&str, Vec<f64>)>) -> Self {
            Self {
                salaries: salaries
                    .into_iter()
                    .map(|(lang, s)| (lang.to_string(), s))
                    .collect(),
                failing: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VacancySource for LanguageSource {
        fn name(&self) -> &str {
            "Test board"
        }

        async fn fetch_page(&self, language: &str, _page: u32) -> Result<VacancyPage> {
            self.calls.lock().unwrap().push(language.to_string());
            if self.failing.iter().any(|l| l == language) {
                return Err(StatsError::HttpStatus {
                    service: "Test board".to_string(),
                    status: 500,
                    url: "http://localhost/".to_string(),
                });
            }
            // Shorter lists finish first so concurrent completion order differs
            // from the configured order.
            let salaries = self.salaries.get(language).cloned().unwrap_or_default();
            tokio::time::sleep(Duration::from_millis(5 * salaries.len() as u64)).await;
            Ok(VacancyPage {
                vacancies: salaries
                    .into_iter()
                    .map(|s| {
                        Vacancy::SuperJob(SuperJobVacancy {
                            currency: "rub".to_string(),
                            payment_from: Some(s),
                            payment_to: Some(s),
                        })
                    })
                    .collect(),
                has_more: false,
            })
        }
    }

    #[test]
    fn test_default_language_order() {
        let collector = StatisticsCollector::default();
        assert_eq!(
            collector.languages(),
            &["Python", "C#", "Java", "JavaScript", "Ruby", "C++", "PHP", "C"]
        );
    }

    #[tokio::test]
    async fn test_report_keeps_language_order_including_empty_languages() {
        let source = Arc::new(LanguageSource::new(vec![
            ("Python", vec![100000.0, 200000.0]),
            ("C", vec![50000.0]),
        ]));
        let collector = StatisticsCollector::default();

        let report = collector.collect(Arc::clone(&source)).await.unwrap();

        assert_eq!(report.service, "Test board");
        assert_eq!(report.language_names(), DEFAULT_LANGUAGES.to_vec());
        assert_eq!(report.get("Python").unwrap().average_salary, Some(150000));
        assert_eq!(report.get("Ruby").unwrap().vacancies_found, 0);
        assert_eq!(report.get("Ruby").unwrap().average_salary, None);
        assert_eq!(*source.calls.lock().unwrap(), default_languages());
    }

    #[tokio::test]
    async fn test_custom_language_list() {
        let source = Arc::new(LanguageSource::new(vec![("Rust", vec![300000.0])]));
        let collector = StatisticsCollector::new(vec!["Rust".to_string(), "Go".to_string()]);

        let report = collector.collect(source).await.unwrap();

        assert_eq!(report.language_names(), vec!["Rust", "Go"]);
        assert_eq!(report.get("Rust").unwrap().vacancies_processed, 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_collection() {
        let mut source = LanguageSource::new(vec![("Python", vec![1.0])]);
        source.failing.push("Java".to_string());
        let source = Arc::new(source);

        let result = StatisticsCollector::default().collect(Arc::clone(&source)).await;

        assert!(matches!(result, Err(StatsError::HttpStatus { status: 500, .. })));
        // Nothing after the failing language is requested.
        assert_eq!(*source.calls.lock().unwrap(), vec!["Python", "C#", "Java"]);
    }

    #[tokio::test]
    async fn test_concurrent_collection_preserves_order() {
        let source = Arc::new(LanguageSource::new(vec![
            ("Python", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            ("C#", vec![1.0, 2.0, 3.0, 4.0]),
            ("Java", vec![1.0]),
            ("PHP", vec![10.0, 20.0]),
        ]));
        let collector = StatisticsCollector::default().with_concurrency(4);

        let report = collector.collect(source).await.unwrap();

        assert_eq!(report.language_names(), DEFAULT_LANGUAGES.to_vec());
        assert_eq!(report.get("Python").unwrap().vacancies_found, 6);
        assert_eq!(report.get("PHP").unwrap().average_salary, Some(15));
    }

    #[tokio::test]
    async fn test_concurrent_failure_aborts_collection() {
        let mut source = LanguageSource::new(vec![]);
        source.failing.push("Ruby".to_string());

        let result = StatisticsCollector::default()
            .with_concurrency(3)
            .collect(Arc::new(source))
            .await;

        assert!(result.is_err());
    }
}
