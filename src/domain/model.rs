use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Currency code SuperJob uses for roubles.
pub const SUPERJOB_CURRENCY: &str = "rub";
/// Currency code HeadHunter uses for roubles.
pub const HEADHUNTER_CURRENCY: &str = "RUR";

#[derive(Debug, Clone, Deserialize)]
pub struct SuperJobVacancy {
    pub currency: String,
    #[serde(default)]
    pub payment_from: Option<f64>,
    #[serde(default)]
    pub payment_to: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadHunterSalary {
    pub currency: String,
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadHunterVacancy {
    #[serde(default)]
    pub salary: Option<HeadHunterSalary>,
}

/// One posting as returned by either service.
#[derive(Debug, Clone)]
pub enum Vacancy {
    SuperJob(SuperJobVacancy),
    HeadHunter(HeadHunterVacancy),
}

/// Salary bounds in roubles. A bound of zero counts as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub from: Option<f64>,
    pub to: Option<f64>,
}

impl SalaryRange {
    pub fn new(from: Option<f64>, to: Option<f64>) -> Self {
        Self {
            from: from.filter(|v| *v > 0.0),
            to: to.filter(|v| *v > 0.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl Vacancy {
    /// Salary bounds if the vacancy is paid in roubles, `None` otherwise.
    pub fn rub_salary_range(&self) -> Option<SalaryRange> {
        match self {
            Vacancy::SuperJob(v) => {
                if v.currency != SUPERJOB_CURRENCY {
                    return None;
                }
                Some(SalaryRange::new(v.payment_from, v.payment_to))
            }
            Vacancy::HeadHunter(v) => {
                let salary = v.salary.as_ref()?;
                if salary.currency != HEADHUNTER_CURRENCY {
                    return None;
                }
                Some(SalaryRange::new(salary.from, salary.to))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct VacancyPage {
    pub vacancies: Vec<Vacancy>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageStatistics {
    pub vacancies_found: usize,
    pub vacancies_processed: usize,
    pub average_salary: Option<u64>,
}

/// Per-language statistics of one service, kept in collection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub service: String,
    #[serde(serialize_with = "serialize_ordered")]
    pub languages: Vec<(String, LanguageStatistics)>,
}

impl StatisticsReport {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            languages: Vec::new(),
        }
    }

    pub fn insert(&mut self, language: impl Into<String>, statistics: LanguageStatistics) {
        self.languages.push((language.into(), statistics));
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStatistics> {
        self.languages
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, stats)| stats)
    }

    pub fn language_names(&self) -> Vec<&str> {
        self.languages.iter().map(|(name, _)| name.as_str()).collect()
    }
}

pub(crate) fn serialize_ordered<S: Serializer>(
    languages: &[(String, LanguageStatistics)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(languages.len()))?;
    for (language, stats) in languages {
        map.serialize_entry(language, stats)?;
    }
    map.end()
}
