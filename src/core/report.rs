use crate::domain::model::{serialize_ordered, LanguageStatistics, StatisticsReport};
use crate::utils::error::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

const HEADERS: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];
const UNKNOWN_SALARY: &str = "N/A";

/// Renders a report as an ASCII table with the service name set into the
/// top border.
pub fn render_table(report: &StatisticsReport) -> String {
    let mut rows: Vec<[String; 4]> = vec![HEADERS.map(String::from)];
    for (language, stats) in &report.languages {
        rows.push([
            language.clone(),
            stats.vacancies_found.to_string(),
            stats.vacancies_processed.to_string(),
            stats
                .average_salary
                .map(|s| s.to_string())
                .unwrap_or_else(|| UNKNOWN_SALARY.to_string()),
        ]);
    }

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = border(&widths);
    let mut lines = vec![titled_border(&separator, &report.service)];
    for (index, row) in rows.iter().enumerate() {
        lines.push(format_row(row, &widths));
        if index == 0 {
            lines.push(separator.clone());
        }
    }
    lines.push(separator);

    lines.join("\n")
}

/// Pretty JSON of one or more reports, keyed by service name.
pub fn render_json(reports: &[StatisticsReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ByService(reports))?)
}

struct ByService<'a>(&'a [StatisticsReport]);

struct Languages<'a>(&'a [(String, LanguageStatistics)]);

impl Serialize for ByService<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for report in self.0 {
            map.serialize_entry(&report.service, &Languages(&report.languages))?;
        }
        map.end()
    }
}

impl Serialize for Languages<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_ordered(self.0, serializer)
    }
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn titled_border(border: &str, title: &str) -> String {
    let title_len = title.chars().count();
    let border_len = border.chars().count();
    if title.is_empty() || title_len + 2 > border_len {
        return border.to_string();
    }
    let mut line = String::from("+");
    line.push_str(title);
    line.extend(border.chars().skip(title_len + 1));
    line
}

fn format_row(row: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::from("|");
    for (cell, width) in row.iter().zip(widths) {
        let padding = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> StatisticsReport {
        let mut report = StatisticsReport::new("SuperJob");
        report.insert(
            "Python",
            LanguageStatistics {
                vacancies_found: 3,
                vacancies_processed: 2,
                average_salary: Some(140000),
            },
        );
        report.insert(
            "C",
            LanguageStatistics {
                vacancies_found: 0,
                vacancies_processed: 0,
                average_salary: None,
            },
        );
        report
    }

    #[test]
    fn test_render_table_layout() {
        let table = render_table(&sample_report());
        let expected = "\
+SuperJob--+-----------------+---------------------+----------------+
| Language | Vacancies found | Vacancies processed | Average salary |
+----------+-----------------+---------------------+----------------+
| Python   | 3               | 2                   | 140000         |
| C        | 0               | 0                   | N/A            |
+----------+-----------------+---------------------+----------------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_cyrillic_cells_align() {
        let mut report = StatisticsReport::new("HeadHunter");
        report.insert(
            "Питон",
            LanguageStatistics {
                vacancies_found: 1,
                vacancies_processed: 1,
                average_salary: Some(1),
            },
        );
        let table = render_table(&report);
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_long_title_is_dropped_from_border() {
        let mut report = sample_report();
        report.service = "x".repeat(200);
        let table = render_table(&report);
        assert!(table.starts_with("+----------+"));
    }

    #[test]
    fn test_render_json_keeps_order() {
        let json = render_json(&[sample_report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["SuperJob"]["Python"]["average_salary"], 140000);
        assert!(value["SuperJob"]["C"]["average_salary"].is_null());
        assert!(json.find("Python").unwrap() < json.find("\"C\"").unwrap());
    }
}
