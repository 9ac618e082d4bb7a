use crate::domain::model::SalaryRange;

const LOWER_BOUND_FACTOR: f64 = 1.2;
const UPPER_BOUND_FACTOR: f64 = 0.8;

/// Point estimate of a salary from its optional bounds.
///
/// Only a lower bound yields `from * 1.2`, only an upper bound `to * 0.8`,
/// both their midpoint. Returns `None` when neither bound is known.
pub fn predict_salary(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(from), None) => Some(from * LOWER_BOUND_FACTOR),
        (None, Some(to)) => Some(to * UPPER_BOUND_FACTOR),
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (None, None) => None,
    }
}

pub fn estimate_range(range: &SalaryRange) -> Option<f64> {
    predict_salary(range.from, range.to)
}

/// Truncated arithmetic mean, `None` for no estimates.
pub fn average_salary(estimates: &[f64]) -> Option<u64> {
    if estimates.is_empty() {
        return None;
    }
    let sum: f64 = estimates.iter().sum();
    Some((sum / estimates.len() as f64) as u64)
}
