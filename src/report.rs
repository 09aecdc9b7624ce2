//! Report engine: filtered descriptive statistics over the two
//! reference datasets.
//!
//! The reference tables are separately-provisioned read-only corpora,
//! distinct in source and lifecycle from the observation stores, and
//! are reloaded fresh on every render. Rendering never mutates them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Domain;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read reference table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed reference table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reference table for {domain} is missing column '{column}'")]
    MissingColumn { domain: Domain, column: String },

    #[error("Non-numeric value '{value}' in reference column '{column}'")]
    InvalidValue { column: String, value: String },
}

/// Row filter applied before any statistics are computed. The two
/// blood-pressure thresholds intentionally differ; see DESIGN.md.
const DIABETES_MIN_AGE: f64 = 40.0;
const DIABETES_MIN_BP: f64 = 70.0;
const HEART_MIN_AGE: f64 = 40.0;
const HEART_MIN_BP: f64 = 140.0;

pub const COMMON_HEART_DISEASES: [&str; 6] = [
    "Coronary Artery Disease (CAD)",
    "Hypertensive Heart Disease",
    "Heart Failure",
    "Arrhythmias",
    "Cardiomyopathies",
    "Valvular Heart Disease",
];

/// Outcome of a render: either the full report or one of the two
/// informational warnings. Neither warning is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// One or both reference tables are absent or hold no rows.
    EmptyData,
    /// Both tables loaded but a filter matched nothing.
    NoMatch,
    Ready(StatisticsReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub diabetes: TableStatistics,
    pub heart: TableStatistics,
    /// Share of positive outcomes among the filtered diabetes rows,
    /// as a percentage.
    pub diabetes_positive_share: f64,
    /// The share formatted with two-decimal precision, e.g. "34.72%".
    pub diabetes_positive_share_text: String,
    pub common_heart_diseases: Vec<String>,
}

/// Descriptive statistics for one filtered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatistics {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
    /// Outcome value → row count, ordered by outcome value. Feeds the
    /// outcome bar chart.
    pub outcome_counts: Vec<(i64, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Computes the gated statistics view from the two reference tables.
pub struct ReportEngine {
    diabetes_path: PathBuf,
    heart_path: PathBuf,
}

impl ReportEngine {
    pub fn new(diabetes_path: impl Into<PathBuf>, heart_path: impl Into<PathBuf>) -> Self {
        Self {
            diabetes_path: diabetes_path.into(),
            heart_path: heart_path.into(),
        }
    }

    /// Load, filter, and summarize both reference tables.
    pub fn render(&self) -> Result<Report, ReportError> {
        let diabetes = match ReferenceTable::load(&self.diabetes_path)? {
            Some(table) if !table.rows.is_empty() => table,
            _ => return Ok(Report::EmptyData),
        };
        let heart = match ReferenceTable::load(&self.heart_path)? {
            Some(table) if !table.rows.is_empty() => table,
            _ => return Ok(Report::EmptyData),
        };

        let diabetes_filtered = diabetes.filter(
            Domain::Diabetes,
            &[("Age", DIABETES_MIN_AGE), ("BloodPressure", DIABETES_MIN_BP)],
        )?;
        let heart_filtered = heart.filter(
            Domain::Heart,
            &[("age", HEART_MIN_AGE), ("trestbps", HEART_MIN_BP)],
        )?;

        if diabetes_filtered.rows.is_empty() || heart_filtered.rows.is_empty() {
            return Ok(Report::NoMatch);
        }

        let diabetes_outcome = diabetes_filtered.outcome_column(Domain::Diabetes)?;
        let positives = diabetes_outcome.iter().filter(|&&v| v == 1.0).count();
        let share = positives as f64 / diabetes_filtered.rows.len() as f64 * 100.0;

        let report = StatisticsReport {
            diabetes: diabetes_filtered.summarize(Domain::Diabetes)?,
            heart: heart_filtered.summarize(Domain::Heart)?,
            diabetes_positive_share: share,
            diabetes_positive_share_text: format!("{share:.2}%"),
            common_heart_diseases: COMMON_HEART_DISEASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        tracing::info!(
            diabetes_rows = report.diabetes.row_count,
            heart_rows = report.heart.row_count,
            "Rendered statistics report"
        );
        Ok(Report::Ready(report))
    }
}

// ═══════════════════════════════════════════
// Reference table loading and summarization
// ═══════════════════════════════════════════

struct ReferenceTable {
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ReferenceTable {
    /// Load a reference CSV. An absent file is `None` (reported as
    /// empty data upstream); unreadable or non-numeric content is an
    /// error.
    fn load(path: &Path) -> Result<Option<Self>, ReportError> {
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> =
            reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut values = Vec::with_capacity(headers.len());
            for (cell, column) in row.iter().zip(&headers) {
                let value: f64 =
                    cell.trim()
                        .parse()
                        .map_err(|_| ReportError::InvalidValue {
                            column: column.clone(),
                            value: cell.to_string(),
                        })?;
                values.push(value);
            }
            rows.push(values);
        }
        Ok(Some(Self { headers, rows }))
    }

    fn column_index(&self, domain: Domain, column: &str) -> Result<usize, ReportError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ReportError::MissingColumn {
                domain,
                column: column.to_string(),
            })
    }

    /// Keep rows where every `(column, threshold)` predicate holds
    /// strictly (`value > threshold`).
    fn filter(
        &self,
        domain: Domain,
        predicates: &[(&str, f64)],
    ) -> Result<Self, ReportError> {
        let mut indices = Vec::with_capacity(predicates.len());
        for (column, threshold) in predicates {
            indices.push((self.column_index(domain, column)?, *threshold));
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| indices.iter().all(|&(i, t)| row[i] > t))
            .cloned()
            .collect();
        Ok(Self {
            headers: self.headers.clone(),
            rows,
        })
    }

    /// The outcome column: `Outcome` where present, `target` otherwise
    /// (the heart corpus uses the latter).
    fn outcome_column(&self, domain: Domain) -> Result<Vec<f64>, ReportError> {
        let index = self
            .headers
            .iter()
            .position(|h| h == "Outcome")
            .or_else(|| self.headers.iter().position(|h| h == "target"))
            .ok_or_else(|| ReportError::MissingColumn {
                domain,
                column: "Outcome".into(),
            })?;
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    fn summarize(&self, domain: Domain) -> Result<TableStatistics, ReportError> {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<f64> = self.rows.iter().map(|row| row[i]).collect();
                summarize_column(name, &values)
            })
            .collect();

        let mut outcome_counts = std::collections::BTreeMap::new();
        for value in self.outcome_column(domain)? {
            *outcome_counts.entry(value as i64).or_insert(0usize) += 1;
        }

        Ok(TableStatistics {
            row_count: self.rows.len(),
            columns,
            outcome_counts: outcome_counts.into_iter().collect(),
        })
    }
}

fn summarize_column(name: &str, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    // Sample standard deviation; a single row yields 0.
    let std = if count > 1 {
        let variance = values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    ColumnSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.50),
        q75: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear-interpolation percentile over a sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
