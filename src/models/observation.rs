//! A single logged prediction request with its outcome.

use serde::{Deserialize, Serialize};

use crate::models::enums::{Domain, Label};

/// One row of an observation store: the validated feature values in
/// field order, plus the classifier's outcome. Written once; the log
/// is append-only and rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub values: Vec<f64>,
    pub outcome: Label,
}

impl ObservationRecord {
    pub fn new(values: Vec<f64>, outcome: Label) -> Self {
        Self { values, outcome }
    }

    /// True iff the value count matches the domain's field count.
    pub fn matches_domain(&self, domain: Domain) -> bool {
        self.values.len() == domain.field_specs().len()
    }

    /// The record flattened to CSV cells, outcome last.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells: Vec<String> =
            self.values.iter().map(|v| v.to_string()).collect();
        cells.push(self.outcome.to_string());
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_end_with_outcome_digit() {
        let record = ObservationRecord::new(vec![2.0, 120.0, 0.3], Label::Positive);
        let cells = record.to_cells();
        assert_eq!(cells, vec!["2", "120", "0.3", "1"]);
    }

    #[test]
    fn matches_domain_checks_arity() {
        let record = ObservationRecord::new(vec![0.0; 8], Label::Negative);
        assert!(record.matches_domain(Domain::Diabetes));
        assert!(!record.matches_domain(Domain::Heart));
    }
}
