//! Prediction pipeline: parse → validate → classify → persist.
//!
//! One pipeline per domain. A run is synchronous and either fails
//! before any state change (parse or range failure) or appends exactly
//! one row to the domain's observation store. A failed append is
//! surfaced in the outcome as a distinct error but does not retract
//! the already-computed diagnosis.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{ClassifierError, PredictionService};
use crate::models::{Domain, Label, ObservationRecord};
use crate::store::ObservationStore;
use crate::validation;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Expected {expected} input fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("Field '{field}' is not a valid number")]
    Parse { field: &'static str },

    #[error("Field '{field}' is outside its valid range")]
    OutOfRange { field: &'static str },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Result of a successful run: the diagnosis shown to the caller plus
/// the persistence status of the terminal append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub label: Label,
    pub diagnosis: String,
    /// Static advisory tips; populated for positive outcomes only.
    pub tips: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
    /// Set when the observation append failed. The diagnosis above is
    /// still valid; the row was not durably logged.
    pub persist_error: Option<String>,
}

pub const DIABETES_TIPS: [&str; 5] = [
    "Exercise regularly to help manage blood sugar levels.",
    "Eat a balanced diet rich in fiber, fruits, and vegetables.",
    "Monitor your blood sugar levels regularly.",
    "Stay hydrated by drinking plenty of water.",
    "Avoid sugary foods and beverages.",
];

pub const HEART_TIPS: [&str; 5] = [
    "Exercise regularly to strengthen your heart and improve circulation.",
    "Eat a heart-healthy diet that includes plenty of fruits, vegetables, and whole grains.",
    "Avoid smoking and limit alcohol consumption.",
    "Manage stress through relaxation techniques such as meditation or yoga.",
    "Maintain a healthy weight and monitor your blood pressure regularly.",
];

/// Orchestrates one domain's validated prediction-and-logging flow.
pub struct PredictionPipeline {
    domain: Domain,
    service: Arc<PredictionService>,
    store: Arc<ObservationStore>,
}

impl PredictionPipeline {
    /// Wire a pipeline. The classifier's declared feature count must
    /// match the domain's field table; mismatches are caught here, at
    /// startup, not per request.
    pub fn new(
        domain: Domain,
        service: Arc<PredictionService>,
        store: Arc<ObservationStore>,
    ) -> Result<Self, ClassifierError> {
        let expected = domain.field_specs().len();
        if service.feature_count() != expected {
            return Err(ClassifierError::Inconsistent(format!(
                "{domain} domain declares {expected} fields, classifier expects {}",
                service.feature_count()
            )));
        }
        Ok(Self {
            domain,
            service,
            store,
        })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    /// Run one prediction over the raw field strings, in declared
    /// field order.
    pub fn run(&self, raw_fields: &[String]) -> Result<PredictionOutcome, PipelineError> {
        let specs = self.domain.field_specs();
        if raw_fields.len() != specs.len() {
            return Err(PipelineError::FieldCount {
                expected: specs.len(),
                got: raw_fields.len(),
            });
        }

        // 1. Parse every field; any failure aborts with no state change.
        let mut values = Vec::with_capacity(specs.len());
        for (spec, raw) in specs.iter().zip(raw_fields) {
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| PipelineError::Parse { field: spec.name })?;
            values.push(value);
        }

        // 2. Range-validate in field order.
        validation::validate_vector(self.domain, &values)
            .map_err(|field| PipelineError::OutOfRange { field })?;

        // 3-4. Classify the validated vector.
        let label = self.service.classify(&values)?;

        // 5. Diagnosis text and advisory tips.
        let diagnosis = diagnosis_text(self.domain, label).to_string();
        let tips = if label.is_positive() {
            advisory_tips(self.domain)
                .iter()
                .map(|t| t.to_string())
                .collect()
        } else {
            Vec::new()
        };

        // 6. Terminal durable side effect. Failure is surfaced but the
        //    diagnosis stands.
        let record = ObservationRecord::new(values, label);
        let persist_error = match self.store.append(&record) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(
                    domain = %self.domain,
                    error = %e,
                    "Failed to persist observation"
                );
                Some(e.to_string())
            }
        };

        tracing::info!(domain = %self.domain, label = %label, "Prediction complete");
        Ok(PredictionOutcome {
            label,
            diagnosis,
            tips,
            evaluated_at: Utc::now(),
            persist_error,
        })
    }
}

/// Diagnosis strings per domain and label.
pub fn diagnosis_text(domain: Domain, label: Label) -> &'static str {
    match (domain, label) {
        (Domain::Diabetes, Label::Positive) => "The person is diabetic",
        (Domain::Diabetes, Label::Negative) => "The person is not diabetic",
        (Domain::Heart, Label::Positive) => "The person is having heart disease",
        (Domain::Heart, Label::Negative) => "The person does not have any heart disease",
    }
}

fn advisory_tips(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Diabetes => &DIABETES_TIPS,
        Domain::Heart => &HEART_TIPS,
    }
}
