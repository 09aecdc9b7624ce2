//! Prediction service: wraps one pre-trained binary classifier.
//!
//! The model artifact is a JSON-serialized standardized logistic
//! regression (per-feature coefficients, scaler mean/scale, intercept,
//! decision threshold). It is loaded once at startup, validated for
//! internal consistency, and held read-only for the process lifetime.
//! The pipeline treats it as opaque beyond `classify(vector) -> Label`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Label;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Inconsistent model artifact: {0}")]
    Inconsistent(String),

    #[error("Invalid input: expected {expected} features, got {got}")]
    InvalidInput { expected: usize, got: usize },
}

/// On-disk model artifact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Informational domain tag (e.g. "diabetes").
    pub domain: String,
    /// Declared expected feature count, checked against every array
    /// below at load time.
    pub feature_count: usize,
    /// Feature names in training order.
    pub feature_names: Vec<String>,
    /// Logistic regression coefficients over standardized features.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Standardization parameters: `(x - mean) / scale` per feature.
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    /// Decision threshold on the predicted probability.
    pub threshold: f64,
}

impl ModelArtifact {
    fn check(&self) -> Result<(), ClassifierError> {
        let n = self.feature_count;
        if n == 0 {
            return Err(ClassifierError::Inconsistent(
                "declared feature count is zero".into(),
            ));
        }
        for (name, len) in [
            ("feature_names", self.feature_names.len()),
            ("coefficients", self.coefficients.len()),
            ("scaler_mean", self.scaler_mean.len()),
            ("scaler_scale", self.scaler_scale.len()),
        ] {
            if len != n {
                return Err(ClassifierError::Inconsistent(format!(
                    "{name} has {len} entries, declared feature count is {n}"
                )));
            }
        }
        if self.scaler_scale.iter().any(|&s| s <= 0.0 || !s.is_finite()) {
            return Err(ClassifierError::Inconsistent(
                "scaler_scale entries must be finite and positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ClassifierError::Inconsistent(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A loaded, validated classifier. Immutable and cheap to share.
pub struct PredictionService {
    artifact: ModelArtifact,
}

impl PredictionService {
    /// Load a model artifact from disk and validate it.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        let service = Self::from_artifact(artifact)?;
        tracing::info!(
            domain = %service.artifact.domain,
            features = service.artifact.feature_count,
            path = %path.display(),
            "Loaded classifier"
        );
        Ok(service)
    }

    /// Wrap an in-memory artifact (used by tests and embedded setups).
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ClassifierError> {
        artifact.check()?;
        Ok(Self { artifact })
    }

    pub fn feature_count(&self) -> usize {
        self.artifact.feature_count
    }

    pub fn domain_tag(&self) -> &str {
        &self.artifact.domain
    }

    /// Classify a feature vector. Length mismatch fails before the
    /// model is touched. Deterministic; no retries.
    pub fn classify(&self, features: &[f64]) -> Result<Label, ClassifierError> {
        if features.len() != self.artifact.feature_count {
            return Err(ClassifierError::InvalidInput {
                expected: self.artifact.feature_count,
                got: features.len(),
            });
        }

        let mut z = self.artifact.intercept;
        for ((&x, &mean), (&scale, &coef)) in features
            .iter()
            .zip(&self.artifact.scaler_mean)
            .zip(self.artifact.scaler_scale.iter().zip(&self.artifact.coefficients))
        {
            z += coef * (x - mean) / scale;
        }
        let probability = 1.0 / (1.0 + (-z).exp());

        let label = if probability >= self.artifact.threshold {
            Label::Positive
        } else {
            Label::Negative
        };
        tracing::debug!(
            domain = %self.artifact.domain,
            probability,
            label = %label,
            "Classified feature vector"
        );
        Ok(label)
    }
}
