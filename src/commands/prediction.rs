//! Prediction view commands.
//!
//! Two commands:
//! - `get_input_fields`: the labeled numeric inputs for a domain, in
//!   declared order
//! - `submit_prediction`: runs the domain pipeline over the raw field
//!   strings and returns the diagnosis view

use serde::{Deserialize, Serialize};

use crate::core_state::CoreState;
use crate::models::Domain;
use crate::pipeline::{PipelineError, PredictionOutcome};

/// User-facing message for non-numeric input.
const MSG_PARSE: &str = "Please enter valid numeric values for all inputs.";
/// User-facing message for out-of-range input.
const MSG_RANGE: &str = "Please enter values within the valid range for each parameter.";

/// One labeled input field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
}

/// The diagnosis returned to the submitting view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionView {
    pub outcome: u8,
    pub diagnosis: String,
    pub tips: Vec<String>,
    /// Distinct, visible persistence failure; the diagnosis stands.
    pub persist_error: Option<String>,
}

impl From<PredictionOutcome> for PredictionView {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            outcome: outcome.label.as_u8(),
            diagnosis: outcome.diagnosis,
            tips: outcome.tips,
            persist_error: outcome.persist_error,
        }
    }
}

/// Returns the domain's input fields in declared order.
pub fn get_input_fields(domain: Domain) -> Vec<InputField> {
    domain
        .field_specs()
        .iter()
        .zip(domain.field_prompts())
        .map(|(spec, &label)| InputField {
            name: spec.name.to_string(),
            label: label.to_string(),
            min: spec.min,
            max: spec.max,
        })
        .collect()
}

/// Submits one prediction. Opening a prediction view is a navigation,
/// so the statistics session (if any) is dropped first.
pub fn submit_prediction(
    state: &CoreState,
    domain: Domain,
    raw_fields: Vec<String>,
) -> Result<PredictionView, String> {
    state
        .lock_gate()
        .map_err(|e| e.to_string())?
        .navigate_to(domain.view());

    let outcome = state
        .pipeline(domain)
        .run(&raw_fields)
        .map_err(user_message)?;
    Ok(outcome.into())
}

fn user_message(error: PipelineError) -> String {
    match error {
        PipelineError::Parse { .. } => MSG_PARSE.into(),
        PipelineError::OutOfRange { .. } => MSG_RANGE.into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::test_support::temp_state;
    use crate::models::View;

    fn fields(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn input_fields_carry_prompts_and_ranges() {
        let fields = get_input_fields(Domain::Diabetes);
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0].name, "Pregnancies");
        assert_eq!(fields[0].label, "Number of Pregnancies (0 For Men)");
        assert_eq!(fields[1].name, "Glucose");
        assert_eq!(fields[1].min, 70.0);
        assert_eq!(fields[1].max, 200.0);

        assert_eq!(get_input_fields(Domain::Heart).len(), 13);
    }

    #[test]
    fn submit_returns_diagnosis_view() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        let view = submit_prediction(
            &state,
            Domain::Diabetes,
            fields(&["2", "120", "80", "20", "85", "25.0", "0.3", "35"]),
        )
        .unwrap();

        assert_eq!(view.outcome, 0);
        assert_eq!(view.diagnosis, "The person is not diabetic");
        assert!(view.persist_error.is_none());
        assert_eq!(state.pipeline(Domain::Diabetes).store().count().unwrap(), 1);
    }

    #[test]
    fn parse_failure_maps_to_the_numeric_values_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        let err = submit_prediction(
            &state,
            Domain::Diabetes,
            fields(&["2", "abc", "80", "20", "85", "25.0", "0.3", "35"]),
        )
        .unwrap_err();
        assert_eq!(err, MSG_PARSE);
        assert_eq!(state.pipeline(Domain::Diabetes).store().count().unwrap(), 0);
    }

    #[test]
    fn range_failure_maps_to_the_valid_range_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        let err = submit_prediction(
            &state,
            Domain::Diabetes,
            fields(&["1", "300", "80", "20", "85", "25.0", "0.3", "35"]),
        )
        .unwrap_err();
        assert_eq!(err, MSG_RANGE);
        assert_eq!(state.pipeline(Domain::Diabetes).store().count().unwrap(), 0);
    }

    #[test]
    fn submitting_drops_an_active_statistics_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        {
            let mut gate = state.lock_gate().unwrap();
            gate.navigate_to(View::Statistics);
            gate.login("admin", "12345").unwrap();
        }

        submit_prediction(
            &state,
            Domain::Heart,
            fields(&[
                "55", "1", "2", "130", "240", "0", "1", "150", "0", "1.2", "1", "0", "2",
            ]),
        )
        .unwrap();

        let gate = state.lock_gate().unwrap();
        assert!(!gate.is_logged_in());
        assert_eq!(gate.active_view(), View::HeartPrediction);
    }
}
