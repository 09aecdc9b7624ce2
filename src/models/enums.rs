//! Core enums shared across the prediction and reporting modules.

use serde::{Deserialize, Serialize};

use crate::models::field_spec::{self, FieldSpec};

/// A prediction domain. Each domain has its own field table, model
/// artifact, and observation store; the pipeline logic is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Diabetes,
    Heart,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Heart => "heart",
        }
    }

    /// The domain's field table, in the order the classifier was
    /// trained on. Order is load-bearing.
    pub fn field_specs(&self) -> &'static [FieldSpec] {
        match self {
            Self::Diabetes => &field_spec::DIABETES_FIELDS,
            Self::Heart => &field_spec::HEART_FIELDS,
        }
    }

    /// User-facing input labels, aligned index-for-index with
    /// `field_specs()`.
    pub fn field_prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Diabetes => &field_spec::DIABETES_PROMPTS,
            Self::Heart => &field_spec::HEART_PROMPTS,
        }
    }

    /// Observation store column names: every field name plus the
    /// terminal `Outcome` column.
    pub fn store_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> =
            self.field_specs().iter().map(|s| s.name).collect();
        columns.push("Outcome");
        columns
    }

    /// The view that hosts this domain's input form.
    pub fn view(&self) -> View {
        match self {
            Self::Diabetes => View::DiabetesPrediction,
            Self::Heart => View::HeartPrediction,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Negative),
            1 => Some(Self::Positive),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The three top-level views of the application surface.
///
/// Navigation matters to the access gate: selecting any view other
/// than `Statistics` forces a logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    DiabetesPrediction,
    HeartPrediction,
    Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diabetes_has_eight_fields_heart_thirteen() {
        assert_eq!(Domain::Diabetes.field_specs().len(), 8);
        assert_eq!(Domain::Heart.field_specs().len(), 13);
    }

    #[test]
    fn prompts_align_with_field_specs() {
        for domain in [Domain::Diabetes, Domain::Heart] {
            assert_eq!(
                domain.field_prompts().len(),
                domain.field_specs().len(),
                "{domain} prompts out of step with field table"
            );
        }
    }

    #[test]
    fn store_columns_end_with_outcome() {
        let cols = Domain::Diabetes.store_columns();
        assert_eq!(cols.len(), 9);
        assert_eq!(cols[0], "Pregnancies");
        assert_eq!(cols[8], "Outcome");

        let cols = Domain::Heart.store_columns();
        assert_eq!(cols.len(), 14);
        assert_eq!(cols[0], "age");
        assert_eq!(cols[13], "Outcome");
    }

    #[test]
    fn label_round_trips_through_u8() {
        assert_eq!(Label::from_u8(0), Some(Label::Negative));
        assert_eq!(Label::from_u8(1), Some(Label::Positive));
        assert_eq!(Label::from_u8(2), None);
        assert_eq!(Label::Positive.as_u8(), 1);
        assert_eq!(Label::Negative.to_string(), "0");
    }

    #[test]
    fn domain_maps_to_its_prediction_view() {
        assert_eq!(Domain::Diabetes.view(), View::DiabetesPrediction);
        assert_eq!(Domain::Heart.view(), View::HeartPrediction);
    }
}
