//! Static field tables: one entry per clinical measurement, with the
//! medically-plausible inclusive range it must fall in.
//!
//! The tables are declared in classifier training order. The range
//! values mirror the screening thresholds the models were calibrated
//! against; they are deliberately wider than "healthy" reference
//! intervals since out-of-reference values are exactly what the
//! classifiers exist to assess.

/// Declares a measurement's name and valid inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldSpec {
    const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }

    /// True iff `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

pub const DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("Pregnancies", 0.0, 20.0),
    FieldSpec::new("Glucose", 70.0, 200.0),
    FieldSpec::new("BloodPressure", 50.0, 250.0),
    FieldSpec::new("SkinThickness", 0.5, 99.0),
    FieldSpec::new("Insulin", 0.0, 300.0),
    FieldSpec::new("BMI", 10.0, 70.0),
    FieldSpec::new("DiabetesPedigreeFunction", 0.08, 2.5),
    FieldSpec::new("Age", 1.0, 110.0),
];

pub const HEART_FIELDS: [FieldSpec; 13] = [
    FieldSpec::new("age", 1.0, 110.0),
    FieldSpec::new("sex", 0.0, 1.0),
    FieldSpec::new("cp", 0.0, 3.0),
    FieldSpec::new("trestbps", 50.0, 250.0),
    FieldSpec::new("chol", 100.0, 410.0),
    FieldSpec::new("fbs", 0.0, 1.0),
    FieldSpec::new("restecg", 0.0, 2.0),
    FieldSpec::new("thalach", 50.0, 300.0),
    FieldSpec::new("exang", 0.0, 1.0),
    FieldSpec::new("oldpeak", 0.0, 10.0),
    FieldSpec::new("slope", 0.0, 2.0),
    FieldSpec::new("ca", 0.0, 4.0),
    FieldSpec::new("thal", 0.0, 2.0),
];

pub const DIABETES_PROMPTS: [&str; 8] = [
    "Number of Pregnancies (0 For Men)",
    "Glucose Level (mg/dL, 70-100)",
    "Blood Pressure (mmHg, 80-120)",
    "Skin Thickness (mm, 0.5-15)",
    "Insulin Level (mg/dL, <90)",
    "Body Mass Index (BMI, 18.5-27.5)",
    "Diabetes Pedigree Function (0.08-0.5)",
    "Age of the Person",
];

pub const HEART_PROMPTS: [&str; 13] = [
    "Age",
    "Sex (0 for male, 1 for female)",
    "Chest Pain Types (0: Typical Angina, 1: Atypical Angina, 2: Non-anginal Pain, 3: Asymptomatic)",
    "Resting Blood Pressure (mmHg, 90-120)",
    "Serum Cholesterol (mg/dL, 190-270)",
    "Fasting Blood Sugar (1 if >120 mg/dL, else 0)",
    "Resting Electrocardiographic Results (0: Normal, 1: Having ST-T wave abnormality, 2: Showing probable or definite left ventricular hypertrophy)",
    "Maximum Heart Rate Achieved",
    "Exercise Induced Angina (1: Yes, 0: No)",
    "ST Depression Induced by Exercise (0-6)",
    "Slope of the Peak Exercise ST Segment (0: Upsloping, 1: Flat, 2: Downsloping)",
    "Number of Major Vessels Colored by Fluoroscopy (0-4)",
    "Thalassemia (0: Normal, 1: Fixed Defect, 2: Reversible Defect)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_range_is_well_formed() {
        for spec in DIABETES_FIELDS.iter().chain(HEART_FIELDS.iter()) {
            assert!(
                spec.min <= spec.max,
                "inverted range on field {}",
                spec.name
            );
        }
    }

    #[test]
    fn field_names_are_unique_per_domain() {
        for table in [&DIABETES_FIELDS[..], &HEART_FIELDS[..]] {
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let glucose = &DIABETES_FIELDS[1];
        assert!(glucose.contains(70.0));
        assert!(glucose.contains(200.0));
        assert!(!glucose.contains(69.999));
        assert!(!glucose.contains(200.001));
    }
}
