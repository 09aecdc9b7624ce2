//! Statistics view commands.
//!
//! Three commands:
//! - `select_view`: navigation, with the gate's forced-logout side
//!   effect
//! - `login`: attempts the gate transition on the statistics view
//! - `get_statistics`: renders the gated report

use crate::core_state::CoreState;
use crate::models::View;
use crate::report::Report;

/// Shown when the statistics view is requested without a session.
const MSG_LOGIN_REQUIRED: &str = "Please log in to view statistics.";

/// Navigate to a view. Selecting anything other than statistics drops
/// the session as a side effect.
pub fn select_view(state: &CoreState, view: View) -> Result<View, String> {
    let mut gate = state.lock_gate().map_err(|e| e.to_string())?;
    gate.navigate_to(view);
    Ok(gate.active_view())
}

/// Attempt a login on the statistics view.
pub fn login(state: &CoreState, username: &str, password: &str) -> Result<(), String> {
    let mut gate = state.lock_gate().map_err(|e| e.to_string())?;
    gate.navigate_to(View::Statistics);
    gate.login(username, password).map_err(|e| e.to_string())
}

/// Render the statistics report. Requires an active session.
pub fn get_statistics(state: &CoreState) -> Result<Report, String> {
    {
        let gate = state.lock_gate().map_err(|e| e.to_string())?;
        if !gate.is_logged_in() {
            return Err(MSG_LOGIN_REQUIRED.into());
        }
    }
    state.report_engine().render().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::test_support::temp_state;

    #[test]
    fn statistics_are_gated() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        assert_eq!(get_statistics(&state).unwrap_err(), MSG_LOGIN_REQUIRED);
    }

    #[test]
    fn bad_credentials_are_rejected_with_the_source_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        let err = login(&state, "admin", "wrong").unwrap_err();
        assert_eq!(err, "Incorrect username or password");
        assert!(!state.lock_gate().unwrap().is_logged_in());
    }

    #[test]
    fn login_then_statistics_reports_empty_data_without_tables() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        login(&state, "admin", "12345").unwrap();

        // temp_state provisions no reference tables.
        match get_statistics(&state).unwrap() {
            Report::EmptyData => {}
            other => panic!("expected EmptyData, got {other:?}"),
        }
    }

    #[test]
    fn selecting_another_view_requires_a_fresh_login() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        login(&state, "admin", "12345").unwrap();

        let active = select_view(&state, View::DiabetesPrediction).unwrap();
        assert_eq!(active, View::DiabetesPrediction);
        assert_eq!(get_statistics(&state).unwrap_err(), MSG_LOGIN_REQUIRED);

        // Returning to statistics alone is not enough.
        select_view(&state, View::Statistics).unwrap();
        assert_eq!(get_statistics(&state).unwrap_err(), MSG_LOGIN_REQUIRED);

        login(&state, "admin", "12345").unwrap();
        assert!(get_statistics(&state).is_ok());
    }

    #[test]
    fn full_report_renders_once_tables_exist() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        std::fs::write(
            dir.path().join("diabetes.csv"),
            "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome\n\
             2,120,80,20,85,25,0.3,50,1\n\
             3,130,90,22,90,28,0.4,55,0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("heart.csv"),
            "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal,target\n\
             60,1,2,150,240,0,1,150,0,1.2,1,0,2,1\n",
        )
        .unwrap();

        login(&state, "admin", "12345").unwrap();
        match get_statistics(&state).unwrap() {
            Report::Ready(report) => {
                assert_eq!(report.diabetes.row_count, 2);
                assert_eq!(report.diabetes_positive_share_text, "50.00%");
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }
}
