//! Access gate for the statistics view.
//!
//! A placeholder checkpoint, not a security boundary: one configured
//! credential pair, no hashing, no timeout. The gate is an explicit
//! value owned by application state rather than a process-wide flag,
//! and navigating to any view other than Statistics forces a logout as
//! a side effect of the navigation itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::View;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,
}

/// The single configured credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Session gate guarding the statistics view.
#[derive(Debug)]
pub struct AccessGate {
    credentials: Credentials,
    logged_in: bool,
    active_view: View,
}

impl AccessGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            logged_in: false,
            active_view: View::DiabetesPrediction,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    /// Attempt a login with the supplied pair. On failure the state
    /// stays logged out.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.credentials.matches(username, password) {
            self.logged_in = true;
            tracing::info!("Statistics login succeeded");
            Ok(())
        } else {
            tracing::warn!("Statistics login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    /// Switch the active view. Any view other than Statistics drops
    /// the session.
    pub fn navigate_to(&mut self, view: View) {
        if view != View::Statistics && self.logged_in {
            self.logged_in = false;
            tracing::debug!(?view, "Navigation away from statistics, logged out");
        }
        self.active_view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(Credentials::new("admin", "12345"))
    }

    #[test]
    fn new_gate_is_logged_out() {
        let gate = gate();
        assert!(!gate.is_logged_in());
        assert_eq!(gate.active_view(), View::DiabetesPrediction);
    }

    #[test]
    fn correct_pair_logs_in() {
        let mut gate = gate();
        gate.login("admin", "12345").unwrap();
        assert!(gate.is_logged_in());
    }

    #[test]
    fn any_other_pair_stays_logged_out() {
        let mut gate = gate();
        for (user, pass) in [
            ("admin", "wrong"),
            ("wrong", "12345"),
            ("", ""),
            ("ADMIN", "12345"),
        ] {
            assert!(matches!(
                gate.login(user, pass),
                Err(AuthError::InvalidCredentials)
            ));
            assert!(!gate.is_logged_in());
        }
    }

    #[test]
    fn navigating_away_from_statistics_forces_logout() {
        let mut gate = gate();
        gate.navigate_to(View::Statistics);
        gate.login("admin", "12345").unwrap();

        gate.navigate_to(View::HeartPrediction);
        assert!(!gate.is_logged_in());
        assert_eq!(gate.active_view(), View::HeartPrediction);
    }

    #[test]
    fn navigating_to_statistics_keeps_session() {
        let mut gate = gate();
        gate.login("admin", "12345").unwrap();
        gate.navigate_to(View::Statistics);
        assert!(gate.is_logged_in());
    }

    #[test]
    fn explicit_logout_clears_session() {
        let mut gate = gate();
        gate.login("admin", "12345").unwrap();
        gate.logout();
        assert!(!gate.is_logged_in());
    }

    #[test]
    fn credentials_come_from_configuration_not_constants() {
        let mut gate = AccessGate::new(Credentials::new("clinician", "s3cret"));
        assert!(gate.login("admin", "12345").is_err());
        gate.login("clinician", "s3cret").unwrap();
        assert!(gate.is_logged_in());
    }
}
