//! Shared application state.
//!
//! `CoreState` owns both prediction pipelines, the report engine, and
//! the access gate. The gate sits behind a `Mutex` so the session is
//! scoped to the state instance instead of a process-wide flag;
//! handlers lock it only around login/navigation transitions.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::classifier::{ClassifierError, PredictionService};
use crate::config;
use crate::models::Domain;
use crate::pipeline::PredictionPipeline;
use crate::report::ReportEngine;
use crate::session::{AccessGate, Credentials};
use crate::store::{ObservationStore, StoreError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CoreState {
    diabetes: PredictionPipeline,
    heart: PredictionPipeline,
    report: ReportEngine,
    gate: Mutex<AccessGate>,
}

impl CoreState {
    /// Load both classifiers, open both stores, and wire the gate from
    /// the configured paths. Called once at process start; the loaded
    /// models are held read-only for the process lifetime.
    pub fn initialize() -> Result<Self, CoreError> {
        let diabetes_service =
            Arc::new(PredictionService::load(&config::model_path(Domain::Diabetes))?);
        let heart_service =
            Arc::new(PredictionService::load(&config::model_path(Domain::Heart))?);

        let diabetes_store = Arc::new(ObservationStore::open(
            Domain::Diabetes,
            config::observation_store_path(Domain::Diabetes),
        )?);
        let heart_store = Arc::new(ObservationStore::open(
            Domain::Heart,
            config::observation_store_path(Domain::Heart),
        )?);

        let report = ReportEngine::new(
            config::reference_table_path(Domain::Diabetes),
            config::reference_table_path(Domain::Heart),
        );

        Self::assemble(
            diabetes_service,
            diabetes_store,
            heart_service,
            heart_store,
            report,
            config::credentials(),
        )
    }

    /// Wire a state from explicit parts. Tests and embedded setups use
    /// this to avoid touching the configured home-directory paths.
    pub fn assemble(
        diabetes_service: Arc<PredictionService>,
        diabetes_store: Arc<ObservationStore>,
        heart_service: Arc<PredictionService>,
        heart_store: Arc<ObservationStore>,
        report: ReportEngine,
        credentials: Credentials,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            diabetes: PredictionPipeline::new(Domain::Diabetes, diabetes_service, diabetes_store)?,
            heart: PredictionPipeline::new(Domain::Heart, heart_service, heart_store)?,
            report,
            gate: Mutex::new(AccessGate::new(credentials)),
        })
    }

    pub fn pipeline(&self, domain: Domain) -> &PredictionPipeline {
        match domain {
            Domain::Diabetes => &self.diabetes,
            Domain::Heart => &self.heart,
        }
    }

    pub fn report_engine(&self) -> &ReportEngine {
        &self.report
    }

    /// Lock the gate for a login/navigation transition.
    pub fn lock_gate(&self) -> Result<MutexGuard<'_, AccessGate>, CoreError> {
        self.gate.lock().map_err(|_| CoreError::LockPoisoned)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_state;
    use super::*;
    use crate::models::View;

    #[test]
    fn new_state_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        assert!(!state.lock_gate().unwrap().is_logged_in());
    }

    #[test]
    fn pipelines_are_domain_scoped() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        assert_eq!(state.pipeline(Domain::Diabetes).domain(), Domain::Diabetes);
        assert_eq!(state.pipeline(Domain::Heart).domain(), Domain::Heart);
    }

    #[test]
    fn gate_transitions_go_through_the_lock() {
        let dir = tempfile::tempdir().unwrap();
        let state = temp_state(&dir);
        {
            let mut gate = state.lock_gate().unwrap();
            gate.navigate_to(View::Statistics);
            gate.login("admin", "12345").unwrap();
        }
        assert!(state.lock_gate().unwrap().is_logged_in());
    }
}
