//! Paths and configuration.
//!
//! All data lives under a user-visible `~/MediPredict/` directory.
//! Model artifact, store, and reference-table locations, plus the
//! gate credential pair, can be overridden through `MEDIPREDICT_*`
//! environment variables.

use std::env;
use std::path::PathBuf;

use crate::models::Domain;
use crate::session::Credentials;

/// Application-level constants
pub const APP_NAME: &str = "MediPredict";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder credential defaults. Not a security boundary; override
/// via MEDIPREDICT_USERNAME / MEDIPREDICT_PASSWORD.
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "12345";

/// Get the application data directory
/// ~/MediPredict/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("MEDIPREDICT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MediPredict")
}

/// Directory holding the per-domain observation store files.
pub fn stores_dir() -> PathBuf {
    app_data_dir().join("saved_data")
}

/// Directory holding the model artifacts.
pub fn models_dir() -> PathBuf {
    match env::var("MEDIPREDICT_MODELS_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => app_data_dir().join("models"),
    }
}

/// Directory holding the reference datasets for the statistics view.
pub fn reference_dir() -> PathBuf {
    match env::var("MEDIPREDICT_REFERENCE_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => app_data_dir().join("dataset"),
    }
}

pub fn observation_store_path(domain: Domain) -> PathBuf {
    stores_dir().join(format!("{}_data.csv", domain.as_str()))
}

pub fn model_path(domain: Domain) -> PathBuf {
    models_dir().join(format!("{}_model.json", domain.as_str()))
}

pub fn reference_table_path(domain: Domain) -> PathBuf {
    reference_dir().join(format!("{}.csv", domain.as_str()))
}

/// The configured gate credential pair.
pub fn credentials() -> Credentials {
    Credentials::new(
        env::var("MEDIPREDICT_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.into()),
        env::var("MEDIPREDICT_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.into()),
    )
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_paths_live_under_saved_data() {
        let path = observation_store_path(Domain::Diabetes);
        assert!(path.starts_with(stores_dir()));
        assert!(path.ends_with("diabetes_data.csv"));

        let path = observation_store_path(Domain::Heart);
        assert!(path.ends_with("heart_data.csv"));
    }

    #[test]
    fn model_paths_name_the_domain() {
        assert!(model_path(Domain::Diabetes).ends_with("diabetes_model.json"));
        assert!(model_path(Domain::Heart).ends_with("heart_model.json"));
    }

    #[test]
    fn reference_paths_name_the_domain() {
        assert!(reference_table_path(Domain::Diabetes).ends_with("diabetes.csv"));
        assert!(reference_table_path(Domain::Heart).ends_with("heart.csv"));
    }

    #[test]
    fn default_credentials_are_the_placeholder_pair() {
        // Only meaningful when the env overrides are unset, as in CI.
        if env::var("MEDIPREDICT_USERNAME").is_err()
            && env::var("MEDIPREDICT_PASSWORD").is_err()
        {
            let creds = credentials();
            assert_eq!(creds.username, "admin");
            assert_eq!(creds.password, "12345");
        }
    }

    #[test]
    fn app_name_is_medipredict() {
        assert_eq!(APP_NAME, "MediPredict");
    }

    #[test]
    fn default_filter_targets_this_crate() {
        assert_eq!(default_log_filter(), "medipredict=info");
    }
}
