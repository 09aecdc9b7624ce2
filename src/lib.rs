pub mod classifier;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod store;
pub mod validation;

use tracing_subscriber::EnvFilter;

pub use core_state::CoreState;
pub use models::{Domain, Label, View};

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
