//! Transport-agnostic command handlers — the functions a UI shell
//! invokes, one per user action. Errors are recovered here and mapped
//! to user-facing strings; nothing below this layer panics on bad
//! input.

pub mod prediction;
pub mod statistics;

/// Health check — verifies the backend is running.
pub fn health_check() -> String {
    tracing::debug!("Health check called");
    "ok".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_reports_ok() {
        assert_eq!(health_check(), "ok");
    }
}
