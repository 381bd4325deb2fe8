//! # Structured Logging Module
//!
//! Environment-aware structured logging for tracing lifecycle operations.

use std::sync::OnceLock;
use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// Safe to call more than once; only the first call installs a subscriber,
/// and an already-installed global subscriber is left in place.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let json_output = std::env::var("VESSEL_LOG_FORMAT")
            .map(|format| format == "json")
            .unwrap_or(false);

        let subscriber = tracing_subscriber::registry().with(if json_output {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        });

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables.
fn get_environment() -> String {
    std::env::var("VESSEL_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment.
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for container operations.
pub fn log_container_operation(
    operation: &str,
    container_id: Uuid,
    code: &str,
    state: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        container_id = %container_id,
        code = %code,
        state = %state,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📦 CONTAINER_OPERATION"
    );
}

/// Log structured data for fill-ledger operations.
pub fn log_fill_operation(
    operation: &str,
    fill_id: Uuid,
    container_id: Uuid,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        fill_id = %fill_id,
        container_id = %container_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🧾 FILL_OPERATION"
    );
}

/// Log error with full context.
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_detection() {
        std::env::set_var("VESSEL_ENV", "test_override");
        let env = get_environment();
        assert_eq!(env, "test_override");
        std::env::remove_var("VESSEL_ENV");
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("unknown"), "debug");
    }
}
