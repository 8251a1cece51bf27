use std::time::Duration;

use lexintake_domain::IntakeError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Set to a truthy value to emit JSON lines instead of human-readable logs.
pub const JSON_ENV: &str = "LEXINTAKE_LOG_JSON";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for command output. Calling
/// this twice keeps the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let json = std::env::var(JSON_ENV).map(|value| is_truthy(&value)).unwrap_or(false);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if let Err(err) = result {
        warn!(error = %err, "Tracing subscriber already installed");
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Log the outcome of a CLI command with structured fields.
///
/// `command` must be a stable identifier without client data.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert an `IntakeError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &IntakeError) -> &'static str {
    match error {
        IntakeError::Config(_) => "config",
        IntakeError::Network(_) => "network",
        IntakeError::Auth(_) => "auth",
        IntakeError::Calendar(_) => "calendar",
        IntakeError::Notification(_) => "notification",
        IntakeError::Storage(_) => "storage",
        IntakeError::NotFound(_) => "not_found",
        IntakeError::InvalidInput(_) => "invalid_input",
        IntakeError::Internal(_) => "internal",
    }
}
