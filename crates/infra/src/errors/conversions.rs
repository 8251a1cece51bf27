//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use lexintake_domain::IntakeError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub IntakeError);

impl From<InfraError> for IntakeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<IntakeError> for InfraError {
    fn from(value: IntakeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoIntakeError {
    fn into_intake(self) -> IntakeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → IntakeError */
/* -------------------------------------------------------------------------- */

impl IntoIntakeError for HttpError {
    fn into_intake(self) -> IntakeError {
        if self.is_timeout() {
            return IntakeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return IntakeError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return IntakeError::Network(format!("invalid HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, None);
        }

        IntakeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_intake())
    }
}

/// Map a non-success HTTP status (plus an optional response excerpt) onto
/// the domain error taxonomy.
pub fn status_error(status: reqwest::StatusCode, body: Option<&str>) -> IntakeError {
    let code = status.as_u16();
    let mut message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if let Some(body) = body.map(str::trim).filter(|body| !body.is_empty()) {
        let excerpt: String = body.chars().take(200).collect();
        message.push_str(&format!(": {excerpt}"));
    }

    match code {
        401 | 403 => IntakeError::Auth(message),
        404 => IntakeError::NotFound(message),
        429 => IntakeError::Network(message),
        400..=499 => IntakeError::InvalidInput(message),
        _ => IntakeError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → IntakeError */
/* -------------------------------------------------------------------------- */

impl IntoIntakeError for JsonError {
    fn into_intake(self) -> IntakeError {
        IntakeError::Internal(format!("JSON serialization failed: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_intake())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → IntakeError */
/* -------------------------------------------------------------------------- */

impl IntoIntakeError for IoError {
    fn into_intake(self) -> IntakeError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => IntakeError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                IntakeError::Storage(format!("permission denied: {self}"))
            }
            _ => IntakeError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_intake())
    }
}

/* -------------------------------------------------------------------------- */
/* lettre errors → IntakeError */
/* -------------------------------------------------------------------------- */

#[cfg(feature = "email")]
mod email {
    use lettre::address::AddressError;
    use lettre::error::Error as MessageError;
    use lettre::transport::smtp::Error as SmtpError;

    use super::{InfraError, IntakeError, IntoIntakeError};

    impl IntoIntakeError for SmtpError {
        fn into_intake(self) -> IntakeError {
            if self.is_permanent() {
                return IntakeError::Auth(format!("SMTP server rejected the message: {self}"));
            }
            IntakeError::Notification(format!("SMTP delivery failed: {self}"))
        }
    }

    impl From<SmtpError> for InfraError {
        fn from(value: SmtpError) -> Self {
            InfraError(value.into_intake())
        }
    }

    impl From<AddressError> for InfraError {
        fn from(value: AddressError) -> Self {
            InfraError(IntakeError::Config(format!("invalid email address: {value}")))
        }
    }

    impl From<MessageError> for InfraError {
        fn from(value: MessageError) -> Self {
            InfraError(IntakeError::Notification(format!("invalid email message: {value}")))
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
