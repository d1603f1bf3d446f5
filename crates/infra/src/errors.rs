//! Conversions from external infrastructure errors into domain errors.

use slotgrid_domain::SlotgridError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotgridError);

impl From<InfraError> for SlotgridError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotgridError> for InfraError {
    fn from(value: SlotgridError) -> Self {
        Self(value)
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        Self(SlotgridError::Network(message))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(err: std::io::Error) -> Self {
        Self(SlotgridError::Io(err.to_string()))
    }
}
