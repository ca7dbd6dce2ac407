//! Gateway error types and response classification.
//!
//! Transport failures are mapped through a small, pure taxonomy so the
//! degradation rules can be tested without a live network dependency.
//! Only `GatewayError::Unavailable` ever crosses the identity-resolution
//! boundary: it means the system of record itself cannot answer, so the
//! type of identity cannot be determined at all.

use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Gateway configuration is invalid (bad endpoint, client build
    /// failure).
    #[error("gateway configuration error: {0}")]
    Configuration(String),

    /// The remote system of record is unreachable or erroring.
    ///
    /// Callers may treat this as a transient, retryable authentication
    /// failure.
    #[error("{service} unavailable: {detail}")]
    Unavailable {
        /// Which service could not be reached.
        service: &'static str,
        /// Underlying failure detail.
        detail: String,
    },
}

impl GatewayError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an unavailable error for the given service.
    #[must_use]
    pub fn unavailable(service: &'static str, detail: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            detail: detail.into(),
        }
    }

    /// Checks if this error signals an unreachable system of record.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<GatewayError> for gatehouse_core::Error {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Configuration(msg) => Self::Config(msg),
            GatewayError::Unavailable { service, detail } => {
                Self::Upstream(format!("{service}: {detail}"))
            }
        }
    }
}

/// Classification of a remote HTTP response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// Success (2xx).
    Ok,
    /// The looked-up record does not exist (404).
    NotFound,
    /// The presented credentials were rejected (401).
    Unauthorized,
    /// The remote system is erroring (5xx).
    ServerError,
    /// Any other unexpected status.
    OtherClient,
}

/// Classifies a raw HTTP status code.
#[must_use]
pub const fn classify_status(status: u16) -> ResponseClass {
    match status {
        200..=299 => ResponseClass::Ok,
        404 => ResponseClass::NotFound,
        401 => ResponseClass::Unauthorized,
        500..=599 => ResponseClass::ServerError,
        _ => ResponseClass::OtherClient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(classify_status(200), ResponseClass::Ok);
        assert_eq!(classify_status(204), ResponseClass::Ok);
        assert_eq!(classify_status(404), ResponseClass::NotFound);
        assert_eq!(classify_status(401), ResponseClass::Unauthorized);
        assert_eq!(classify_status(500), ResponseClass::ServerError);
        assert_eq!(classify_status(503), ResponseClass::ServerError);
        assert_eq!(classify_status(403), ResponseClass::OtherClient);
        assert_eq!(classify_status(418), ResponseClass::OtherClient);
    }

    #[test]
    fn unavailable_is_distinguished() {
        let error = GatewayError::unavailable("probation service", "connection refused");
        assert!(error.is_unavailable());
        assert!(!GatewayError::config("bad url").is_unavailable());
    }

    #[test]
    fn converts_into_core_error() {
        let error: gatehouse_core::Error =
            GatewayError::unavailable("probation service", "connection refused").into();
        assert!(error.is_server_error());

        let error: gatehouse_core::Error = GatewayError::config("bad url").into();
        assert!(matches!(error, gatehouse_core::Error::Config(_)));
    }
}
