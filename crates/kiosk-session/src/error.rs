//! # Session Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Catalog      │  │     Payment             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Catalog        │  │  PaymentError           │ │
//! │  │  ConfigLoad     │  │  (CoreError)    │  │  └── Declined           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment failures never leave the kiosk stuck: the session turns them
//! into a `fail_payment` transition and the customer is back on checkout.

use kiosk_core::CoreError;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is out of range.
    #[error("Invalid kiosk configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse a config or catalog file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// The catalog file parsed but failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),

    // =========================================================================
    // Payment Errors
    // =========================================================================
    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),
}

/// Outcomes a payment gateway can report besides success.
///
/// The simulated gateway never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The processor refused the charge.
    #[error("Payment declined: {reason}")]
    Declined { reason: String },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_error_wraps_into_session_error() {
        let err: SessionError = PaymentError::Declined {
            reason: "insufficient funds".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Payment failed: Payment declined: insufficient funds"
        );
    }

    #[test]
    fn test_io_error_is_config_load_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: SessionError = io.into();
        assert!(matches!(err, SessionError::ConfigLoadFailed(_)));
    }
}
