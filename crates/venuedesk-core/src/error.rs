//! Error types for the `VenueDesk` dashboard

use thiserror::Error;

/// Main error type for the `VenueDesk` dashboard
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request never produced a usable response (connection refused,
    /// timeout, undecodable body)
    #[error("Transport error: {message}")]
    Transport {
        /// Error message
        message: String,
    },

    /// The backend rejected our credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the backend
        message: String,
    },

    /// The backend answered with a body that does not match the expected DTO
    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse {
        /// Endpoint that produced the response
        endpoint: String,
        /// Parse failure description
        message: String,
    },

    /// Validation error
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Not found error
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// The active portal may not manage the requested resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error means the call itself failed and no per-item
    /// outcome is known.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Authentication(_) | Self::UnexpectedResponse { .. }
        )
    }

    /// HTTP status a dashboard handler should answer with for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Authentication(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Transport { .. } | Self::UnexpectedResponse { .. } | Self::Api { .. } => 502,
            Self::Io(_) | Self::Configuration { .. } | Self::Serialization(_) | Self::Other(_) => {
                500
            }
        }
    }

    /// Short machine-readable error kind used in JSON error bodies
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Configuration { .. } => "configuration",
            Self::Serialization(_) => "serialization",
            Self::Transport { .. } => "transport",
            Self::Authentication(_) => "authentication",
            Self::Api { .. } => "api",
            Self::UnexpectedResponse { .. } => "unexpected_response",
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "Invalid backend URL".to_string(),
        };

        assert_eq!(format!("{}", error), "Configuration error: Invalid backend URL");
        assert_eq!(error.status_code(), 500);
    }

    #[test]
    fn test_api_error_display() {
        let error = Error::Api {
            status: 409,
            message: "club is referenced by bookings".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "API error (409): club is referenced by bookings"
        );
        assert!(!error.is_transport());
        assert_eq!(error.status_code(), 502);
    }

    #[test]
    fn test_transport_classification() {
        assert!(
            Error::Transport {
                message: "connection refused".to_string()
            }
            .is_transport()
        );
        assert!(Error::Authentication("token expired".to_string()).is_transport());
        assert!(
            Error::UnexpectedResponse {
                endpoint: "/clubs".to_string(),
                message: "missing field `data`".to_string(),
            }
            .is_transport()
        );
        assert!(!Error::Other("x".to_string()).is_transport());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#)
            .unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(app_error.to_string().contains("Serialization error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_error_kinds_and_statuses() {
        let cases = vec![
            (
                Error::Validation {
                    field: "limit".to_string(),
                    message: "out of range".to_string(),
                },
                "validation",
                400,
            ),
            (Error::Authentication("nope".to_string()), "authentication", 401),
            (Error::Forbidden("operator portal".to_string()), "forbidden", 403),
            (
                Error::NotFound {
                    resource: "language xx".to_string(),
                },
                "not_found",
                404,
            ),
            (Error::Other("boom".to_string()), "other", 500),
        ];

        for (error, kind, status) in cases {
            assert_eq!(error.kind(), kind);
            assert_eq!(error.status_code(), status, "status for {}", error);
        }
    }
}
