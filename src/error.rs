//! Error handling for domain-sift

use thiserror::Error;

/// Main error type for domain-sift
#[derive(Error, Debug, Clone)]
pub enum DomainSiftError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Lookup error for '{domain}': {message}")]
    Lookup {
        domain: String,
        message: String,
        method: Option<String>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainSiftError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a lookup error
    pub fn lookup(
        domain: impl Into<String>,
        message: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
            method,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the retry policy should treat this as a transient failure.
    ///
    /// Everything a lookup backend raises mid-conversation is worth another
    /// attempt; config and internal errors are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Lookup { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Parse { .. }
        )
    }
}

/// Convert from common error types
#[cfg(feature = "rdap")]
impl From<reqwest::Error> for DomainSiftError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout("HTTP request", 10)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainSiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for DomainSiftError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<tokio::time::error::Elapsed> for DomainSiftError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation", 10)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainSiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(DomainSiftError::timeout("whois read", 10).is_transient());
        assert!(DomainSiftError::parse("garbled response", None).is_transient());
        assert!(!DomainSiftError::config("missing tld set").is_transient());
        assert!(!DomainSiftError::internal("invariant broken").is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = DomainSiftError::lookup("test.co", "connection reset", Some("whois".into()));
        assert!(err.to_string().contains("test.co"));
        assert!(err.to_string().contains("connection reset"));
    }
}
