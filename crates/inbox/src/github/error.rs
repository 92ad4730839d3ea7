//! Classification of GitHub API failures
//!
//! Every failed account fetch collapses into one of a small set of
//! categories so the UI can render a meaningful per-account (or global)
//! error instead of a raw HTTP status.

use serde::{Deserialize, Serialize};

/// Why an account's API call failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The host could not be reached at all
    #[error("network unavailable")]
    Network,
    /// The credential was rejected (401)
    #[error("bad credentials")]
    BadCredentials,
    /// The credential lacks the notifications scope
    #[error("missing required scopes")]
    MissingScopes,
    /// Primary or secondary rate limit exhausted
    #[error("rate limited")]
    RateLimited,
    /// Anything that did not match a known category
    #[error("unknown API error: {0}")]
    Unknown(String),
}

/// Substrings GitHub uses in 403 bodies when a rate limit is exhausted
const RATE_LIMIT_MARKERS: &[&str] = &[
    "API rate limit exceeded",
    "You have exceeded a secondary rate limit",
];

const MISSING_SCOPES_MARKER: &str = "Missing the 'notifications' scope";

impl ApiError {
    /// Classify an HTTP error response by status code and body message
    pub fn from_response(status: u16, message: &str) -> Self {
        match status {
            401 => ApiError::BadCredentials,
            403 if message.contains(MISSING_SCOPES_MARKER) => ApiError::MissingScopes,
            403 if RATE_LIMIT_MARKERS.iter().any(|m| message.contains(m)) => ApiError::RateLimited,
            429 => ApiError::RateLimited,
            _ => ApiError::Unknown(format!("HTTP {status}: {message}")),
        }
    }

    /// Classify a transport-level failure (DNS, connect, TLS, timeout)
    pub fn from_transport(err: &ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => ApiError::from_response(*status, ""),
            ureq::Error::Timeout(_)
            | ureq::Error::ConnectionFailed
            | ureq::Error::HostNotFound => ApiError::Network,
            ureq::Error::Io(_) => ApiError::Network,
            other => ApiError::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials() {
        assert_eq!(
            ApiError::from_response(401, "Bad credentials"),
            ApiError::BadCredentials
        );
    }

    #[test]
    fn test_missing_scopes() {
        assert_eq!(
            ApiError::from_response(
                403,
                "Missing the 'notifications' scope. Check your token scopes."
            ),
            ApiError::MissingScopes
        );
    }

    #[test]
    fn test_rate_limited() {
        assert_eq!(
            ApiError::from_response(403, "API rate limit exceeded for 1.2.3.4"),
            ApiError::RateLimited
        );
        assert_eq!(
            ApiError::from_response(403, "You have exceeded a secondary rate limit"),
            ApiError::RateLimited
        );
        assert_eq!(
            ApiError::from_response(429, "slow down"),
            ApiError::RateLimited
        );
    }

    #[test]
    fn test_unknown_carries_detail() {
        let err = ApiError::from_response(500, "Internal Server Error");
        assert_eq!(
            err,
            ApiError::Unknown("HTTP 500: Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_plain_403_is_unknown() {
        assert!(matches!(
            ApiError::from_response(403, "Forbidden"),
            ApiError::Unknown(_)
        ));
    }
}
