//! Unified application error model.
//! One tagged enum is shared by the HTTP client adapter, the session store
//! and the preferences service, so a UI layer can render errors off the tag.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Transport or HTTP-status failure from the client adapter.
    /// `status` is 0 when the request never produced a response.
    Request { status: u16, body: String },
    /// Credential rejection during login.
    Auth { reason: String },
    /// A profile fetch found no valid session; callers treat this as Anonymous.
    SessionExpired { message: String },
    Config { message: String },
    Storage { message: String },
}

impl AppError {
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        AppError::Request { status, body: body.into() }
    }
    pub fn auth(reason: impl Into<String>) -> Self {
        AppError::Auth { reason: reason.into() }
    }
    pub fn session_expired(msg: impl Into<String>) -> Self {
        AppError::SessionExpired { message: msg.into() }
    }
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config { message: msg.into() }
    }
    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage { message: msg.into() }
    }

    /// Map to the HTTP status a UI/error page would report for this failure.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Request { status, .. } if *status > 0 => *status,
            AppError::Request { .. } => 503,
            AppError::Auth { .. } => 401,
            AppError::SessionExpired { .. } => 401,
            AppError::Config { .. } => 500,
            AppError::Storage { .. } => 500,
        }
    }

    /// True when the failure means "no valid credential", as opposed to a
    /// transport or programming problem.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AppError::Auth { .. }
                | AppError::SessionExpired { .. }
                | AppError::Request { status: 401, .. }
        )
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Request { status, body } => write!(f, "request failed ({}): {}", status, body),
            AppError::Auth { reason } => write!(f, "authentication failed: {}", reason),
            AppError::SessionExpired { message } => write!(f, "session expired: {}", message),
            AppError::Config { message } => write!(f, "config error: {}", message),
            AppError::Storage { message } => write!(f, "storage error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
        AppError::Request { status, body: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::request(404, "missing").http_status(), 404);
        assert_eq!(AppError::request(0, "connection refused").http_status(), 503);
        assert_eq!(AppError::auth("bad password").http_status(), 401);
        assert_eq!(AppError::session_expired("stale").http_status(), 401);
        assert_eq!(AppError::config("no base url").http_status(), 500);
        assert_eq!(AppError::storage("io").http_status(), 500);
    }

    #[test]
    fn unauthenticated_classification() {
        assert!(AppError::auth("no").is_unauthenticated());
        assert!(AppError::session_expired("gone").is_unauthenticated());
        assert!(AppError::request(401, "").is_unauthenticated());
        assert!(!AppError::request(500, "boom").is_unauthenticated());
        assert!(!AppError::storage("io").is_unauthenticated());
    }

    #[test]
    fn serializes_with_type_tag() {
        let v = serde_json::to_value(AppError::auth("denied")).unwrap();
        assert_eq!(v.get("type").and_then(|t| t.as_str()), Some("auth"));
        assert_eq!(v.get("reason").and_then(|r| r.as_str()), Some("denied"));
    }
}
