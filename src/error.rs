//! Unified application error model and mapping helpers.
//! Every backend response is classified into one of the categories below so
//! the console can surface a distinct notification per category without
//! depending on the backend's exact error schema.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// No response received at all (DNS, connect, timeout).
    Transport { code: String, message: String },
    /// Credential missing, expired or rejected (401).
    Auth { code: String, message: String },
    /// Valid session, insufficient role (403).
    Forbidden { code: String, message: String },
    /// Request rejected by backend validation (other 4xx).
    Validation { code: String, message: String },
    /// Detail resource does not exist (404).
    NotFound { code: String, message: String },
    /// Backend fault or anything we cannot classify (5xx).
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Transport { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Transport { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn transport<S: Into<String>>(code: S, msg: S) -> Self { AppError::Transport { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn forbidden<S: Into<String>>(code: S, msg: S) -> Self { AppError::Forbidden { code: code.into(), message: msg.into() } }
    pub fn validation<S: Into<String>>(code: S, msg: S) -> Self { AppError::Validation { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// True for 401-class failures, which should end the current session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }

    /// Classify a non-success HTTP status plus raw response body.
    /// The body is probed for a `message` field; anything unparseable falls
    /// back to a category default so the user always sees something readable.
    pub fn from_status(status: u16, body: &str) -> Self {
        let msg = extract_message(body);
        match status {
            401 => AppError::auth("unauthorized".to_string(), msg.unwrap_or_else(|| "Session expired or credentials rejected".to_string())),
            403 => AppError::forbidden("forbidden".to_string(), msg.unwrap_or_else(|| "You do not have access to this resource".to_string())),
            404 => AppError::not_found("not_found".to_string(), msg.unwrap_or_else(|| "Resource not found".to_string())),
            s if (400..500).contains(&s) => AppError::validation("validation".to_string(), msg.unwrap_or_else(|| "Request rejected by server".to_string())),
            _ => AppError::internal("server_error".to_string(), msg.unwrap_or_else(|| format!("Server error (HTTP {})", status))),
        }
    }
}

/// Pull a human-readable message out of a JSON error body, trying the shapes
/// the backend is known to emit: `{message}`, `{error}`, `{data:{message}}`.
fn extract_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    for probe in [
        v.get("message"),
        v.get("error"),
        v.get("data").and_then(|d| d.get("message")),
    ] {
        if let Some(s) = probe.and_then(|m| m.as_str()) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors here mean the request never produced a usable
        // response; status-bearing failures are classified in from_status.
        AppError::Transport { code: "transport".into(), message: err.to_string() }
    }
}
