//! Unified application error model and mapping helpers.
//! Typed errors (`SessionError`, `StorageError`, `SeedError`) are what the core returns;
//! `AppError` is the flattened, user-facing form the presentation layer renders as a toast.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Failures of the key-value session store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the identity lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    DuplicateEmail,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures while loading or checking seed tables.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("{kind} '{id}' references unknown {target} '{target_id}'")]
    DanglingReference { kind: &'static str, id: String, target: &'static str, target_id: String },
    #[error("seed io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("seed parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Auth { code: String, message: String },
    Io { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Io { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Io { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn io<S: Into<String>>(code: S, msg: S) -> Self { AppError::Io { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Toast title the presentation layer shows for this error.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Auth { .. } => "Login failed",
            AppError::Conflict { .. } => "Registration failed",
            AppError::UserInput { .. } => "Incomplete information",
            AppError::NotFound { .. } => "Not found",
            AppError::Io { .. } | AppError::Internal { .. } => "Something went wrong",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::io("storage_error".to_string(), err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => AppError::auth("invalid_credentials", "Invalid credentials"),
            SessionError::DuplicateEmail => AppError::conflict("user_exists", "User already exists"),
            SessionError::Validation(msg) => AppError::user("invalid_input".to_string(), msg),
            SessionError::Storage(e) => e.into(),
        }
    }
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        AppError::internal("seed_error".to_string(), err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal("internal_error".to_string(), err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
