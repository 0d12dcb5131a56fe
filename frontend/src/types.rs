//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Session Types** - The signed-in user
//! - **Toast Types** - Notification display
//! - **API Types** - Backend response structures
//! - **Error Types** - Form, upload and session failures

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Session Types
// =============================================================================

/// Identifier of a user as issued by the backend.
///
/// Accounts created by older backends carry numeric ids, newer ones strings.
/// Both are sent back verbatim in the `userId` form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(i64),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Text(id) => write!(f, "{}", id),
            UserId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// The signed-in user, owned by the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CurrentUser {
    /// Name shown in the header: name, then email, then the raw id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

// =============================================================================
// Toast Types
// =============================================================================

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }

    /// Get icon prefix for display.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✅",
            ToastLevel::Error => "❌",
        }
    }
}

/// A notification waiting to be dismissed.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    /// Local time the toast was raised (HH:MM:SS)
    pub timestamp: String,
}

// =============================================================================
// API Types
// =============================================================================

/// Body of a `409 Conflict` reply from `/pdf/upload`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBody {
    /// Titles that are already taken, in server order
    pub existing_titles: Vec<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Validation failures raised by the upload form before any network call.
///
/// The messages are shown to the user as-is.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    /// The picker returned no PDF at all.
    #[error("Please upload valid PDF files")]
    NoValidFiles,

    /// Save was pressed without a session.
    #[error("User is not logged in")]
    NotLoggedIn,

    /// A submission is already in flight.
    #[error("An upload is already in progress")]
    AlreadySubmitting,
}

/// Failures of the multipart upload call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadError {
    /// One or more titles already exist on the server.
    #[error("Title already exists: {}", .existing_titles.join(", "))]
    Conflict { existing_titles: Vec<String> },

    /// Any other non-2xx reply.
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// The multipart body could not be assembled.
    #[error("Failed to build upload payload: {0}")]
    Payload(String),
}

/// Failures while restoring the session from browser storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `localStorage` is disabled or unreachable.
    #[error("Browser storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The stored user is not valid JSON.
    #[error("Stored user is malformed: {0}")]
    MalformedUser(#[from] serde_json::Error),
}

/// Result type for upload calls.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_string_and_number() {
        let user: CurrentUser = serde_json::from_str(r#"{"id": "64f1c0ffee"}"#).unwrap();
        assert_eq!(user.id, UserId::Text("64f1c0ffee".into()));
        assert_eq!(user.id.to_string(), "64f1c0ffee");

        let user: CurrentUser = serde_json::from_str(r#"{"id": 42, "name": "Ada"}"#).unwrap();
        assert_eq!(user.id, UserId::Number(42));
        assert_eq!(user.id.to_string(), "42");
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = CurrentUser {
            id: UserId::Number(7),
            name: None,
            email: Some("ada@example.com".into()),
        };
        assert_eq!(user.display_name(), "ada@example.com");

        let user = CurrentUser { email: None, ..user };
        assert_eq!(user.display_name(), "7");
    }

    #[test]
    fn test_conflict_body_deserialization() {
        let body: ConflictBody =
            serde_json::from_str(r#"{"existingTitles": ["Alpha", "Beta"]}"#).unwrap();
        assert_eq!(body.existing_titles, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FormError::NoValidFiles.to_string(), "Please upload valid PDF files");
        assert_eq!(FormError::NotLoggedIn.to_string(), "User is not logged in");

        let err = UploadError::Conflict {
            existing_titles: vec!["Alpha".into(), "Beta".into()],
        };
        assert_eq!(err.to_string(), "Title already exists: Alpha, Beta");

        let err = UploadError::Server { status: 500, body: "boom".into() };
        assert!(err.to_string().contains("500"));
    }
}
