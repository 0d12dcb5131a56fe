//! Application configuration.
//!
//! Compile-time settings for the PDF Vault frontend. The backend origin is
//! the only value that differs between deployments.

/// Backend API base URL.
///
/// The PDF Vault backend serving the upload endpoint.
pub const BACKEND_URL: &str = "http://localhost:5000";

/// Path of the multipart upload endpoint, relative to [`BACKEND_URL`].
pub const UPLOAD_PATH: &str = "/pdf/upload";

/// The only MIME type accepted by the file picker handler.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Application name, used for the document title.
pub const APP_NAME: &str = "PDF Vault";

/// How long a toast stays on screen (in milliseconds).
pub const TOAST_DURATION_MS: u32 = 4_000;

/// Maximum toasts displayed at once; the oldest is dropped first.
pub const MAX_TOASTS: usize = 5;

/// `localStorage` key holding the signed-in user as JSON.
pub const SESSION_USER_KEY: &str = "pdfvault.user";

/// `localStorage` key holding the bearer token for API calls.
pub const SESSION_TOKEN_KEY: &str = "pdfvault.token";
