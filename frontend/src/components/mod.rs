//! UI components for the PDF Vault application.
//!
//! # Layout Components
//! - [`Header`] - Top bar showing the signed-in user
//! - [`Toaster`] - Toast notifications
//!
//! # Feature Components
//! - [`UploadPdfForm`] - PDF selection, title editing and save
//! - [`Loader`] - Spinner shown while saving

mod header;
mod loader;
mod toaster;
mod upload;

pub use header::*;
pub use loader::*;
pub use toaster::*;
pub use upload::*;
