//! Browser-facing services.
//!
//! # Services
//!
//! - [`upload`] - Multipart PDF upload to the backend and the save flow
//! - [`session`] - Signed-in user restored from `localStorage`
//! - [`toast`] - Toast notification queue

pub mod upload;
pub mod session;
pub mod toast;

pub use upload::*;
pub use session::*;
pub use toast::*;
