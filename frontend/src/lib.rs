//! PDF Vault - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend letting a signed-in user upload PDF files, each
//! with a display title, to the PDF Vault backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (signed-in user)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UploadPdfForm                                               │
//! │  ├── drop zone + title list + Save                          │
//! │  └── Loader (while saving)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Toaster                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (CurrentUser, Toast, errors)
//! - [`state`] - Upload form state and transitions
//! - [`components`] - UI components (Header, UploadPdfForm, Toaster, Loader)
//! - [`services`] - Upload transport, session and toasts

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Session
    CurrentUser, UserId,
    // Toasts
    Toast, ToastLevel,
    // API
    ConflictBody,
    // Errors
    FormError, UploadError, SessionError, UploadResult, SessionResult,
};

// State
pub use state::{FormStore, PickedFile, UploadForm, UploadPayload};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Installs the panic hook and console logger, then mounts [`App`].
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 PDF Vault - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_session();
    provide_toasts();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path="/" view=UploadPdfForm/>
                </Routes>
            </main>
        </Router>
        <Toaster/>
    }
}
