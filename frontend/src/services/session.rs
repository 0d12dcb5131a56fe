//! Signed-in session, restored from browser storage.
//!
//! Signing in happens elsewhere in the product; it leaves the user as JSON
//! under [`SESSION_USER_KEY`] and the API token under [`SESSION_TOKEN_KEY`].
//! This module only reads them back and exposes them through context.

use leptos::*;
use web_sys::Storage;

use crate::config::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use crate::types::{CurrentUser, SessionError, SessionResult};

/// Parses the stored user. A missing or blank entry means nobody is signed in.
pub fn parse_stored_user(raw: Option<&str>) -> SessionResult<Option<CurrentUser>> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
    }
}

fn local_storage() -> SessionResult<Storage> {
    gloo_utils::window()
        .local_storage()
        .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))?
        .ok_or_else(|| SessionError::StorageUnavailable("localStorage is disabled".to_string()))
}

fn read_item(storage: &Storage, key: &str) -> SessionResult<Option<String>> {
    storage
        .get_item(key)
        .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))
}

/// Current user and API token, shared through context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    user: RwSignal<Option<CurrentUser>>,
    token: RwSignal<Option<String>>,
}

impl SessionContext {
    /// Restores the session from `localStorage`. Any storage or parse failure
    /// is logged and leaves the session signed out.
    pub fn restore() -> Self {
        let (user, token) = match Self::read() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("⚠️  Could not restore session: {}", e);
                (None, None)
            }
        };

        match &user {
            Some(user) => log::info!("🔑 Signed in as {}", user.display_name()),
            None => log::info!("🔒 No signed-in user"),
        }

        Self {
            user: create_rw_signal(user),
            token: create_rw_signal(token),
        }
    }

    fn read() -> SessionResult<(Option<CurrentUser>, Option<String>)> {
        let storage = local_storage()?;
        let user = parse_stored_user(read_item(&storage, SESSION_USER_KEY)?.as_deref())?;
        let token = read_item(&storage, SESSION_TOKEN_KEY)?.filter(|token| !token.is_empty());
        Ok((user, token))
    }

    /// The signed-in user at the time of the call (untracked).
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.get_untracked()
    }

    /// Bearer token for API calls (untracked).
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// The signed-in user (tracked), for views.
    pub fn user(&self) -> Signal<Option<CurrentUser>> {
        self.user.into()
    }
}

/// Restores the session and registers it in the current reactive scope.
pub fn provide_session() -> SessionContext {
    let session = SessionContext::restore();
    provide_context(session);
    session
}

/// The [`SessionContext`] registered by [`provide_session`].
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
