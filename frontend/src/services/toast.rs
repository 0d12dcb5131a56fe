//! Toast notifications.
//!
//! [`Notifier`] is what the upload flow reports to. In the browser it is
//! backed by [`Toasts`], a context-held queue rendered by the `Toaster`
//! component and cleared on a timer.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::config::{MAX_TOASTS, TOAST_DURATION_MS};
use crate::types::{Toast, ToastLevel};

/// Sink for user-facing success and error messages.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Bounded list of visible toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Adds a toast and returns its id. Drops the oldest past [`MAX_TOASTS`].
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push(Toast {
            id,
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
        if self.items.len() > MAX_TOASTS {
            self.items.remove(0);
        }

        id
    }

    /// Removes the toast with `id`, if it is still shown.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Browser notifier, shared through context.
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            queue: create_rw_signal(ToastQueue::default()),
        }
    }

    /// Visible toasts (tracked).
    pub fn items(&self) -> Vec<Toast> {
        self.queue.with(|queue| queue.items().to_vec())
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| queue.dismiss(id));
    }

    fn show(&self, level: ToastLevel, message: &str) {
        let Some(id) = self.queue.try_update(|queue| queue.push(level, message)) else {
            return;
        };

        let queue = self.queue;
        Timeout::new(TOAST_DURATION_MS, move || {
            queue.try_update(|queue| queue.dismiss(id));
        })
        .forget();
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        log::info!("✅ {}", message);
        self.show(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        log::error!("❌ {}", message);
        self.show(ToastLevel::Error, message);
    }
}

/// Registers a fresh [`Toasts`] in the current reactive scope.
pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

/// The [`Toasts`] registered by [`provide_toasts`].
pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}
