//! Toast stack rendered on top of the page.

use leptos::*;

use crate::services::use_toasts;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.css_class()>
                            <span class="toast-icon">{toast.level.icon()}</span>
                            <span class="toast-message">{toast.message}</span>
                            <span class="toast-time">{toast.timestamp}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
