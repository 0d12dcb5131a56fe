//! Top bar showing who is signed in

use leptos::*;

use crate::services::use_session;
use crate::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let user = session.user();

    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <div class="user-status" class:active=move || user.with(Option::is_some)>
                    <span class="user-dot" class:active=move || user.with(Option::is_some)></span>
                    <span>
                        {move || match user.get() {
                            Some(user) => user.display_name(),
                            None => "Not signed in".to_string(),
                        }}
                    </span>
                </div>
            </div>
        </header>
    }
}
