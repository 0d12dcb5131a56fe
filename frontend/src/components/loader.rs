//! Loading indicator shown while an upload is in flight

use leptos::*;

#[component]
pub fn Loader(
    /// Text under the spinner
    #[prop(into, default = "Uploading...".into())]
    label: String,
) -> impl IntoView {
    view! {
        <div class="loader" role="status">
            <div class="loader-spinner"></div>
            <div class="loader-label">{label}</div>
        </div>
    }
}
