//! PDF upload form.
//!
//! Lets the signed-in user pick PDFs, give each a title and save them in one
//! multipart request. While the save is running only the loader is shown.

use leptos::*;
use web_sys::{Event, File, FileList, HtmlInputElement};

use crate::components::Loader;
use crate::services::{submit_upload, use_session, use_toasts, HttpTransport};
use crate::state::UploadForm;
use crate::BACKEND_URL;

/// Collects the picker's `FileList` in browser order.
fn file_list_to_vec(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

#[component]
pub fn UploadPdfForm() -> impl IntoView {
    let session = use_session();
    let toasts = use_toasts();
    let form = create_rw_signal(UploadForm::<File>::default());

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let picked = input
            .files()
            .map(|files| file_list_to_vec(&files))
            .unwrap_or_default();

        form.update(|form| match form.select_files(picked) {
            Ok(count) => log::info!("📄 {} PDF file(s) selected", count),
            Err(e) => log::warn!("⚠️  {}", e),
        });
    };

    let on_save = move |_| {
        let user = session.current_user();
        let transport = HttpTransport::new(BACKEND_URL, session.token());

        spawn_local(async move {
            submit_upload(&form, user.as_ref(), &transport, &toasts).await;
        });
    };

    view! {
        <div class="container">
            <h1 class="page-title">"Save PDF"</h1>

            <Show
                when=move || !form.with(|form| form.is_loading())
                fallback=|| view! { <Loader/> }
            >
                // Drop zone look only; the invisible picker covers it
                <div class="drop-zone">
                    <input
                        type="file"
                        accept=".pdf"
                        multiple=true
                        class="drop-zone-input"
                        on:change=on_file_change
                    />
                    <div class="drop-zone-content">
                        <div class="drop-zone-icon">"+"</div>
                        <p class="drop-zone-hint">"Drag & drop files here or click to select"</p>
                    </div>
                </div>

                <Show
                    when=move || form.with(|form| form.error().is_some())
                    fallback=|| view! { }
                >
                    <p class="error-message">
                        {move || form.with(|form| form.error().unwrap_or_default().to_string())}
                    </p>
                </Show>

                <Show
                    when=move || form.with(|form| form.has_selection())
                    fallback=|| view! { }
                >
                    <div class="uploaded-list">
                        <h2>"Uploaded PDFs:"</h2>
                        <ul>
                            <For
                                each=move || form.with(|form| form.file_rows())
                                key=|row| row.clone()
                                children=move |(_, name)| {
                                    let key = name.clone();
                                    view! {
                                        <li class="uploaded-item">
                                            <input
                                                type="text"
                                                class="title-input"
                                                placeholder="Edit title"
                                                prop:value=move || {
                                                    form.with(|form| form.title(&key).unwrap_or_default().to_string())
                                                }
                                                on:input=move |ev| {
                                                    let title = event_target_value(&ev);
                                                    form.update(|form| {
                                                        form.edit_title(&name, title);
                                                    });
                                                }
                                            />
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>

                    <div class="actions">
                        <button class="save-button" on:click=on_save>
                            "Save"
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
