//! Multipart upload of titled PDFs to the backend.
//!
//! [`submit_upload`] drives one save from start to finish: it validates the
//! form, sends the payload through an [`UploadTransport`], writes the outcome
//! back into the form and reports it to a [`Notifier`].

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::config::UPLOAD_PATH;
use crate::services::toast::Notifier;
use crate::state::{FormPart, FormStore, PickedFile, UploadPayload};
use crate::types::{ConflictBody, CurrentUser, FormError, UploadError, UploadResult};

/// Toast shown after the backend accepted the batch.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Files uploaded successfully!";

/// Toast shown for every failure other than a title conflict.
pub const UPLOAD_FAILURE_MESSAGE: &str = "Error uploading files";

/// Something able to deliver an [`UploadPayload`] to `/pdf/upload`.
///
/// The batch is accepted or rejected as a whole.
#[allow(async_fn_in_trait)]
pub trait UploadTransport<F> {
    async fn send(&self, payload: UploadPayload<F>) -> UploadResult<()>;
}

/// Maps a non-2xx reply to an [`UploadError`].
///
/// A 409 whose body lists `existingTitles` is a conflict; a 409 without that
/// list is treated like any other server error.
pub fn classify_failure(status: u16, body: &str) -> UploadError {
    if status == 409 {
        if let Ok(conflict) = serde_json::from_str::<ConflictBody>(body) {
            return UploadError::Conflict {
                existing_titles: conflict.existing_titles,
            };
        }
    }

    UploadError::Server {
        status,
        body: body.to_string(),
    }
}

/// Text of the toast reporting `err`.
pub fn failure_message(err: &UploadError) -> String {
    match err {
        UploadError::Conflict { .. } => err.to_string(),
        _ => UPLOAD_FAILURE_MESSAGE.to_string(),
    }
}

// =============================================================================
// Browser transport
// =============================================================================

/// Uploads through `fetch` with an optional bearer token.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), UPLOAD_PATH)
    }
}

/// Builds the browser `FormData`. The content type and boundary are left to
/// the browser.
fn to_form_data(payload: UploadPayload<File>) -> UploadResult<FormData> {
    let form_data = FormData::new()
        .map_err(|e| UploadError::Payload(format!("Failed to create FormData: {:?}", e)))?;

    for part in payload.into_parts() {
        let appended = match part {
            FormPart::File { field, file } => {
                form_data.append_with_blob_and_filename(field, &file, &PickedFile::name(&file))
            }
            FormPart::Text { field, value } => form_data.append_with_str(&field, &value),
        };
        appended.map_err(|e| UploadError::Payload(format!("Failed to append field: {:?}", e)))?;
    }

    Ok(form_data)
}

impl UploadTransport<File> for HttpTransport {
    async fn send(&self, payload: UploadPayload<File>) -> UploadResult<()> {
        let form_data = to_form_data(payload)?;

        let url = self.upload_url();
        let mut builder = Request::post(&url);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = builder
            .body(form_data)
            .map_err(|e| UploadError::Payload(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }
}

// =============================================================================
// Submit flow
// =============================================================================

/// How a save attempt ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Refused before any request was made.
    Rejected(FormError),
    /// The backend accepted `files` files.
    Uploaded { files: usize },
    /// The request was made and failed.
    Failed(UploadError),
    /// The form went away before the save could start.
    Abandoned,
}

/// Saves the selection held in `store` on behalf of `user`.
///
/// The form is in its loading state exactly while `transport` is awaited.
/// Failures keep the selection and titles for another attempt.
pub async fn submit_upload<F, S, T, N>(
    store: &S,
    user: Option<&CurrentUser>,
    transport: &T,
    notifier: &N,
) -> SubmitOutcome
where
    F: PickedFile,
    S: FormStore<F>,
    T: UploadTransport<F>,
    N: Notifier,
{
    let payload = match store.with_form(|form| form.begin_submit(user)) {
        Some(Ok(payload)) => payload,
        Some(Err(err)) => {
            log::warn!("⚠️  Upload not started: {}", err);
            return SubmitOutcome::Rejected(err);
        }
        None => {
            log::warn!("Upload form disposed before submit");
            return SubmitOutcome::Abandoned;
        }
    };

    let files = payload.file_count();
    log::info!("📤 Uploading {} PDF file(s)...", files);

    let result = transport.send(payload).await;
    if store.with_form(|form| form.finish_submit(&result)).is_none() {
        log::warn!("Upload form disposed while the request was in flight");
    }

    match result {
        Ok(()) => {
            notifier.success(UPLOAD_SUCCESS_MESSAGE);
            SubmitOutcome::Uploaded { files }
        }
        Err(err) => {
            log::error!("❌ Upload failed: {}", err);
            notifier.error(&failure_message(&err));
            SubmitOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{pdf, user, FakeFile};
    use crate::state::UploadForm;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Store = Rc<RefCell<UploadForm<FakeFile>>>;

    /// Records each payload and whether the form was loading during the call.
    struct FakeTransport {
        store: Store,
        reply: UploadResult<()>,
        sent: RefCell<Vec<UploadPayload<FakeFile>>>,
        loading_during_send: RefCell<Vec<bool>>,
    }

    impl FakeTransport {
        fn new(store: &Store, reply: UploadResult<()>) -> Self {
            Self {
                store: store.clone(),
                reply,
                sent: RefCell::new(Vec::new()),
                loading_during_send: RefCell::new(Vec::new()),
            }
        }
    }

    impl UploadTransport<FakeFile> for FakeTransport {
        async fn send(&self, payload: UploadPayload<FakeFile>) -> UploadResult<()> {
            self.loading_during_send
                .borrow_mut()
                .push(self.store.borrow().is_loading());
            self.sent.borrow_mut().push(payload);
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        successes: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Notifier for FakeNotifier {
        fn success(&self, message: &str) {
            self.successes.borrow_mut().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn store_with_titles() -> Store {
        let mut form = UploadForm::default();
        form.select_files(vec![pdf("a.pdf"), pdf("b.pdf")]).unwrap();
        form.edit_title("a.pdf", "Alpha");
        form.edit_title("b.pdf", "Beta");
        Rc::new(RefCell::new(form))
    }

    #[test]
    fn test_submit_without_user_makes_no_request() {
        let store = store_with_titles();
        let transport = FakeTransport::new(&store, Ok(()));
        let notifier = FakeNotifier::default();

        let outcome = block_on(submit_upload(&store, None, &transport, &notifier));

        assert_eq!(outcome, SubmitOutcome::Rejected(FormError::NotLoggedIn));
        assert!(transport.sent.borrow().is_empty());
        assert_eq!(store.borrow().error(), Some("User is not logged in"));
        assert!(!store.borrow().is_loading());
        assert!(notifier.successes.borrow().is_empty());
    }

    #[test]
    fn test_submit_success_sends_batch_and_resets() {
        let store = store_with_titles();
        let transport = FakeTransport::new(&store, Ok(()));
        let notifier = FakeNotifier::default();
        let current = user();

        let outcome = block_on(submit_upload(&store, Some(&current), &transport, &notifier));

        assert_eq!(outcome, SubmitOutcome::Uploaded { files: 2 });

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        let payload = &sent[0];
        assert_eq!(payload.files().cloned().collect::<Vec<_>>(), vec![pdf("a.pdf"), pdf("b.pdf")]);
        assert_eq!(payload.text("titles[0]"), Some("Alpha"));
        assert_eq!(payload.text("titles[1]"), Some("Beta"));
        assert_eq!(payload.text("userId"), Some("user-1"));

        let form = store.borrow();
        assert!(!form.has_selection());
        assert!(form.titles().is_empty());
        assert_eq!(*notifier.successes.borrow(), vec![UPLOAD_SUCCESS_MESSAGE]);
        assert!(notifier.errors.borrow().is_empty());
    }

    #[test]
    fn test_submit_conflict_lists_titles_and_keeps_state() {
        let store = store_with_titles();
        let before = store.borrow().clone();
        let transport = FakeTransport::new(
            &store,
            Err(UploadError::Conflict {
                existing_titles: vec!["Alpha".into()],
            }),
        );
        let notifier = FakeNotifier::default();

        let outcome = block_on(submit_upload(&store, Some(&user()), &transport, &notifier));

        assert!(matches!(outcome, SubmitOutcome::Failed(UploadError::Conflict { .. })));
        let errors = notifier.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Alpha"));
        assert_eq!(*store.borrow(), before);
    }

    #[test]
    fn test_submit_generic_failure_keeps_state() {
        let store = store_with_titles();
        let before = store.borrow().clone();
        let transport = FakeTransport::new(
            &store,
            Err(UploadError::Server { status: 500, body: "oops".into() }),
        );
        let notifier = FakeNotifier::default();

        block_on(submit_upload(&store, Some(&user()), &transport, &notifier));

        assert_eq!(*notifier.errors.borrow(), vec![UPLOAD_FAILURE_MESSAGE]);
        assert_eq!(*store.borrow(), before);
    }

    #[test]
    fn test_loading_only_while_request_in_flight() {
        let replies = vec![
            Ok(()),
            Err(UploadError::Conflict { existing_titles: vec!["Alpha".into()] }),
            Err(UploadError::Network("offline".into())),
        ];

        for reply in replies {
            let store = store_with_titles();
            assert!(!store.borrow().is_loading());

            let transport = FakeTransport::new(&store, reply);
            block_on(submit_upload(&store, Some(&user()), &transport, &FakeNotifier::default()));

            assert_eq!(*transport.loading_during_send.borrow(), vec![true]);
            assert!(!store.borrow().is_loading());
        }
    }

    #[test]
    fn test_retry_after_failure_resends_full_batch() {
        let store = store_with_titles();
        let notifier = FakeNotifier::default();

        let failing = FakeTransport::new(&store, Err(UploadError::Network("offline".into())));
        block_on(submit_upload(&store, Some(&user()), &failing, &notifier));

        store.borrow_mut().edit_title("a.pdf", "Alpha 2");
        let working = FakeTransport::new(&store, Ok(()));
        let outcome = block_on(submit_upload(&store, Some(&user()), &working, &notifier));

        assert_eq!(outcome, SubmitOutcome::Uploaded { files: 2 });
        assert_eq!(working.sent.borrow()[0].text("titles[0]"), Some("Alpha 2"));
    }

    #[test]
    fn test_classify_conflict_with_titles() {
        let err = classify_failure(409, r#"{"existingTitles": ["Alpha", "Beta"]}"#);
        assert_eq!(
            err,
            UploadError::Conflict {
                existing_titles: vec!["Alpha".into(), "Beta".into()]
            }
        );
        assert_eq!(failure_message(&err), "Title already exists: Alpha, Beta");
    }

    #[test]
    fn test_classify_conflict_without_titles_is_server_error() {
        let err = classify_failure(409, "duplicate");
        assert_eq!(err, UploadError::Server { status: 409, body: "duplicate".into() });
        assert_eq!(failure_message(&err), UPLOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_classify_other_status() {
        let err = classify_failure(413, "too large");
        assert!(matches!(err, UploadError::Server { status: 413, .. }));
    }

    #[test]
    fn test_upload_url_joins_base() {
        let transport = HttpTransport::new("http://localhost:5000/", None);
        assert_eq!(transport.upload_url(), "http://localhost:5000/pdf/upload");
    }
}
