//! Upload form state and its transitions.
//!
//! All form data lives in one [`UploadForm`] value and every user action is a
//! method on it, so the transitions can be exercised without a DOM. The view
//! holds the form in a Leptos signal; the submit flow reaches it through
//! [`FormStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use leptos::{RwSignal, SignalUpdate};

use crate::config::PDF_MIME_TYPE;
use crate::types::{CurrentUser, FormError, UploadError};

// =============================================================================
// Picked files
// =============================================================================

/// A file handed over by the native file picker.
pub trait PickedFile: Clone {
    /// File name as reported by the browser.
    fn name(&self) -> String;

    /// MIME type as reported by the browser (may be empty).
    fn mime_type(&self) -> String;

    fn is_pdf(&self) -> bool {
        self.mime_type() == PDF_MIME_TYPE
    }
}

impl PickedFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        self.type_()
    }
}

// =============================================================================
// Multipart payload
// =============================================================================

/// Form field carrying the binary content of each file.
pub const FILES_FIELD: &str = "files";

/// Form field carrying the uploader's identifier.
pub const USER_ID_FIELD: &str = "userId";

/// Name of the title field for the file at `index`.
pub fn title_field(index: usize) -> String {
    format!("titles[{}]", index)
}

/// One part of a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub enum FormPart<F> {
    File { field: &'static str, file: F },
    Text { field: String, value: String },
}

/// Transport-neutral multipart body, in wire order.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadPayload<F> {
    parts: Vec<FormPart<F>>,
}

impl<F> UploadPayload<F> {
    pub fn parts(&self) -> &[FormPart<F>] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart<F>> {
        self.parts
    }

    /// Files in the order they will be sent.
    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.parts.iter().filter_map(|part| match part {
            FormPart::File { file, .. } => Some(file),
            FormPart::Text { .. } => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Value of the first text field called `field`.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { field: name, value } if name == field => Some(value.as_str()),
            _ => None,
        })
    }
}

// =============================================================================
// Form state
// =============================================================================

/// Everything the upload form knows: selected files, their titles, the inline
/// error and whether a submission is in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadForm<F> {
    selection: Vec<F>,
    titles: BTreeMap<String, String>,
    error: Option<String>,
    loading: bool,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            selection: Vec::new(),
            titles: BTreeMap::new(),
            error: None,
            loading: false,
        }
    }
}

impl<F: PickedFile> UploadForm<F> {
    pub fn selection(&self) -> &[F] {
        &self.selection
    }

    pub fn titles(&self) -> &BTreeMap<String, String> {
        &self.titles
    }

    pub fn title(&self, file_name: &str) -> Option<&str> {
        self.titles.get(file_name).map(String::as_str)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Selected file names, in selection order.
    pub fn file_names(&self) -> Vec<String> {
        self.selection.iter().map(PickedFile::name).collect()
    }

    /// `(position, name)` per selected file, unique even when two picked
    /// files share a name. Both rows still edit the same title entry.
    pub fn file_rows(&self) -> Vec<(usize, String)> {
        self.file_names().into_iter().enumerate().collect()
    }

    /// Replaces the selection with the PDFs among `picked`.
    ///
    /// Titles start out as the file names. When nothing in `picked` is a PDF
    /// the previous selection is kept and the inline error is set.
    pub fn select_files(&mut self, picked: impl IntoIterator<Item = F>) -> Result<usize, FormError> {
        let pdfs: Vec<F> = picked.into_iter().filter(PickedFile::is_pdf).collect();

        if pdfs.is_empty() {
            let err = FormError::NoValidFiles;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.titles = pdfs
            .iter()
            .map(|file| (file.name(), file.name()))
            .collect();
        self.selection = pdfs;
        self.error = None;

        Ok(self.selection.len())
    }

    /// Sets the title of `file_name`. Unknown names are ignored.
    ///
    /// Returns whether an entry was updated.
    pub fn edit_title(&mut self, file_name: &str, title: impl Into<String>) -> bool {
        match self.titles.get_mut(file_name) {
            Some(entry) => {
                *entry = title.into();
                true
            }
            None => false,
        }
    }

    /// Enters the submitting state and returns the body to send.
    ///
    /// Without a user the inline error is set and nothing changes otherwise.
    pub fn begin_submit(&mut self, user: Option<&CurrentUser>) -> Result<UploadPayload<F>, FormError> {
        if self.loading {
            return Err(FormError::AlreadySubmitting);
        }

        let Some(user) = user else {
            let err = FormError::NotLoggedIn;
            self.error = Some(err.to_string());
            return Err(err);
        };

        self.loading = true;
        Ok(self.payload_for(user))
    }

    /// Leaves the submitting state. Only a successful upload resets the
    /// selection; failures keep it so titles can be fixed and resent.
    pub fn finish_submit(&mut self, outcome: &Result<(), UploadError>) {
        self.loading = false;

        if outcome.is_ok() {
            self.selection.clear();
            self.titles.clear();
        }
    }

    fn payload_for(&self, user: &CurrentUser) -> UploadPayload<F> {
        let mut parts = Vec::with_capacity(self.selection.len() * 2 + 1);

        for (index, file) in self.selection.iter().enumerate() {
            let title = self.titles.get(&file.name()).cloned().unwrap_or_default();
            parts.push(FormPart::File {
                field: FILES_FIELD,
                file: file.clone(),
            });
            parts.push(FormPart::Text {
                field: title_field(index),
                value: title,
            });
        }

        parts.push(FormPart::Text {
            field: USER_ID_FIELD.to_string(),
            value: user.id.to_string(),
        });

        UploadPayload { parts }
    }
}

// =============================================================================
// Form store
// =============================================================================

/// Shared, mutable home of an [`UploadForm`].
///
/// Returns `None` when the form no longer exists (the view was unmounted
/// while a request was in flight).
pub trait FormStore<F> {
    fn with_form<R>(&self, f: impl FnOnce(&mut UploadForm<F>) -> R) -> Option<R>;
}

impl<F: 'static> FormStore<F> for RwSignal<UploadForm<F>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut UploadForm<F>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl<F> FormStore<F> for Rc<RefCell<UploadForm<F>>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut UploadForm<F>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
