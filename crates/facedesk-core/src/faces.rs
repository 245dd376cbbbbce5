//! Face registration workflow.
//!
//! Every file of a gesture becomes its own registration call for the
//! person named in the name field. Calls run concurrently; each one
//! reports its own outcome and refreshes the face list on success, so
//! whichever completes last determines what is rendered.

use crate::api::ApiClient;
use crate::render::{FaceListView, NameInput};
use crate::selector::PersonSelector;
use crate::toast::ToastNotifier;
use crate::types::{FaceRow, UploadFile};
use crate::upload_zone::FileHandler;
use std::sync::Arc;
use tokio_util::task::TaskTracker;

const NAME_REQUIRED: &str = "Please enter a person name";
const UPLOAD_OK: &str = "Face added successfully";
const UPLOAD_FAILED: &str = "Error uploading face";
const LOAD_FAILED: &str = "Error loading faces";

#[derive(Clone)]
pub struct FaceRegistry {
    api: Arc<dyn ApiClient>,
    toast: ToastNotifier,
    view: Arc<dyn FaceListView>,
    selector: PersonSelector,
    name: Arc<dyn NameInput>,
    tasks: TaskTracker,
}

impl FaceRegistry {
    pub fn new(
        api: Arc<dyn ApiClient>,
        toast: ToastNotifier,
        view: Arc<dyn FaceListView>,
        selector: PersonSelector,
        name: Arc<dyn NameInput>,
    ) -> Self {
        Self {
            api,
            toast,
            view,
            selector,
            name,
            tasks: TaskTracker::new(),
        }
    }

    /// Handler for the face registration zone.
    pub fn file_handler(&self) -> FileHandler {
        let this = self.clone();
        Box::new(move |files| this.ingest(files))
    }

    /// Check the name field once, then start one registration per file.
    pub fn ingest(&self, files: Vec<UploadFile>) {
        let person = self.name.value().trim().to_string();
        if person.is_empty() {
            tracing::debug!(files = files.len(), "registration refused: empty person name");
            self.toast.error(NAME_REQUIRED);
            return;
        }
        tracing::debug!(person = %person, files = files.len(), "registering faces");
        for file in files {
            let this = self.clone();
            let person = person.clone();
            self.tasks
                .spawn(async move { this.upload(file, &person).await });
        }
    }

    /// Register one image for `person` and refresh both views on success.
    pub async fn upload(&self, file: UploadFile, person: &str) {
        let name = file.name.clone();
        match self.api.register_face(person, file).await {
            Ok(()) => {
                tracing::info!(person, file = %name, "face registered");
                self.toast.success(UPLOAD_OK);
                self.load_faces().await;
            }
            Err(e) => {
                tracing::warn!(person, file = %name, error = %e, "face registration failed");
                self.toast.error(e.user_message(UPLOAD_FAILED));
            }
        }
    }

    /// Fetch people, render the face list and rebuild the person selector
    /// from the same payload.
    pub async fn load_faces(&self) {
        match self.api.list_faces().await {
            Ok(people) => {
                let rows: Vec<FaceRow> = people.iter().map(FaceRow::from).collect();
                tracing::debug!(count = rows.len(), "faces loaded");
                self.view.render_faces(&rows);
                self.selector
                    .set_options(people.into_iter().map(|p| p.name).collect());
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading faces failed");
                self.toast.error(LOAD_FAILED);
            }
        }
    }

    /// Schedule a list load without waiting for it.
    pub fn refresh(&self) {
        let this = self.clone();
        self.tasks.spawn(async move { this.load_faces().await });
    }

    /// Wait until every registration and refresh started so far has completed.
    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}
