//! Probe verification workflow.

use crate::api::ApiClient;
use crate::render::ResultView;
use crate::selector::PersonSelector;
use crate::toast::ToastNotifier;
use crate::types::{ResultPanel, UploadFile, VerificationResult};
use crate::upload_zone::FileHandler;
use std::sync::{Arc, Mutex};
use tokio_util::task::TaskTracker;

const VERIFY_FAILED: &str = "Error during verification";

#[derive(Clone)]
pub struct VerificationWorkflow {
    api: Arc<dyn ApiClient>,
    toast: ToastNotifier,
    view: Arc<dyn ResultView>,
    selector: PersonSelector,
    last: Arc<Mutex<Option<VerificationResult>>>,
    tasks: TaskTracker,
}

impl VerificationWorkflow {
    pub fn new(
        api: Arc<dyn ApiClient>,
        toast: ToastNotifier,
        view: Arc<dyn ResultView>,
        selector: PersonSelector,
    ) -> Self {
        Self {
            api,
            toast,
            view,
            selector,
            last: Arc::new(Mutex::new(None)),
            tasks: TaskTracker::new(),
        }
    }

    /// Handler for the verification zone.
    pub fn file_handler(&self) -> FileHandler {
        let this = self.clone();
        Box::new(move |files| this.ingest(files))
    }

    /// Verify the first file of a gesture against the selected person.
    pub fn ingest(&self, files: Vec<UploadFile>) {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        let this = self.clone();
        self.tasks.spawn(async move { this.verify(file).await });
    }

    /// Submit `file` with the currently selected person.
    ///
    /// With nothing selected the call is still made; the backend decides.
    pub async fn verify(&self, file: UploadFile) {
        let person = self.selector.selected();
        tracing::debug!(person = ?person, file = %file.name, "verifying probe");
        match self.api.verify(person.as_deref(), file).await {
            Ok(result) => {
                tracing::info!(
                    person = ?person,
                    matched = result.matched,
                    confidence = result.confidence,
                    "verification complete"
                );
                self.view.show_result(&ResultPanel::from(&result));
                *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
            }
            Err(e) => {
                tracing::warn!(person = ?person, error = %e, "verification failed");
                self.toast.error(e.user_message(VERIFY_FAILED));
            }
        }
    }

    /// The most recently rendered result.
    pub fn last_result(&self) -> Option<VerificationResult> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}
