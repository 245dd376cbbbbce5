//! Model upload workflow.

use crate::api::ApiClient;
use crate::render::ModelListView;
use crate::toast::ToastNotifier;
use crate::types::{ModelRow, UploadFile};
use crate::upload_zone::FileHandler;
use std::sync::Arc;
use tokio_util::task::TaskTracker;

const UPLOAD_OK: &str = "Model uploaded successfully";
const UPLOAD_FAILED: &str = "Error uploading model";
const LOAD_FAILED: &str = "Error loading models";

/// Binds a model upload zone to the upload call and the model list.
#[derive(Clone)]
pub struct ModelManager {
    api: Arc<dyn ApiClient>,
    toast: ToastNotifier,
    view: Arc<dyn ModelListView>,
    tasks: TaskTracker,
}

impl ModelManager {
    pub fn new(api: Arc<dyn ApiClient>, toast: ToastNotifier, view: Arc<dyn ModelListView>) -> Self {
        Self {
            api,
            toast,
            view,
            tasks: TaskTracker::new(),
        }
    }

    /// Handler for the model upload zone.
    pub fn file_handler(&self) -> FileHandler {
        let this = self.clone();
        Box::new(move |files| this.ingest(files))
    }

    /// Start uploading the first file of a gesture; the rest are ignored.
    pub fn ingest(&self, files: Vec<UploadFile>) {
        let mut files = files.into_iter();
        let Some(file) = files.next() else {
            return;
        };
        let ignored = files.count();
        if ignored > 0 {
            tracing::debug!(ignored, "model upload takes one file per gesture");
        }
        let this = self.clone();
        self.tasks.spawn(async move { this.upload(file).await });
    }

    /// Upload one model and refresh the list on success.
    pub async fn upload(&self, file: UploadFile) {
        let name = file.name.clone();
        tracing::debug!(file = %name, bytes = file.len(), "uploading model");
        match self.api.upload_model(file).await {
            Ok(()) => {
                tracing::info!(file = %name, "model uploaded");
                self.toast.success(UPLOAD_OK);
                self.load_models().await;
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "model upload failed");
                self.toast.error(e.user_message(UPLOAD_FAILED));
            }
        }
    }

    /// Fetch and render the model list. On failure the current rendering stays.
    pub async fn load_models(&self) {
        match self.api.list_models().await {
            Ok(models) => {
                let rows: Vec<ModelRow> = models.iter().map(ModelRow::from).collect();
                tracing::debug!(count = rows.len(), "models loaded");
                self.view.render_models(&rows);
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading models failed");
                self.toast.error(LOAD_FAILED);
            }
        }
    }

    /// Schedule a list load without waiting for it.
    pub fn refresh(&self) {
        let this = self.clone();
        self.tasks.spawn(async move { this.load_models().await });
    }

    /// Wait until every upload and refresh started so far has completed.
    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}
