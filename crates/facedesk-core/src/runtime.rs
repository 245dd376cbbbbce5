//! Accelerator runtime installation and status.

use crate::api::ApiClient;
use crate::render::StatusView;
use crate::toast::ToastNotifier;
use crate::types::UploadFile;
use crate::upload_zone::FileHandler;
use std::sync::Arc;
use tokio_util::task::TaskTracker;

const INSTALL_OK: &str = "Runtime package installed successfully";
const INSTALL_FAILED: &str = "Error installing runtime package";
const STATUS_FAILED: &str = "Error loading accelerator status";

/// Binds a runtime package upload to the install call and the status view.
#[derive(Clone)]
pub struct RuntimeInstaller {
    api: Arc<dyn ApiClient>,
    toast: ToastNotifier,
    view: Arc<dyn StatusView>,
    tasks: TaskTracker,
}

impl RuntimeInstaller {
    pub fn new(api: Arc<dyn ApiClient>, toast: ToastNotifier, view: Arc<dyn StatusView>) -> Self {
        Self {
            api,
            toast,
            view,
            tasks: TaskTracker::new(),
        }
    }

    pub fn file_handler(&self) -> FileHandler {
        let this = self.clone();
        Box::new(move |files| this.ingest(files))
    }

    /// Install the first package of a gesture.
    pub fn ingest(&self, files: Vec<UploadFile>) {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        let this = self.clone();
        self.tasks.spawn(async move { this.install(file).await });
    }

    /// Upload one runtime package and refresh the status on success.
    pub async fn install(&self, file: UploadFile) {
        let name = file.name.clone();
        tracing::debug!(file = %name, bytes = file.len(), "uploading runtime package");
        match self.api.upload_runtime(file).await {
            Ok(()) => {
                tracing::info!(file = %name, "runtime package installed");
                self.toast.success(INSTALL_OK);
                self.load_status().await;
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "runtime install failed");
                self.toast.error(e.user_message(INSTALL_FAILED));
            }
        }
    }

    pub async fn load_status(&self) {
        match self.api.accelerator_status().await {
            Ok(status) => {
                tracing::debug!(installed = status.installed, "accelerator status loaded");
                self.view.render_status(&status);
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading accelerator status failed");
                self.toast.error(e.user_message(STATUS_FAILED));
            }
        }
    }

    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}
