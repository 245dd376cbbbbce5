//! File ingestion surface.
//!
//! Normalizes drag-release and explicit picking into one call of the
//! handler registered at construction. No validation happens here.

use crate::types::UploadFile;
use std::sync::Arc;

/// Callback receiving every non-empty batch of files.
pub type FileHandler = Box<dyn FnMut(Vec<UploadFile>) + Send>;

/// The drop target's "ready to receive" visual state.
pub trait DropSurface: Send + Sync {
    fn set_receiving(&self, receiving: bool);
}

/// The hidden file-picker control.
pub trait FilePicker: Send {
    fn open(&mut self);
}

pub struct UploadZone {
    surface: Arc<dyn DropSurface>,
    picker: Box<dyn FilePicker>,
    on_files: FileHandler,
    receiving: bool,
}

impl UploadZone {
    pub fn new(
        surface: Arc<dyn DropSurface>,
        picker: Box<dyn FilePicker>,
        on_files: FileHandler,
    ) -> Self {
        Self {
            surface,
            picker,
            on_files,
            receiving: false,
        }
    }

    pub fn drag_enter(&mut self) {
        self.set_receiving(true);
    }

    pub fn drag_leave(&mut self) {
        self.set_receiving(false);
    }

    pub fn drop_files(&mut self, files: Vec<UploadFile>) {
        self.set_receiving(false);
        tracing::debug!(count = files.len(), "files dropped");
        self.dispatch(files);
    }

    /// A click on the surface opens the picker.
    pub fn click(&mut self) {
        self.picker.open();
    }

    pub fn picker_changed(&mut self, files: Vec<UploadFile>) {
        tracing::debug!(count = files.len(), "files picked");
        self.dispatch(files);
    }

    pub fn is_receiving(&self) -> bool {
        self.receiving
    }

    fn set_receiving(&mut self, receiving: bool) {
        self.receiving = receiving;
        self.surface.set_receiving(receiving);
    }

    fn dispatch(&mut self, files: Vec<UploadFile>) {
        if !files.is_empty() {
            (self.on_files)(files);
        }
    }
}
