//! Rendering ports.
//!
//! Each workflow receives the narrow view it writes to. Implementations
//! replace whatever they showed before; the last completed call wins.

use crate::types::{AcceleratorStatus, FaceRow, ModelRow, ResultPanel};

pub trait ModelListView: Send + Sync {
    fn render_models(&self, rows: &[ModelRow]);
}

pub trait FaceListView: Send + Sync {
    fn render_faces(&self, rows: &[FaceRow]);
}

/// Options of the verification person selector.
pub trait PersonSelectorView: Send + Sync {
    fn render_options(&self, options: &[String], selected: Option<&str>);
}

/// Result container of the verification panel. Showing a result also
/// makes the container visible.
pub trait ResultView: Send + Sync {
    fn show_result(&self, panel: &ResultPanel);
}

pub trait StatusView: Send + Sync {
    fn render_status(&self, status: &AcceleratorStatus);
}

/// Text field holding the person name used for registration.
pub trait NameInput: Send + Sync {
    fn value(&self) -> String;
}
