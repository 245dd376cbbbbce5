//! facedesk-core — Control layer of the face-recognition console.
//!
//! Three independent workflows (model upload, face registration, probe
//! verification) built on a shared upload zone, toast and navigation.
//! The backend is reached only through [`ApiClient`]; presentation only
//! through the view traits in [`render`].

pub mod api;
pub mod console;
pub mod faces;
pub mod models;
pub mod navigation;
pub mod render;
pub mod runtime;
pub mod selector;
pub mod toast;
pub mod types;
pub mod upload_zone;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError};
pub use console::{Console, ConsoleSettings, ConsoleViews, ZoneViews};
pub use faces::FaceRegistry;
pub use models::ModelManager;
pub use navigation::{NavigationController, Panel};
pub use runtime::RuntimeInstaller;
pub use selector::{NameField, PersonSelector};
pub use toast::{ToastKind, ToastMessage, ToastNotifier};
pub use types::{
    AcceleratorStatus, FaceRow, Model, ModelRow, Person, ResultPanel, ResultStyle, UploadFile,
    VerificationResult,
};
pub use upload_zone::UploadZone;
pub use verify::VerificationWorkflow;
