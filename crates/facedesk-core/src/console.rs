//! Wiring of the three workflows, their upload zones and the navigation.

use crate::api::ApiClient;
use crate::faces::FaceRegistry;
use crate::models::ModelManager;
use crate::navigation::{NavigationController, NavigationView, Panel};
use crate::render::{FaceListView, ModelListView, PersonSelectorView, ResultView};
use crate::selector::{NameField, PersonSelector};
use crate::toast::{ToastNotifier, ToastView, DEFAULT_TOAST_TTL};
use crate::upload_zone::{DropSurface, FilePicker, UploadZone};
use crate::verify::VerificationWorkflow;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub toast_ttl: Duration,
    /// Panel marked active at load time.
    pub initial_panel: Panel,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            toast_ttl: DEFAULT_TOAST_TTL,
            initial_panel: Panel::Models,
        }
    }
}

/// Drop surface and picker of one panel.
pub struct ZoneViews {
    pub surface: Arc<dyn DropSurface>,
    pub picker: Box<dyn FilePicker>,
}

/// Every presentation element the console writes to.
pub struct ConsoleViews {
    pub toast: Arc<dyn ToastView>,
    pub navigation: Arc<dyn NavigationView>,
    pub models: Arc<dyn ModelListView>,
    pub faces: Arc<dyn FaceListView>,
    pub selector: Arc<dyn PersonSelectorView>,
    pub result: Arc<dyn ResultView>,
    pub model_zone: ZoneViews,
    pub face_zone: ZoneViews,
    pub verify_zone: ZoneViews,
}

pub struct Console {
    navigation: NavigationController,
    toast: ToastNotifier,
    models: ModelManager,
    faces: FaceRegistry,
    verification: VerificationWorkflow,
    selector: PersonSelector,
    name: NameField,
    model_zone: UploadZone,
    face_zone: UploadZone,
    verify_zone: UploadZone,
}

impl Console {
    /// Build the console and schedule the initial model and face loads.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(api: Arc<dyn ApiClient>, views: ConsoleViews, settings: ConsoleSettings) -> Self {
        let toast = ToastNotifier::new(views.toast, settings.toast_ttl);
        let selector = PersonSelector::new(views.selector);
        let name = NameField::default();

        let models = ModelManager::new(api.clone(), toast.clone(), views.models);
        let faces = FaceRegistry::new(
            api.clone(),
            toast.clone(),
            views.faces,
            selector.clone(),
            Arc::new(name.clone()),
        );
        let verification =
            VerificationWorkflow::new(api, toast.clone(), views.result, selector.clone());

        let model_zone = UploadZone::new(
            views.model_zone.surface,
            views.model_zone.picker,
            models.file_handler(),
        );
        let face_zone = UploadZone::new(
            views.face_zone.surface,
            views.face_zone.picker,
            faces.file_handler(),
        );
        let verify_zone = UploadZone::new(
            views.verify_zone.surface,
            views.verify_zone.picker,
            verification.file_handler(),
        );

        let navigation = NavigationController::new(settings.initial_panel, views.navigation);

        tracing::info!(panel = %settings.initial_panel, "console started");
        models.refresh();
        faces.refresh();

        Self {
            navigation,
            toast,
            models,
            faces,
            verification,
            selector,
            name,
            model_zone,
            face_zone,
            verify_zone,
        }
    }

    pub fn navigate(&mut self, panel: Panel) {
        self.navigation.select(panel);
    }

    pub fn active_panel(&self) -> Panel {
        self.navigation.active()
    }

    /// Upload zone belonging to `panel`.
    pub fn zone_mut(&mut self, panel: Panel) -> &mut UploadZone {
        match panel {
            Panel::Models => &mut self.model_zone,
            Panel::Faces => &mut self.face_zone,
            Panel::Verify => &mut self.verify_zone,
        }
    }

    pub fn name_field(&self) -> &NameField {
        &self.name
    }

    pub fn selector(&self) -> &PersonSelector {
        &self.selector
    }

    pub fn toast(&self) -> &ToastNotifier {
        &self.toast
    }

    pub fn models(&self) -> &ModelManager {
        &self.models
    }

    pub fn faces(&self) -> &FaceRegistry {
        &self.faces
    }

    pub fn verification(&self) -> &VerificationWorkflow {
        &self.verification
    }

    /// Wait for every in-flight call of every workflow.
    pub async fn settle(&self) {
        tokio::join!(
            self.models.settle(),
            self.faces.settle(),
            self.verification.settle()
        );
    }
}
