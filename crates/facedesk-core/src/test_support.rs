//! In-memory backend and recording views shared by the unit tests.

use crate::api::{ApiClient, ApiError};
use crate::navigation::{NavigationView, Panel};
use crate::render::{FaceListView, ModelListView, PersonSelectorView, ResultView, StatusView};
use crate::toast::{ToastKind, ToastMessage, ToastView};
use crate::types::{
    AcceleratorStatus, FaceRow, Model, ModelRow, Person, ResultPanel, UploadFile,
    VerificationResult,
};
use crate::upload_zone::{DropSurface, FilePicker};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListModels,
    UploadModel(String),
    ListFaces,
    RegisterFace { person: String, file: String },
    Verify { person: Option<String>, file: String },
    AcceleratorStatus,
    UploadRuntime(String),
}

#[derive(Debug, Clone)]
pub enum Failure {
    Transport,
    Malformed,
    Reject(Option<String>),
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::Transport => ApiError::Transport("connection refused".into()),
            Failure::Malformed => ApiError::Decode("expected value at line 1 column 1".into()),
            Failure::Reject(message) => ApiError::Rejected {
                status: 400,
                message: message.clone(),
            },
        }
    }
}

#[derive(Default)]
struct FakeState {
    models: Vec<Model>,
    people: Vec<Person>,
    calls: Vec<Call>,
    upload_failure: Option<Failure>,
    list_failure: Option<Failure>,
    verify_failure: Option<Failure>,
    verify_result: Option<VerificationResult>,
    runtime_installed: bool,
}

/// Backend double: keeps models and people in memory and records every call.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_models(models: Vec<Model>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().models = models;
        api
    }

    pub fn with_people(people: Vec<Person>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().people = people;
        api
    }

    pub fn fail_uploads(&self, failure: Failure) {
        self.state.lock().unwrap().upload_failure = Some(failure);
    }

    pub fn fail_lists(&self, failure: Failure) {
        self.state.lock().unwrap().list_failure = Some(failure);
    }

    pub fn fail_verify(&self, failure: Failure) {
        self.state.lock().unwrap().verify_failure = Some(failure);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.upload_failure = None;
        state.list_failure = None;
        state.verify_failure = None;
    }

    pub fn verify_returns(&self, result: VerificationResult) {
        self.state.lock().unwrap().verify_result = Some(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        let state = self.record(Call::ListModels);
        match &state.list_failure {
            Some(f) => Err(f.to_error()),
            None => Ok(state.models.clone()),
        }
    }

    async fn upload_model(&self, file: UploadFile) -> Result<(), ApiError> {
        let mut state = self.record(Call::UploadModel(file.name.clone()));
        if let Some(f) = &state.upload_failure {
            return Err(f.to_error());
        }
        state.models.push(Model {
            name: file.name,
            size: file.data.len() as u64,
        });
        Ok(())
    }

    async fn list_faces(&self) -> Result<Vec<Person>, ApiError> {
        let state = self.record(Call::ListFaces);
        match &state.list_failure {
            Some(f) => Err(f.to_error()),
            None => Ok(state.people.clone()),
        }
    }

    async fn register_face(&self, person: &str, file: UploadFile) -> Result<(), ApiError> {
        let mut state = self.record(Call::RegisterFace {
            person: person.to_string(),
            file: file.name,
        });
        if let Some(f) = &state.upload_failure {
            return Err(f.to_error());
        }
        match state.people.iter().position(|p| p.name == person) {
            Some(idx) => state.people[idx].image_count += 1,
            None => state.people.push(Person {
                name: person.to_string(),
                image_count: 1,
            }),
        }
        Ok(())
    }

    async fn verify(
        &self,
        person: Option<&str>,
        file: UploadFile,
    ) -> Result<VerificationResult, ApiError> {
        let state = self.record(Call::Verify {
            person: person.map(str::to_string),
            file: file.name,
        });
        if let Some(f) = &state.verify_failure {
            return Err(f.to_error());
        }
        if person.map_or(true, str::is_empty) {
            return Err(ApiError::Rejected {
                status: 400,
                message: Some("Missing image or person name".into()),
            });
        }
        Ok(state.verify_result.clone().unwrap_or(VerificationResult {
            matched: false,
            confidence: 0.0,
        }))
    }

    async fn accelerator_status(&self) -> Result<AcceleratorStatus, ApiError> {
        let state = self.record(Call::AcceleratorStatus);
        if let Some(f) = &state.list_failure {
            return Err(f.to_error());
        }
        Ok(if state.runtime_installed {
            AcceleratorStatus {
                installed: true,
                message: None,
                device_present: Some(true),
                device_info: Some(serde_json::json!("Hailo-8")),
                temperature: Some(41.5),
            }
        } else {
            AcceleratorStatus {
                installed: false,
                message: Some("Hailo runtime not installed".into()),
                device_present: None,
                device_info: None,
                temperature: None,
            }
        })
    }

    async fn upload_runtime(&self, file: UploadFile) -> Result<(), ApiError> {
        let mut state = self.record(Call::UploadRuntime(file.name));
        if let Some(f) = &state.upload_failure {
            return Err(f.to_error());
        }
        state.runtime_installed = true;
        Ok(())
    }
}

#[derive(Default)]
struct Gate {
    releases: HashMap<String, Arc<Notify>>,
    in_flight: usize,
    peak: usize,
    completed: usize,
}

/// Wraps a [`FakeApi`] and holds every `register_face` call until the test
/// releases it by file name, so completions can be reordered.
pub struct GatedApi {
    inner: Arc<FakeApi>,
    gate: Mutex<Gate>,
}

impl GatedApi {
    pub fn new(inner: Arc<FakeApi>) -> Self {
        Self {
            inner,
            gate: Mutex::default(),
        }
    }

    pub fn inner(&self) -> &FakeApi {
        &self.inner
    }

    fn release_handle(&self, file: &str) -> Arc<Notify> {
        self.gate
            .lock()
            .unwrap()
            .releases
            .entry(file.to_string())
            .or_default()
            .clone()
    }

    /// Let the held call for `file` proceed. Safe to call before it arrives.
    pub fn release(&self, file: &str) {
        self.release_handle(file).notify_one();
    }

    pub fn in_flight(&self) -> usize {
        self.gate.lock().unwrap().in_flight
    }

    pub fn peak(&self) -> usize {
        self.gate.lock().unwrap().peak
    }

    pub fn completed(&self) -> usize {
        self.gate.lock().unwrap().completed
    }

    pub async fn wait_in_flight(&self, n: usize) {
        while self.in_flight() < n {
            tokio::task::yield_now().await;
        }
    }

    pub async fn wait_completed(&self, n: usize) {
        while self.completed() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ApiClient for GatedApi {
    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        self.inner.list_models().await
    }

    async fn upload_model(&self, file: UploadFile) -> Result<(), ApiError> {
        self.inner.upload_model(file).await
    }

    async fn list_faces(&self) -> Result<Vec<Person>, ApiError> {
        self.inner.list_faces().await
    }

    async fn register_face(&self, person: &str, file: UploadFile) -> Result<(), ApiError> {
        let release = self.release_handle(&file.name);
        {
            let mut gate = self.gate.lock().unwrap();
            gate.in_flight += 1;
            gate.peak = gate.peak.max(gate.in_flight);
        }
        release.notified().await;
        self.gate.lock().unwrap().in_flight -= 1;

        let result = self.inner.register_face(person, file).await;
        self.gate.lock().unwrap().completed += 1;
        result
    }

    async fn verify(
        &self,
        person: Option<&str>,
        file: UploadFile,
    ) -> Result<VerificationResult, ApiError> {
        self.inner.verify(person, file).await
    }

    async fn accelerator_status(&self) -> Result<AcceleratorStatus, ApiError> {
        self.inner.accelerator_status().await
    }

    async fn upload_runtime(&self, file: UploadFile) -> Result<(), ApiError> {
        self.inner.upload_runtime(file).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    Show(String, ToastKind),
    Hide,
}

#[derive(Default)]
pub struct RecordingToast {
    events: Mutex<Vec<ToastEvent>>,
}

impl RecordingToast {
    pub fn events(&self) -> Vec<ToastEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<(String, ToastKind)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ToastEvent::Show(text, kind) => Some((text, kind)),
                ToastEvent::Hide => None,
            })
            .collect()
    }

    pub fn hides(&self) -> usize {
        self.events().iter().filter(|e| **e == ToastEvent::Hide).count()
    }
}

impl ToastView for RecordingToast {
    fn show(&self, message: &ToastMessage) {
        self.events
            .lock()
            .unwrap()
            .push(ToastEvent::Show(message.text.clone(), message.kind));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(ToastEvent::Hide);
    }
}

#[derive(Default)]
pub struct RecordingNavigation {
    selectors: Mutex<HashMap<Panel, bool>>,
    panels: Mutex<HashMap<Panel, bool>>,
}

impl RecordingNavigation {
    pub fn active_selectors(&self) -> Vec<Panel> {
        Self::active(&self.selectors.lock().unwrap())
    }

    pub fn active_panels(&self) -> Vec<Panel> {
        Self::active(&self.panels.lock().unwrap())
    }

    fn active(map: &HashMap<Panel, bool>) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| map.get(p).copied().unwrap_or(false))
            .collect()
    }
}

impl NavigationView for RecordingNavigation {
    fn set_selector_active(&self, panel: Panel, active: bool) {
        self.selectors.lock().unwrap().insert(panel, active);
    }

    fn set_panel_active(&self, panel: Panel, active: bool) {
        self.panels.lock().unwrap().insert(panel, active);
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    states: Mutex<Vec<bool>>,
}

impl RecordingSurface {
    pub fn states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }
}

impl DropSurface for RecordingSurface {
    fn set_receiving(&self, receiving: bool) {
        self.states.lock().unwrap().push(receiving);
    }
}

#[derive(Clone, Default)]
pub struct CountingPicker {
    opened: Arc<AtomicUsize>,
}

impl CountingPicker {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl FilePicker for CountingPicker {
    fn open(&mut self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingModels {
    renders: Mutex<Vec<Vec<ModelRow>>>,
}

impl RecordingModels {
    pub fn renders(&self) -> Vec<Vec<ModelRow>> {
        self.renders.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Vec<ModelRow>> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl ModelListView for RecordingModels {
    fn render_models(&self, rows: &[ModelRow]) {
        self.renders.lock().unwrap().push(rows.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingFaces {
    renders: Mutex<Vec<Vec<FaceRow>>>,
}

impl RecordingFaces {
    pub fn renders(&self) -> Vec<Vec<FaceRow>> {
        self.renders.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Vec<FaceRow>> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl FaceListView for RecordingFaces {
    fn render_faces(&self, rows: &[FaceRow]) {
        self.renders.lock().unwrap().push(rows.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingSelector {
    renders: Mutex<Vec<(Vec<String>, Option<String>)>>,
}

impl RecordingSelector {
    pub fn last(&self) -> Option<(Vec<String>, Option<String>)> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl PersonSelectorView for RecordingSelector {
    fn render_options(&self, options: &[String], selected: Option<&str>) {
        self.renders
            .lock()
            .unwrap()
            .push((options.to_vec(), selected.map(str::to_string)));
    }
}

#[derive(Default)]
pub struct RecordingResult {
    panels: Mutex<Vec<ResultPanel>>,
}

impl RecordingResult {
    pub fn panels(&self) -> Vec<ResultPanel> {
        self.panels.lock().unwrap().clone()
    }
}

impl ResultView for RecordingResult {
    fn show_result(&self, panel: &ResultPanel) {
        self.panels.lock().unwrap().push(panel.clone());
    }
}

pub fn file(name: &str, len: usize) -> UploadFile {
    UploadFile::new(name, vec![0u8; len])
}

#[derive(Default)]
pub struct RecordingStatus {
    renders: Mutex<Vec<AcceleratorStatus>>,
}

impl RecordingStatus {
    pub fn renders(&self) -> Vec<AcceleratorStatus> {
        self.renders.lock().unwrap().clone()
    }
}

impl StatusView for RecordingStatus {
    fn render_status(&self, status: &AcceleratorStatus) {
        self.renders.lock().unwrap().push(status.clone());
    }
}
