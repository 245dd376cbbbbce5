use crate::render::{NameInput, PersonSelectorView};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct SelectorState {
    options: Vec<String>,
    selected: Option<usize>,
}

/// Person choices for verification, rebuilt from every face-list load.
///
/// Written by the face registry, read by the verification workflow.
#[derive(Clone)]
pub struct PersonSelector {
    state: Arc<Mutex<SelectorState>>,
    view: Arc<dyn PersonSelectorView>,
}

impl PersonSelector {
    pub fn new(view: Arc<dyn PersonSelectorView>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SelectorState::default())),
            view,
        }
    }

    /// Replace all options. The first option becomes selected.
    pub fn set_options(&self, options: Vec<String>) {
        let mut state = self.lock();
        state.selected = if options.is_empty() { None } else { Some(0) };
        state.options = options;
        self.render(&state);
    }

    /// Select an existing option. Returns false if `name` is not offered.
    pub fn select(&self, name: &str) -> bool {
        let mut state = self.lock();
        match state.options.iter().position(|o| o == name) {
            Some(idx) => {
                state.selected = Some(idx);
                self.render(&state);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<String> {
        let state = self.lock();
        state.selected.map(|idx| state.options[idx].clone())
    }

    pub fn options(&self) -> Vec<String> {
        self.lock().options.clone()
    }

    fn render(&self, state: &SelectorState) {
        let selected = state.selected.map(|idx| state.options[idx].as_str());
        self.view.render_options(&state.options, selected);
    }

    fn lock(&self) -> MutexGuard<'_, SelectorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// In-memory name field.
#[derive(Clone, Default)]
pub struct NameField {
    value: Arc<Mutex<String>>,
}

impl NameField {
    pub fn set(&self, value: impl Into<String>) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value.into();
    }
}

impl NameInput for NameField {
    fn value(&self) -> String {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
