//! Terminal implementations of the console's view traits.

use facedesk_core::navigation::NavigationView;
use facedesk_core::render::{
    FaceListView, ModelListView, PersonSelectorView, ResultView, StatusView,
};
use facedesk_core::toast::ToastView;
use facedesk_core::upload_zone::{DropSurface, FilePicker};
use facedesk_core::{
    AcceleratorStatus, FaceRow, ModelRow, Panel, ResultPanel, ResultStyle, ToastKind,
    ToastMessage,
};

pub struct TerminalToast;

impl ToastView for TerminalToast {
    fn show(&self, message: &ToastMessage) {
        let marker = match message.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        println!("[{marker}] {}", message.text);
    }

    fn hide(&self) {
        tracing::trace!("toast hidden");
    }
}

pub struct TerminalNavigation;

impl NavigationView for TerminalNavigation {
    fn set_selector_active(&self, _panel: Panel, _active: bool) {}

    fn set_panel_active(&self, panel: Panel, active: bool) {
        if active {
            println!("== {panel} ==");
        }
    }
}

pub struct TerminalModelList;

impl ModelListView for TerminalModelList {
    fn render_models(&self, rows: &[ModelRow]) {
        println!("Models ({})", rows.len());
        for row in rows {
            println!("  {:<40} {:>12}", row.name, row.size);
        }
    }
}

pub struct TerminalFaceList;

impl FaceListView for TerminalFaceList {
    fn render_faces(&self, rows: &[FaceRow]) {
        println!("People ({})", rows.len());
        for row in rows {
            println!("  {:<40} {:>12}", row.name, row.images);
        }
    }
}

/// Prints the verification choices only when `echo` is set; one-shot
/// commands keep it quiet.
pub struct TerminalSelector {
    pub echo: bool,
}

impl PersonSelectorView for TerminalSelector {
    fn render_options(&self, options: &[String], selected: Option<&str>) {
        tracing::debug!(?options, ?selected, "person selector rebuilt");
        if !self.echo {
            return;
        }
        if options.is_empty() {
            println!("Verify against: (nobody registered)");
            return;
        }
        let listed: Vec<String> = options
            .iter()
            .map(|o| {
                if Some(o.as_str()) == selected {
                    format!("*{o}*")
                } else {
                    o.clone()
                }
            })
            .collect();
        println!("Verify against: {}", listed.join(", "));
    }
}

pub struct TerminalResult;

impl ResultView for TerminalResult {
    fn show_result(&self, panel: &ResultPanel) {
        let marker = match panel.style {
            ResultStyle::Success => "+",
            ResultStyle::Error => "-",
        };
        println!("{marker} {}", panel.headline);
        println!("  {}", panel.detail);
    }
}

/// Accelerator status, either as a short report or the raw JSON payload.
pub struct TerminalStatus {
    pub json: bool,
}

impl StatusView for TerminalStatus {
    fn render_status(&self, status: &AcceleratorStatus) {
        if self.json {
            match serde_json::to_string_pretty(status) {
                Ok(text) => println!("{text}"),
                Err(e) => tracing::warn!(error = %e, "cannot encode accelerator status"),
            }
            return;
        }
        println!("Runtime installed: {}", if status.installed { "yes" } else { "no" });
        if let Some(message) = &status.message {
            println!("  {message}");
        }
        if let Some(present) = status.device_present {
            println!("Device present:    {}", if present { "yes" } else { "no" });
        }
        if let Some(info) = &status.device_info {
            match info.as_str() {
                Some(text) => println!("Device info:       {text}"),
                None => println!("Device info:       {info}"),
            }
        }
        if let Some(temperature) = status.temperature {
            println!("Temperature:       {temperature:.1} °C");
        }
    }
}

pub struct TerminalSurface {
    pub panel: Panel,
}

impl DropSurface for TerminalSurface {
    fn set_receiving(&self, receiving: bool) {
        if receiving {
            println!("[{}] ready to receive files", self.panel);
        } else {
            tracing::debug!(panel = %self.panel, "drop surface idle");
        }
    }
}

/// Stands in for a native file dialog: tells the operator how to pick.
pub struct PromptPicker {
    pub panel: Panel,
}

impl FilePicker for PromptPicker {
    fn open(&mut self) {
        println!("[{}] choose files with: pick <FILE>...", self.panel);
    }
}
