use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One of the mutually exclusive console views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Models,
    Faces,
    Verify,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Models, Panel::Faces, Panel::Verify];

    /// Identifier carried by the panel's navigation selector.
    pub fn id(&self) -> &'static str {
        match self {
            Panel::Models => "models",
            Panel::Faces => "faces",
            Panel::Verify => "verify",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel: {0} (expected models, faces or verify)")]
pub struct UnknownPanel(pub String);

impl FromStr for Panel {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPanel(s.to_string()))
    }
}

/// Presentation of the navigation selectors and panel containers.
pub trait NavigationView: Send + Sync {
    fn set_selector_active(&self, panel: Panel, active: bool);
    fn set_panel_active(&self, panel: Panel, active: bool);
}

/// Exclusive-selection switch between panels.
pub struct NavigationController {
    active: Panel,
    view: Arc<dyn NavigationView>,
}

impl NavigationController {
    /// Start with `initial` active and render that state.
    pub fn new(initial: Panel, view: Arc<dyn NavigationView>) -> Self {
        let mut nav = Self {
            active: initial,
            view,
        };
        nav.apply(initial);
        nav
    }

    /// Deactivate every panel and selector, then activate `panel`'s pair.
    pub fn select(&mut self, panel: Panel) {
        tracing::debug!(from = %self.active, to = %panel, "navigate");
        self.apply(panel);
    }

    pub fn active(&self) -> Panel {
        self.active
    }

    fn apply(&mut self, panel: Panel) {
        for p in Panel::ALL {
            self.view.set_selector_active(p, false);
            self.view.set_panel_active(p, false);
        }
        self.view.set_selector_active(panel, true);
        self.view.set_panel_active(panel, true);
        self.active = panel;
    }
}
