//! Transient status messages.
//!
//! One message is visible at a time. A new message replaces the current
//! one and restarts the dismissal clock: every `notify` bumps a
//! generation counter, and a dismissal timer only hides the toast when
//! its generation is still the current one.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Default auto-dismiss delay.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
}

/// Presentation of the single toast container.
pub trait ToastView: Send + Sync {
    fn show(&self, message: &ToastMessage);
    fn hide(&self);
}

/// Point-in-time copy of the toast state.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSnapshot {
    pub message: Option<ToastMessage>,
    pub visible: bool,
    pub expires_at: Option<Instant>,
}

#[derive(Default)]
struct ToastState {
    message: Option<ToastMessage>,
    visible: bool,
    expires_at: Option<Instant>,
    generation: u64,
}

/// Clone-safe handle to the toast.
#[derive(Clone)]
pub struct ToastNotifier {
    state: Arc<Mutex<ToastState>>,
    view: Arc<dyn ToastView>,
    ttl: Duration,
}

impl ToastNotifier {
    pub fn new(view: Arc<dyn ToastView>, ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            view,
            ttl,
        }
    }

    /// Display `text` immediately and schedule its dismissal.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn notify(&self, text: impl Into<String>, kind: ToastKind) {
        let message = ToastMessage {
            text: text.into(),
            kind,
        };
        tracing::debug!(kind = kind.as_str(), text = %message.text, "toast");

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.visible = true;
            state.expires_at = Some(Instant::now() + self.ttl);
            self.view.show(&message);
            state.message = Some(message);
            state.generation
        };

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.ttl).await;
            this.dismiss(generation);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(text, ToastKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, ToastKind::Error);
    }

    pub fn snapshot(&self) -> ToastSnapshot {
        let state = self.lock();
        ToastSnapshot {
            message: state.message.clone(),
            visible: state.visible,
            expires_at: state.expires_at,
        }
    }

    /// The most recent message, visible or not.
    pub fn last_message(&self) -> Option<ToastMessage> {
        self.lock().message.clone()
    }

    fn dismiss(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::trace!(generation, current = state.generation, "stale toast timer ignored");
            return;
        }
        state.visible = false;
        state.expires_at = None;
        self.view.hide();
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        // The state stays consistent even if a view panicked mid-update.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
