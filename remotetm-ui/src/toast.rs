//! Transient notices.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tmdom::{NodeId, Surface, element};

use crate::widgets::lock;

/// How long a message stays up unless told otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Displays short messages to the user.
pub trait Messenger: Send + Sync {
    fn show(&self, message: &str);
}

/// One message and its display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::new(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::new(message)
    }
}

struct ActiveToast {
    node: NodeId,
    toast: Toast,
    created_at: Instant,
}

/// Renders each message as a `div.message` appended to the body.
///
/// Expired toasts are removed by [`ToastMessenger::prune`], which the host
/// calls from its frame or timer loop.
pub struct ToastMessenger {
    surface: Arc<dyn Surface>,
    active: Mutex<Vec<ActiveToast>>,
    duration: Duration,
}

impl ToastMessenger {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            surface,
            active: Mutex::new(Vec::new()),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Duration applied to messages passed through [`Messenger::show`].
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn push(&self, toast: impl Into<Toast>) {
        self.push_at(toast.into(), Instant::now());
    }

    fn push_at(&self, toast: Toast, created_at: Instant) {
        let surface = self.surface.as_ref();
        let node = element(surface, "div", &["message"]);
        surface.set_text(node, &toast.message);
        if let Err(e) = surface.append_child(surface.body(), node) {
            log::warn!("Could not show message {:?}: {e}", toast.message);
            surface.dispose(node);
            return;
        }
        log::debug!("Message: {}", toast.message);
        lock(&self.active).push(ActiveToast {
            node,
            toast,
            created_at,
        });
    }

    /// Remove toasts whose duration has elapsed at `now`. Returns how many
    /// were removed.
    pub fn prune(&self, now: Instant) -> usize {
        let mut active = lock(&self.active);
        let before = active.len();
        active.retain(|t| {
            let expired = now.saturating_duration_since(t.created_at) >= t.toast.duration;
            if expired {
                self.surface.dispose(t.node);
            }
            !expired
        });
        before - active.len()
    }

    /// Messages currently displayed, oldest first.
    pub fn active(&self) -> Vec<String> {
        lock(&self.active)
            .iter()
            .map(|t| t.toast.message.clone())
            .collect()
    }
}

impl Messenger for ToastMessenger {
    fn show(&self, message: &str) {
        self.push(Toast::new(message).with_duration(self.duration));
    }
}
