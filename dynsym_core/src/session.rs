//! Per-session pattern state and the host subscription list.

use tracing::info;

use crate::host::Disposable;

/// The current pattern list plus the host's subscription list.
///
/// `baseline` is the number of subscriptions handed in at construction
/// (command handlers and the like). Only the single entry above it, the live
/// provider registration, is ever disposed by the controller.
pub struct SessionState {
    baseline: usize,
    current: Vec<String>,
    subscriptions: Vec<Box<dyn Disposable>>,
}

impl SessionState {
    #[must_use]
    pub fn new(subscriptions: Vec<Box<dyn Disposable>>) -> Self {
        Self {
            baseline: subscriptions.len(),
            current: Vec::new(),
            subscriptions,
        }
    }

    #[must_use]
    pub const fn baseline(&self) -> usize {
        self.baseline
    }

    #[must_use]
    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut Vec<String> {
        &mut self.current
    }

    pub(crate) fn replace_current(&mut self, patterns: Vec<String>) {
        self.current = patterns;
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn has_live_registration(&self) -> bool {
        self.subscriptions.len() > self.baseline
    }

    /// Dispose and drop the live registration, if any.
    pub(crate) fn dispose_live(&mut self) {
        if !self.has_live_registration() {
            return;
        }
        if let Some(mut live) = self.subscriptions.pop() {
            live.dispose();
            info!("Disposed live symbol provider");
        }
    }

    pub(crate) fn install(&mut self, registration: Box<dyn Disposable>) {
        debug_assert!(!self.has_live_registration());
        self.subscriptions.push(registration);
    }

    /// Dispose every subscription, newest first.
    pub fn shutdown(mut self) {
        while let Some(mut subscription) = self.subscriptions.pop() {
            subscription.dispose();
        }
        self.current.clear();
        info!("Session shut down");
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("baseline", &self.baseline)
            .field("current", &self.current)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
