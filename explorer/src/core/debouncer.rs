//! Quiet-interval debouncing of free-typing input
//!
//! Each keystroke cancels the pending timer and starts a new one; only input
//! that stays unchanged for the whole quiet interval turns into a dispatch.
//! Blank input never waits: it is turned into a clear straight away.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use shared::QueryKind;

/// What a debouncer asks the event loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebouncedAction {
    Dispatch { kind: QueryKind, text: String },
    Clear { kind: QueryKind },
}

impl DebouncedAction {
    pub fn kind(&self) -> QueryKind {
        match self {
            DebouncedAction::Dispatch { kind, .. } | DebouncedAction::Clear { kind } => *kind,
        }
    }
}

/// Debouncer for a single input stream
pub struct InputDebouncer {
    kind: QueryKind,
    quiet_interval: Duration,
    actions: mpsc::UnboundedSender<DebouncedAction>,
    pending: Option<JoinHandle<()>>,
}

impl InputDebouncer {
    pub fn new(
        kind: QueryKind,
        quiet_interval: Duration,
        actions: mpsc::UnboundedSender<DebouncedAction>,
    ) -> Self {
        Self {
            kind,
            quiet_interval,
            actions,
            pending: None,
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// Restart the quiet interval for `text`
    pub fn input_changed(&mut self, text: &str) {
        self.cancel();

        if text.trim().is_empty() {
            self.emit(DebouncedAction::Clear { kind: self.kind });
            return;
        }

        let action = DebouncedAction::Dispatch {
            kind: self.kind,
            text: text.to_string(),
        };
        let actions = self.actions.clone();
        let quiet_interval = self.quiet_interval;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_interval).await;
            let _ = actions.send(action);
        }));
    }

    /// Explicit submit: skip the quiet interval and drop anything pending
    pub fn submit(&mut self, text: &str) {
        self.cancel();

        if text.trim().is_empty() {
            self.emit(DebouncedAction::Clear { kind: self.kind });
        } else {
            self.emit(DebouncedAction::Dispatch {
                kind: self.kind,
                text: text.to_string(),
            });
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn emit(&self, action: DebouncedAction) {
        if self.actions.send(action).is_err() {
            tracing::debug!("{} debouncer has no listener", self.kind);
        }
    }
}

impl Drop for InputDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
