//! Explorer event loop with dependency injection
//!
//! One task owns the request coordinator and the three input debouncers.
//! User events, debounced actions and transport completions are all
//! serialized through it, so session state has exactly one writer. Callers
//! talk to it through an [`ExplorerHandle`] and observe state through
//! published [`SessionSnapshot`]s.

use tokio::sync::{mpsc, watch};

use shared::{QueryKind, SessionId};
use shared::{session_debug, session_info};
use crate::config::ExplorerConfig;
use crate::core::{ApplyOutcome, DebouncedAction, InputDebouncer, RequestCoordinator};
use crate::error::{ExplorerError, ExplorerResult};
use crate::state::SessionSnapshot;
use crate::traits::ScoringService;

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Free typing; debounced before dispatch
    Input { kind: QueryKind, text: String },
    /// Explicit submit; dispatched at once
    Submit { kind: QueryKind, text: String },
    Clear { kind: QueryKind },
    Shutdown,
}

/// Cloneable front door to a running [`Explorer`]
#[derive(Debug, Clone)]
pub struct ExplorerHandle {
    session_id: SessionId,
    events: mpsc::UnboundedSender<UserEvent>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl ExplorerHandle {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn input(&self, kind: QueryKind, text: impl Into<String>) -> ExplorerResult<()> {
        self.send(UserEvent::Input { kind, text: text.into() })
    }

    pub fn submit(&self, kind: QueryKind, text: impl Into<String>) -> ExplorerResult<()> {
        self.send(UserEvent::Submit { kind, text: text.into() })
    }

    pub fn clear(&self, kind: QueryKind) -> ExplorerResult<()> {
        self.send(UserEvent::Clear { kind })
    }

    pub fn shutdown(&self) -> ExplorerResult<()> {
        self.send(UserEvent::Shutdown)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Independent receiver for snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    fn send(&self, event: UserEvent) -> ExplorerResult<()> {
        self.events
            .send(event)
            .map_err(|_| ExplorerError::transport("explorer event loop has stopped"))
    }
}

/// The explorer session: coordinator, debouncers and the loop that drives them
pub struct Explorer<S>
where
    S: ScoringService + 'static,
{
    coordinator: RequestCoordinator<S>,
    debouncers: Vec<InputDebouncer>,
    events: mpsc::UnboundedReceiver<UserEvent>,
    actions: mpsc::UnboundedReceiver<DebouncedAction>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl<S> Explorer<S>
where
    S: ScoringService + 'static,
{
    /// Create a new explorer and the handle used to drive it
    pub fn new(service: S, config: &ExplorerConfig) -> (Self, ExplorerHandle) {
        let coordinator = RequestCoordinator::new(service, config);
        let session_id = coordinator.session_id().clone();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(coordinator.snapshot());

        let debouncers = QueryKind::ALL
            .iter()
            .map(|kind| InputDebouncer::new(*kind, config.debounce, actions_tx.clone()))
            .collect();

        let explorer = Self {
            coordinator,
            debouncers,
            events: events_rx,
            actions: actions_rx,
            snapshots: snapshots_tx,
        };
        let handle = ExplorerHandle {
            session_id,
            events: events_tx,
            snapshots: snapshots_rx,
        };

        (explorer, handle)
    }

    /// Run until shutdown is requested or every handle is dropped
    pub async fn run(mut self) -> ExplorerResult<()> {
        let session_id = self.coordinator.session_id().clone();
        session_info!(session_id, "Explorer session started");

        loop {
            // Debounced actions were queued before any event still waiting,
            // so they are drained first to keep user order
            tokio::select! {
                biased;

                Some(action) = self.actions.recv() => {
                    self.handle_action(action);
                }
                Some(completion) = self.coordinator.next_completion() => {
                    let outcome = self.coordinator.apply(completion);
                    if outcome != ApplyOutcome::Stale {
                        self.publish();
                    }
                }
                event = self.events.recv() => {
                    match event {
                        Some(UserEvent::Shutdown) | None => break,
                        Some(event) => self.handle_event(event),
                    }
                }
            }
        }

        for debouncer in &mut self.debouncers {
            debouncer.cancel();
        }
        session_info!(session_id, "Explorer session stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::Input { kind, text } => self.debouncer(kind).input_changed(&text),
            UserEvent::Submit { kind, text } => self.debouncer(kind).submit(&text),
            UserEvent::Clear { kind } => {
                self.debouncer(kind).cancel();
                self.coordinator.clear(kind);
                self.publish();
            }
            UserEvent::Shutdown => {}
        }
    }

    fn handle_action(&mut self, action: DebouncedAction) {
        match action {
            DebouncedAction::Dispatch { kind, text } => {
                self.coordinator.dispatch(kind, text);
            }
            DebouncedAction::Clear { kind } => self.coordinator.clear(kind),
        }
        self.publish();
    }

    fn debouncer(&mut self, kind: QueryKind) -> &mut InputDebouncer {
        &mut self.debouncers[kind.index()]
    }

    fn publish(&self) {
        let snapshot = self.coordinator.snapshot();
        if self.snapshots.send(snapshot).is_err() {
            session_debug!(self.coordinator.session_id(), "No snapshot subscribers left");
        }
    }
}
