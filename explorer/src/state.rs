//! Session state management
//!
//! One `SessionState` per interactive session. It is owned by the request
//! coordinator, which is its only writer; everything else sees clones via
//! [`SessionSnapshot`].

use serde::Serialize;

use shared::{QueryKind, SessionId};
use crate::core::history::HistoryLedger;
use crate::types::{HistoryEntry, NormalizedResult, Query};

/// Per-kind slot: staleness guard plus the visible result and error
#[derive(Debug, Clone, Default, Serialize)]
pub struct KindSlot {
    /// Sequence of the request whose answer is still awaited
    pub outstanding: Option<u64>,
    /// Most recently dispatched query of this kind
    pub current_query: Option<Query>,
    pub result: Option<NormalizedResult>,
    pub error: Option<String>,
}

impl KindSlot {
    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }
}

#[derive(Debug)]
pub struct SessionState {
    pub session_id: SessionId,
    last_sequence: u64,
    slots: [KindSlot; 3],
    /// One bounded ledger per kind, indexed like the slots
    histories: [HistoryLedger; 3],
}

impl SessionState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            session_id: SessionId::new(),
            last_sequence: 0,
            slots: Default::default(),
            histories: std::array::from_fn(|_| HistoryLedger::with_capacity(history_capacity)),
        }
    }

    /// Allocate the next session-wide sequence number
    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.last_sequence += 1;
        self.last_sequence
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn slot(&self, kind: QueryKind) -> &KindSlot {
        &self.slots[kind.index()]
    }

    pub(crate) fn slot_mut(&mut self, kind: QueryKind) -> &mut KindSlot {
        &mut self.slots[kind.index()]
    }

    pub fn result(&self, kind: QueryKind) -> Option<&NormalizedResult> {
        self.slot(kind).result.as_ref()
    }

    pub fn error(&self, kind: QueryKind) -> Option<&str> {
        self.slot(kind).error.as_deref()
    }

    pub fn history(&self, kind: QueryKind) -> &HistoryLedger {
        &self.histories[kind.index()]
    }

    pub(crate) fn history_mut(&mut self, kind: QueryKind) -> &mut HistoryLedger {
        &mut self.histories[kind.index()]
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            slots: self.slots.clone(),
            histories: std::array::from_fn(|index| self.histories[index].to_vec()),
        }
    }
}

/// Read-only copy of the session handed to presentation layers
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    slots: [KindSlot; 3],
    histories: [Vec<HistoryEntry>; 3],
}

impl SessionSnapshot {
    pub fn slot(&self, kind: QueryKind) -> &KindSlot {
        &self.slots[kind.index()]
    }

    pub fn result(&self, kind: QueryKind) -> Option<&NormalizedResult> {
        self.slot(kind).result.as_ref()
    }

    pub fn error(&self, kind: QueryKind) -> Option<&str> {
        self.slot(kind).error.as_deref()
    }

    pub fn is_loading(&self, kind: QueryKind) -> bool {
        self.slot(kind).is_loading()
    }

    /// Successful queries of `kind`, oldest first
    pub fn history(&self, kind: QueryKind) -> &[HistoryEntry] {
        &self.histories[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = SessionState::new(3);

        for kind in QueryKind::ALL {
            assert!(state.result(kind).is_none());
            assert!(state.error(kind).is_none());
            assert!(!state.slot(kind).is_loading());
        }
        for kind in QueryKind::ALL {
            assert!(state.history(kind).is_empty());
            assert_eq!(state.history(kind).capacity(), 3);
        }
    }

    #[test]
    fn test_sequences_increase() {
        let mut state = SessionState::new(3);
        let first = state.next_sequence();
        let second = state.next_sequence();
        assert!(second > first);
        assert_eq!(state.last_sequence(), second);
    }

    #[test]
    fn test_history_is_kept_per_kind() {
        let mut state = SessionState::new(2);
        state
            .history_mut(QueryKind::Autocorrect)
            .record(HistoryEntry::new(Query::new(QueryKind::Autocorrect, "teh", 1), 3));
        for (sequence, input) in ["t", "th", "the"].iter().enumerate() {
            state
                .history_mut(QueryKind::Autocomplete)
                .record(HistoryEntry::new(Query::new(QueryKind::Autocomplete, *input, sequence as u64 + 2), 5));
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.history(QueryKind::Autocorrect).len(), 1);
        assert_eq!(snapshot.history(QueryKind::Autocorrect)[0].query.raw_input(), "teh");
        assert_eq!(snapshot.history(QueryKind::Autocomplete).len(), 2);
        assert!(snapshot.history(QueryKind::SentenceProbability).is_empty());
    }
}
