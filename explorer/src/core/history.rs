//! Bounded history of completed queries
//!
//! The session keeps one ledger per query kind, so busy autocomplete typing
//! never evicts corrections or sentence lookups.

use std::collections::VecDeque;

use crate::types::HistoryEntry;

/// FIFO of successful queries, oldest evicted first once over capacity
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    /// A capacity of zero is raised to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `entry`, evicting the oldest entry if capacity is exceeded
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries in insertion order, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::QueryKind;
    use crate::types::Query;

    fn entry(kind: QueryKind, input: &str, sequence: u64) -> HistoryEntry {
        HistoryEntry::new(Query::new(kind, input, sequence), input.len())
    }

    fn inputs(ledger: &HistoryLedger) -> Vec<String> {
        ledger.entries().map(|e| e.query.raw_input().to_string()).collect()
    }

    #[test]
    fn test_evicts_oldest_over_capacity() {
        let mut ledger = HistoryLedger::with_capacity(3);

        for (seq, input) in ["a", "b", "c", "d"].iter().enumerate() {
            ledger.record(entry(QueryKind::Autocomplete, input, seq as u64 + 1));
        }

        assert_eq!(ledger.len(), 3);
        assert_eq!(inputs(&ledger), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut ledger = HistoryLedger::with_capacity(5);

        for seq in 0..50u64 {
            ledger.record(entry(QueryKind::Autocorrect, &format!("w{seq}"), seq));
            assert!(ledger.len() <= ledger.capacity());
        }

        assert_eq!(inputs(&ledger), vec!["w45", "w46", "w47", "w48", "w49"]);
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut ledger = HistoryLedger::with_capacity(0);
        ledger.record(entry(QueryKind::Autocorrect, "x", 1));
        ledger.record(entry(QueryKind::Autocorrect, "y", 2));

        assert_eq!(ledger.capacity(), 1);
        assert_eq!(inputs(&ledger), vec!["y"]);
    }
}
