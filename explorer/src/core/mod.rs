//! Explorer core: normalization, aggregation, history and request flow

pub mod aggregator;
pub mod coordinator;
pub mod debouncer;
pub mod history;
pub mod normalizer;

pub use aggregator::{
    CandidateComparison, Estimator, Ratio, SeriesPoint, TrendPoint, VariantRow, compare_candidates,
    correction_shares, cross_variant_rows, distribution_shares, history_trend, side_by_side,
    suggestion_shares,
};
pub use coordinator::{ApplyOutcome, Completion, RequestCoordinator};
pub use debouncer::{DebouncedAction, InputDebouncer};
pub use history::HistoryLedger;
pub use normalizer::Normalizer;
