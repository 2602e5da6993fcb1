//! Language-model explorer client
//!
//! Sends autocomplete, autocorrect and sentence-probability queries to an
//! n-gram scoring service, keeps only the freshest answer per query kind,
//! and derives the comparison views used to inspect smoothing behaviour.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod explorer_impl;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::ExplorerConfig;
pub use error::{ExplorerError, ExplorerResult};
pub use explorer_impl::{Explorer, ExplorerHandle, UserEvent};
pub use state::{KindSlot, SessionSnapshot, SessionState};
pub use traits::*;
pub use types::*;
