//! Persistence port and completion orchestration for the Timebank
//! marketplace.
//!
//! The calculators in `timebank-levels` and `timebank-rewards` are pure;
//! this crate is the thin stateful shell around them. It defines the
//! narrow contract the engine needs from the document store
//! ([`ProgressionStore`]), derives streak and weekly context from
//! retained completion history, and settles completion events end to
//! end.
//!
//! # Modules
//!
//! - [`store`] -- The [`ProgressionStore`] port, record types, and the
//!   in-memory implementation.
//! - [`history`] -- Streak and weekly-window derivation.
//! - [`service`] -- The [`ProgressionService`] orchestrator.
//! - [`error`] -- [`ProgressionError`].
//!
//! # Concurrency
//!
//! The engine itself is stateless; the only coordination requirement is
//! that concurrent completion events for one user are serialized by the
//! store implementation, so counter increments are never lost.

pub mod error;
pub mod history;
pub mod service;
pub mod store;

// Re-export primary types at crate root.
pub use error::ProgressionError;
pub use history::WeekWindow;
pub use service::{CompletionOutcome, ProgressionService};
pub use store::{CompletionRecord, MemoryStore, ProgressDelta, ProgressRecord, ProgressionStore};
