//! Order reconciliation engine
//!
//! # Modules
//!
//! - [`reconciler`] - pure snapshot reconciliation and notification decision
//! - [`applier`] - mark-delivered with optimistic local patch
//! - [`poller`] - periodic and on-demand fetching
//! - [`counters`] - badge counters derived from the order list

pub mod applier;
pub mod counters;
pub mod poller;
pub mod reconciler;

pub use applier::{ActionApplier, MarkOutcome};
pub use counters::Counters;
pub use poller::{Poller, PollerHandle};
pub use reconciler::{reconcile, Reconciliation};
