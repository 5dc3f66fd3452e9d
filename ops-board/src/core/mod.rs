//! Core module - board state, configuration, errors, events and tasks
//!
//! - [`Board`] - the shared board state
//! - [`Config`] - environment configuration
//! - [`BoardError`] - board errors
//! - [`BoardEvent`] - events published on every commit
//! - [`BackgroundTasks`] - task registry and shutdown

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod tasks;

pub use board::{Board, BoardState, ReconcileOutcome};
pub use config::Config;
pub use error::{BoardError, BoardResult};
pub use events::BoardEvent;
pub use tasks::{BackgroundTasks, TaskKind};
