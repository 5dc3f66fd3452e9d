//! Ops Board - live operations board for a restaurant
//!
//! Polls the order store, reconciles each snapshot into the board state and
//! projects what the staff sees: per-table status, filtered order lists,
//! tap-and-collect orders and reservations.
//!
//! # Module structure
//!
//! ```text
//! ops-board/src/
//! ├── core/          # board state, config, errors, events, tasks
//! ├── orders/        # reconciler, poller, action applier, counters
//! ├── reservations/  # reservation store
//! ├── view/          # menu options and view projection
//! ├── console.rs     # stdin commands and text rendering
//! └── utils/         # logger
//! ```

pub mod console;
pub mod core;
pub mod orders;
pub mod reservations;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_support;

pub use core::{BackgroundTasks, Board, BoardError, BoardEvent, BoardResult, BoardState, Config, TaskKind};
pub use orders::{ActionApplier, Counters, MarkOutcome, Poller, PollerHandle};
pub use reservations::ReservationStore;
pub use view::{BoardView, MenuOption};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read and validate the configuration, start logging
pub fn setup_environment() -> BoardResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ____                   ____                      __
  / __ \____  _____      / __ )____  ____ __________/ /
 / / / / __ \/ ___/_____/ __  / __ \/ __ `/ ___/ __  /
/ /_/ / /_/ (__  )_____/ /_/ / /_/ / /_/ / /  / /_/ /
\____/ .___/____/     /_____/\____/\__,_/_/   \__,_/
    /_/
    "#
    );
}
