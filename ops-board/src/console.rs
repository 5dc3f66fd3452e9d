//! Text console
//!
//! Reads staff commands from stdin and prints the projected board.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `deliver <id>` | Mark an order delivered |
//! | `refresh` | Fetch orders now |
//! | `menu <option>` | Switch menu option (`all`, `undelivered`, `takeaway`, `reservations`) |
//! | `table <n>` / `table clear` | Select or clear the table |
//! | `show` | Print the board |
//! | `quit` | Stop the board |

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::core::Board;
use crate::orders::{ActionApplier, MarkOutcome, PollerHandle};
use crate::view::{BoardView, DetailPanel, MenuOption, UnknownMenuOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Deliver(String),
    Refresh,
    Menu(MenuOption),
    /// `None` clears the selection
    Table(Option<u32>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Menu(#[from] UnknownMenuOption),
}

/// Parse one input line; blank lines yield `Ok(None)`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "deliver" | "d" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("deliver"));
            }
            Command::Deliver(rest.to_string())
        }
        "refresh" | "r" => Command::Refresh,
        "menu" | "m" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("menu"));
            }
            Command::Menu(rest.parse()?)
        }
        "table" | "t" => match rest {
            "" => return Err(CommandError::MissingArgument("table")),
            "clear" | "none" => Command::Table(None),
            n => Command::Table(Some(
                n.parse().map_err(|_| CommandError::InvalidTable(n.to_string()))?,
            )),
        },
        "show" | "s" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub fn help_text() -> &'static str {
    "Commands: deliver <id> | refresh | menu <all|undelivered|takeaway|reservations> | table <n|clear> | show | quit"
}

/// Render the board as plain text, times in the local timezone
pub fn render(view: &BoardView) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let menu: Vec<String> = view
        .menu
        .iter()
        .map(|entry| {
            let marker = if entry.active { "*" } else { " " };
            match entry.badge {
                Some(count) => format!("{}{} ({})", marker, entry.option, count),
                None => format!("{}{}", marker, entry.option),
            }
        })
        .collect();
    writeln!(out, "{}", menu.join(" | "))?;

    if let Some(grid) = &view.table_grid {
        let tiles: Vec<String> = grid
            .iter()
            .map(|tile| {
                let label = format!("T{}:{}", tile.number, tile.status.as_str());
                if tile.selected { format!("[{}]", label) } else { label }
            })
            .collect();
        writeln!(out, "{}", tiles.join(" "))?;
    }

    match &view.detail {
        DetailPanel::Loading => {
            writeln!(out, "Loading...")?;
        }
        DetailPanel::Error(message) => {
            writeln!(out, "{}", message)?;
        }
        DetailPanel::SelectTable => {
            writeln!(out, "Select a table to view orders")?;
        }
        DetailPanel::Orders { heading, groups } => {
            writeln!(out, "{}", heading)?;
            if groups.is_empty() {
                writeln!(out, "  No orders")?;
            }
            for group in groups {
                let token = group
                    .token
                    .as_deref()
                    .map(|t| format!(" token {}", t))
                    .unwrap_or_default();
                let action = if group.can_mark_delivered { " [deliver]" } else { "" };
                writeln!(
                    out,
                    "  {} table {} {} {}{} {}{}",
                    group.order_id,
                    group.table_label,
                    group.date_label(&Local),
                    group.time_label(&Local),
                    token,
                    group.status,
                    action
                )?;
                for dish in &group.dishes {
                    writeln!(out, "      {} x{}", dish.name, dish.quantity)?;
                }
            }
        }
        DetailPanel::Reservations(records) => {
            writeln!(out, "Reservations")?;
            if records.is_empty() {
                writeln!(out, "  No reservations")?;
            }
            for r in records {
                writeln!(
                    out,
                    "  {} {} {} persons {} {}",
                    r.name, r.phone, r.persons, r.date, r.time
                )?;
            }
        }
    }

    Ok(out)
}

fn print_board(board: &Board) {
    match render(&board.view()) {
        Ok(text) => print!("{}", text),
        Err(e) => tracing::warn!(error = %e, "Failed to render board"),
    }
}

/// Run one command; returns `false` when the console should stop
pub async fn execute(
    command: Command,
    board: &Board,
    applier: &ActionApplier,
    poller: &PollerHandle,
) -> bool {
    match command {
        Command::Deliver(order_id) => match applier.mark_delivered(&order_id).await {
            Ok(MarkOutcome::Delivered) => println!("Order {} delivered", order_id),
            Ok(MarkOutcome::AlreadyDelivered) => println!("Order {} was already delivered", order_id),
            Ok(MarkOutcome::NotFound) => println!("Order {} is not on the board", order_id),
            Err(e) => println!("{}", e.user_message()),
        },
        Command::Refresh => poller.refresh(),
        Command::Menu(option) => {
            board.select_menu(option);
            print_board(board);
        }
        Command::Table(table) => match board.select_table(table) {
            Ok(()) => print_board(board),
            Err(e) => println!("{}", e.user_message()),
        },
        Command::Show => print_board(board),
        Command::Help => println!("{}", help_text()),
        Command::Quit => return false,
    }
    true
}

/// Read commands from stdin until `quit` or shutdown
///
/// Without a terminal (stdin closed) the console idles until shutdown.
pub async fn run(
    board: Arc<Board>,
    applier: ActionApplier,
    poller: PollerHandle,
    shutdown: CancellationToken,
) {
    println!("{}", help_text());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => return,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("Console input closed");
                shutdown.cancelled().await;
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read console input");
                shutdown.cancelled().await;
                return;
            }
        };

        match parse_command(&line) {
            Ok(Some(command)) => {
                if !execute(command, &board, &applier, &poller).await {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{order, reservation};

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("deliver ord-7").unwrap(),
            Some(Command::Deliver("ord-7".into()))
        );
        assert_eq!(parse_command("REFRESH").unwrap(), Some(Command::Refresh));
        assert_eq!(
            parse_command("menu tap and collect").unwrap(),
            Some(Command::Menu(MenuOption::TapAndCollect))
        );
        assert_eq!(parse_command("table 4").unwrap(), Some(Command::Table(Some(4))));
        assert_eq!(parse_command("t clear").unwrap(), Some(Command::Table(None)));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("deliver"), Err(CommandError::MissingArgument("deliver")));
        assert_eq!(
            parse_command("table four"),
            Err(CommandError::InvalidTable("four".into()))
        );
        assert!(matches!(parse_command("menu kitchen"), Err(CommandError::Menu(_))));
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
    }

    #[test]
    fn test_render_table_orders() {
        let board = Board::new(3, 8);
        board.commit_orders(vec![order("o1", 2, false, 1), order("o2", 0, false, 2)]);
        board.select_table(Some(2)).unwrap();

        let text = render(&board.view()).unwrap();
        assert!(text.contains("*All Orders (2)"));
        assert!(text.contains("[T2:pending]"));
        assert!(text.contains("T1:none"));
        assert!(text.contains("All Orders for Table 2"));
        assert!(text.contains("o1 table 2"));
        assert!(text.contains("[deliver]"));
        assert!(text.contains("Paella x2"));
        assert!(!text.contains("o2"));
    }

    #[test]
    fn test_render_loading_then_error() {
        let board = Board::new(2, 8);
        let text = render(&board.view()).unwrap();
        assert!(text.ends_with("Loading...\n"));

        let err = crate::BoardError::Fetch(board_client::ClientError::from_status(
            board_client::StatusCode::SERVICE_UNAVAILABLE,
        ));
        board.record_fetch_error(&err);
        let text = render(&board.view()).unwrap();
        assert!(text.ends_with("Error: Service Unavailable\n"));
        assert!(text.contains("T1:none T2:none"));
    }

    #[test]
    fn test_render_reservations() {
        let board = Board::new(3, 8);
        board.commit_reservations(vec![reservation("Garcia")]);
        board.select_menu(MenuOption::Reservations);

        let text = render(&board.view()).unwrap();
        assert!(text.contains("Reservations"));
        assert!(text.contains("Garcia"));
        assert!(!text.contains("T1:"));
    }

    #[tokio::test]
    async fn test_execute_table_and_quit() {
        use crate::orders::Poller;
        use crate::test_support::MemoryStore;
        use std::time::Duration;

        let board = Arc::new(Board::new(3, 8));
        let store = Arc::new(MemoryStore::default());
        let applier = ActionApplier::new(board.clone(), store.clone());
        let poller = Poller::new(board.clone(), store, Duration::from_secs(10), CancellationToken::new());
        let handle = poller.handle();

        assert!(execute(Command::Table(Some(2)), &board, &applier, &handle).await);
        assert_eq!(board.snapshot().selected_table, Some(2));

        assert!(execute(Command::Table(Some(9)), &board, &applier, &handle).await);
        assert_eq!(board.snapshot().selected_table, Some(2));

        assert!(!execute(Command::Quit, &board, &applier, &handle).await);
    }
}
