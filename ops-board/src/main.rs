use std::sync::Arc;

use anyhow::Context;
use board_client::OrderStore;
use ops_board::core::events::log_events;
use ops_board::{ActionApplier, BackgroundTasks, Board, Poller, TaskKind, console, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, logging)
    let config = setup_environment().context("Failed to set up environment")?;

    print_banner();
    tracing::info!(
        store = %config.order_store_url,
        poll_interval_secs = config.poll_interval_secs,
        tables = config.table_count,
        "Ops Board starting..."
    );

    // 2. Order store client
    let store: Arc<dyn OrderStore> = Arc::new(
        config
            .client_config()
            .build_order_store()
            .context("Failed to build order store client")?,
    );

    // 3. Board state
    let board = Arc::new(Board::new(config.table_count, config.event_channel_capacity));
    let applier = ActionApplier::new(board.clone(), store.clone());

    // 4. Background tasks
    let mut tasks = BackgroundTasks::new();
    let shutdown = tasks.shutdown_token();

    tasks.spawn(
        "board_event_logger",
        TaskKind::Listener,
        log_events(board.subscribe(), shutdown.clone()),
    );

    let poller = Poller::new(board.clone(), store, config.poll_interval(), shutdown.clone());
    let poller_handle = poller.handle();
    tasks.spawn("order_poller", TaskKind::Periodic, poller.run());

    tasks.log_summary();

    // 5. Run until Ctrl+C or `quit`
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        }
        _ = console::run(board, applier, poller_handle, shutdown.clone()) => {
            tracing::info!("Console closed");
        }
    }

    let exited = tasks.check_health();
    if exited > 0 {
        tracing::warn!(exited, "Some background tasks stopped before shutdown");
    }

    tasks.shutdown().await;
    tracing::info!("Ops Board stopped");
    Ok(())
}
