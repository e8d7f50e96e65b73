//! CLI client for the todo-relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin todo-relay -- list
//! cargo run --bin todo-relay -- watch
//! ```

use clap::Parser;
use todo_relay_client::{Cli, run_client};
use todo_relay_shared::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &cli.log_level);

    if let Err(e) = run_client(cli).await {
        tracing::error!("Client error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
