//! Todo server with WebSocket change notifications.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin todo-relay-server -- --database data/todos.db
//! ```

use clap::Parser;
use todo_relay_server::ServerConfig;
use todo_relay_shared::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = todo_relay_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
