//! Command-line interface.

use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    api::{ApiClient, TodoInput},
    display::{format_notification, format_todo, format_todos},
    error::ClientError,
    watch::{Backoff, WatchOptions, watch, websocket_url},
};

/// Manage todos and watch live changes
#[derive(Parser, Debug)]
#[command(name = "todo-relay", version, about)]
pub struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = "TODO_RELAY_URL", default_value = "http://localhost:8080")]
    pub server: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List todos, newest first
    List {
        /// Only show todos with this status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one todo
    Get { id: i64 },
    /// Create a todo (status starts as `pending`)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: String,
    },
    /// Set a todo's status
    Update {
        id: i64,
        #[arg(long)]
        status: String,
    },
    /// Mark a todo as completed
    Complete { id: i64 },
    /// Delete a todo
    Delete { id: i64 },
    /// Print change notifications until interrupted
    Watch {
        /// Seconds between application-level pings
        #[arg(long, default_value_t = 30)]
        ping_interval_secs: u64,
        /// Consecutive failed reconnects before giving up
        #[arg(long, default_value_t = 5)]
        max_reconnect_attempts: u32,
    },
}

fn validate_due_date(raw: &str) -> Result<(), ClientError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ClientError::InvalidInput(format!("due date must be YYYY-MM-DD, got {raw}")))
}

pub async fn run_client(cli: Cli) -> Result<(), ClientError> {
    let api = ApiClient::new(cli.server.clone());

    match cli.command {
        Command::List { status } => {
            let todos = api.list(status.as_deref()).await?;
            println!("{}", format_todos(&todos));
        }
        Command::Get { id } => {
            println!("{}", format_todo(&api.get(id).await?));
        }
        Command::Create {
            title,
            description,
            due_date,
        } => {
            validate_due_date(&due_date)?;
            let todo = api
                .create(&TodoInput {
                    title,
                    description,
                    due_date,
                })
                .await?;
            println!("Created:\n{}", format_todo(&todo));
        }
        Command::Update { id, status } => {
            let todo = api.update_status(id, &status).await?;
            println!("Updated:\n{}", format_todo(&todo));
        }
        Command::Complete { id } => {
            let todo = api.update_status(id, "completed").await?;
            println!("Completed:\n{}", format_todo(&todo));
        }
        Command::Delete { id } => {
            api.delete(id).await?;
            println!("Deleted #{id}");
        }
        Command::Watch {
            ping_interval_secs,
            max_reconnect_attempts,
        } => {
            let url = websocket_url(&cli.server)?;
            let options = WatchOptions {
                ping_interval: Duration::from_secs(ping_interval_secs.max(1)),
                backoff: Backoff {
                    max_attempts: max_reconnect_attempts,
                    ..Backoff::default()
                },
            };
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            println!("Watching {url} (Ctrl-C to stop)");
            watch(&url, options, shutdown, |notification| {
                if let Some(line) = format_notification(&notification) {
                    println!("{line}");
                }
            })
            .await?;
        }
    }

    Ok(())
}
