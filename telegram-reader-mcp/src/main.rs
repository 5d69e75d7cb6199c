//! MCP Server entry point for Telegram Reader (Read-Only)
//!
//! Starts the MCP server with stdio transport over a persisted Telegram
//! session.
//!
//! # Read-Only Mode
//!
//! The server can list conversations, read messages since a date, search
//! messages and resolve the Saved Messages id. It cannot send, edit or
//! delete anything.
//!
//! # First-time setup
//!
//! The stdio transport owns stdin/stdout for the protocol, so the
//! interactive sign-in lives in a separate `login` subcommand that must be
//! run once on a terminal before serving.

mod adapters;
mod output;
mod schemas;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use adapters::GrammersConnector;
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use server::TelegramReaderMcp;
use telegram_reader_core::services::SessionManager;
use telegram_reader_core::traits::MessengerConnector;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "telegram-reader-mcp", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactively sign in to Telegram and persist the session file
    Login,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Login) => run_login().await,
        None => run_server().await,
    }
}

async fn run_login() -> ExitCode {
    match adapters::interactive_login().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Login failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_server() -> ExitCode {
    tracing::info!("Starting Telegram Reader MCP Server (read-only mode)");

    let session_path = match adapters::session_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Cannot resolve session path: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Using session file at {}", session_path.display());

    // The session manager owns the single client handle for the process;
    // credentials are read and the handshake runs on the first tool call.
    let connector: Arc<dyn MessengerConnector> = Arc::new(GrammersConnector::new(session_path));
    let sessions = Arc::new(SessionManager::new(connector));

    let mcp_server = TelegramReaderMcp::new(sessions);

    tracing::info!("MCP server initialized with 4 tools");

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
