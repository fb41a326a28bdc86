//! Daybook application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Initialise tracing
//! 3. Build the trigger table and the capability set
//! 4. Run the chosen front end: HTTP server, single message, or stdin REPL

mod cli;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use daybook_action::{ConversationalResponder, InMemoryStore, LlmResponder, OfflineResponder};
use daybook_api::{routes, AppState};
use daybook_chat::{Capabilities, CommandRouter, TriggerTable};
use daybook_core::config::LlmConfig;
use daybook_core::{DaybookConfig, DaybookError};

use cli::{CliArgs, Command};

/// Pick the conversational responder: the LLM when enabled and keyed,
/// otherwise the offline reply.
fn build_responder(config: &LlmConfig) -> Arc<dyn ConversationalResponder> {
    if !config.enabled {
        tracing::info!("LLM responder disabled; using offline replies");
        return Arc::new(OfflineResponder);
    }
    match LlmResponder::from_env(config) {
        Ok(responder) => {
            tracing::info!(model = %config.model, "LLM responder ready");
            Arc::new(responder)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM responder unavailable; using offline replies");
            Arc::new(OfflineResponder)
        }
    }
}

/// Route stdin lines until EOF, `exit` or `quit`.
async fn run_repl(router: &CommandRouter) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        writeln!(stdout, "{}\n", router.handle(line).await)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can seed the filter;
    // the load outcome is logged once the subscriber is installed.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = DaybookConfig::load_with_fallback(&config_file);

    // Logs go to stderr so `ask` and `repl` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(
                args.resolve_log_filter(&config.general.log_level),
            )
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Daybook v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(DaybookError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %config_file.display(), "No config file; using defaults")
        }
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config; using defaults"
        ),
    }

    let table = TriggerTable::from_config(&config.chat)?;
    tracing::info!(triggers = table.len(), "Trigger table ready");

    let store = Arc::new(InMemoryStore::new());
    let caps = Capabilities {
        responder: build_responder(&config.llm),
        ..Capabilities::offline(store)
    };
    let router = CommandRouter::new(Arc::new(table), &config.chat, caps);

    match args.command() {
        Command::Serve { .. } => {
            config.general.port = args.resolve_port(config.general.port);
            let state = AppState::new(router);
            routes::start_server(&config, state).await?;
        }
        Command::Ask { message } => {
            println!("{}", router.handle(&message.join(" ")).await);
        }
        Command::Repl => {
            run_repl(&router).await?;
        }
    }

    Ok(())
}
