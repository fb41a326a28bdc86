//! CLI argument definitions for the Daybook binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Daybook - a chat assistant that turns messages into tasks and expenses.
#[derive(Parser, Debug)]
#[command(name = "daybook", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// API server port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
    /// Route a single message and print the reply.
    Ask {
        /// The message; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Read messages from stdin, one per line, until EOF or `exit`.
    Repl,
}

impl CliArgs {
    /// The subcommand to run, `serve` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { port: None })
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > DAYBOOK_CONFIG env var > ~/.daybook/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("DAYBOOK_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > DAYBOOK_PORT env var > config file value > 3040.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(Command::Serve { port: Some(p) }) = self.command {
            return p;
        }
        if let Ok(val) = std::env::var("DAYBOOK_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        3040
    }

    /// Resolve the tracing filter.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > config file value.
    pub fn resolve_log_filter(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            if !filter.trim().is_empty() {
                return filter;
            }
        }
        config_level.to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".daybook").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".daybook").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let args = parse(&["daybook"]);
        assert_eq!(args.command(), Command::Serve { port: None });
    }

    #[test]
    fn test_serve_port_flag_wins() {
        let args = parse(&["daybook", "serve", "--port", "8080"]);
        assert_eq!(args.resolve_port(3040), 8080);
    }

    #[test]
    fn test_ask_joins_words() {
        let args = parse(&["daybook", "ask", "remind", "me", "to", "stretch"]);
        match args.command() {
            Command::Ask { message } => assert_eq!(message.join(" "), "remind me to stretch"),
            other => panic!("expected ask, got {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(CliArgs::try_parse_from(["daybook", "ask"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["daybook", "repl", "--config", "/tmp/d.toml", "-l", "debug"]);
        assert_eq!(args.command(), Command::Repl);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/d.toml"));
        assert_eq!(args.resolve_log_filter("info"), "debug");
    }

    #[test]
    fn test_config_flag_wins_over_default() {
        let args = parse(&["daybook", "-c", "custom.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_default_config_path_ends_with_daybook_dir() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
