//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! yesdev-mcp binary.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_PORT;

/// YesDev MCP server command-line interface.
#[derive(Parser, Debug)]
#[command(name = "yesdev-mcp", about = "YesDev MCP server", version)]
pub struct Cli {
    /// Defaults to `stdio`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, falling back to the stdio server.
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Stdio)
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve MCP over stdin/stdout.
    Stdio,

    /// Serve MCP over HTTP with per-session state.
    #[cfg(feature = "http")]
    Http {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind.
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// List the available tools.
    Tools {
        /// Output as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run a single tool and print its result.
    Call {
        /// Tool name, e.g. `query_tasks`.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}
