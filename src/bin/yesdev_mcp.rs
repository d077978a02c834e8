//! YesDev MCP server binary.
//!
//! Serves the YesDev tools over stdio (default) or HTTP, and offers a
//! couple of commands for trying tools from a shell.

use std::process::ExitCode;

use clap::Parser;
use rmcp::model::{CallToolRequestParam, RawContent};
use rmcp::ServiceExt;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;
use yesdev_mcp::cli::{Cli, Command};
use yesdev_mcp::config::{Settings, TOKEN_VAR};
use yesdev_mcp::mcp::{YesDevServer, TOOLS};
use yesdev_mcp::YesDevError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Logs go to stderr; stdout carries the stdio protocol.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let command = Cli::parse().command();

    if let Command::Tools { json } = command {
        return match print_tools(json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let server = match Settings::from_env().and_then(|s| YesDevServer::from_settings(&s)) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, YesDevError::ConfigMissing(_)) {
                eprintln!("Hint: Set {TOKEN_VAR} environment variable");
            } else if matches!(e, YesDevError::UrlError(_)) {
                eprintln!("Hint: Check YESDEV_API_URL");
            }
            return ExitCode::FAILURE;
        }
    };
    server.initialize_labels().await;

    match run(server, command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(server: YesDevServer, command: Command) -> Result<ExitCode, BoxError> {
    match command {
        Command::Stdio => {
            tracing::info!("starting YesDev MCP server on stdio");
            let service = server.serve(rmcp::transport::stdio()).await?;
            service.waiting().await?;
            Ok(ExitCode::SUCCESS)
        }
        #[cfg(feature = "http")]
        Command::Http { host, port } => {
            yesdev_mcp::http::serve(server, &host, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { tool, args } => call(&server, tool, &args).await,
        Command::Tools { json } => {
            print_tools(json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn call(server: &YesDevServer, tool: String, args: &str) -> Result<ExitCode, BoxError> {
    let arguments = match serde_json::from_str(args)? {
        serde_json::Value::Object(map) => Some(map),
        _ => return Err("--args must be a JSON object".into()),
    };
    let result = server
        .dispatch(CallToolRequestParam {
            name: tool.into(),
            arguments,
        })
        .await
        .map_err(|e| e.message.to_string())?;

    for content in &result.content {
        if let RawContent::Text(text) = &content.raw {
            println!("{}", text.text);
        }
    }
    Ok(if result.is_error.unwrap_or(false) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[derive(Tabled, Serialize)]
struct ToolRow {
    name: &'static str,
    description: &'static str,
}

fn print_tools(json: bool) -> Result<(), BoxError> {
    let rows: Vec<ToolRow> = TOOLS
        .iter()
        .map(|t| ToolRow {
            name: t.name,
            description: t.description,
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
