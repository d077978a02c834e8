//! MCP (Model Context Protocol) server and tool types.
//!
//! This module exposes the YesDev API as MCP tools, so AI assistants can
//! manage tasks, projects, requirements, daily reports and problems.
//!
//! # Example
//!
//! ```no_run
//! use rmcp::ServiceExt;
//! use yesdev_mcp::mcp::YesDevServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = YesDevServer::from_env()?;
//! server.initialize_labels().await;
//! let service = server.serve(rmcp::transport::stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

mod params;
mod server;
mod tools;

pub use params::*;
pub use server::{ToolSpec, YesDevServer, SERVER_NAME, TOOLS};
