//! YesDev MCP adapter.
//!
//! Exposes the YesDev project-management API (tasks, projects,
//! requirements, daily reports, problems, staff) as Model Context Protocol
//! tools. The library side is a typed client built around one trait per
//! operation (Create, Get, Update, Remove, List) that entity types
//! implement; the [`mcp`] module turns those operations into tools.
//!
//! # Quick Start
//!
//! ```no_run
//! use yesdev_mcp::{List, Task, TaskListQuery, YesDevClient};
//!
//! #[tokio::main]
//! async fn main() -> yesdev_mcp::Result<()> {
//!     let client = YesDevClient::from_env()?;
//!
//!     let page = Task::list(&client, &TaskListQuery::default()).await?;
//!     println!("Found {} tasks", page.total_or_len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! - `YESDEV_ACCESS_TOKEN` (required) - Access token sent with every call
//! - `YESDEV_API_URL` (optional) - Service endpoint
//! - `YESDEV_WEB_URL` (optional) - Base for deep links in tool output
//! - `PORT` (optional) - HTTP transport port

mod client;
mod envelope;
mod error;
mod pagination;
mod serde_utils;
mod traits;

pub mod cli;
pub mod config;
pub mod format;
#[cfg(feature = "http")]
pub mod http;
pub mod labels;
pub mod mcp;
pub mod models;

// Re-export core types
pub use client::YesDevClient;
pub use config::Settings;
pub use envelope::{Envelope, RET_OK};
pub use error::{Result, YesDevError, UNKNOWN_ERROR};
pub use labels::{CatalogSource, LabelCache, LabelCacheState, LabelCatalog, LabelCategory};
pub use pagination::{Page, PaginationParams};

// Re-export traits
pub use traits::{Create, Get, List, Remove, Update};

// Re-export models
pub use models::{
    // Task types
    CheckTaskParams,
    CreateTaskParams,
    RevokeCheckTaskParams,
    Task,
    TaskListQuery,
    UpdateTaskParams,
    // Project types
    Project,
    UpdateProjectParams,
    UpdateProjectStatusParams,
    // Need types
    CreateNeedParams,
    Need,
    NeedList,
    NeedQuery,
    UpdateNeedParams,
    // Problem types
    Problem,
    UpdateProblemParams,
    // Staff types
    Profile,
    Staff,
    StaffQuery,
    Workgroup,
    // Daily reports
    DailyParams,
    DailyResult,
};

pub use models::{submit_daily, Created, FROM_CHANNEL};
