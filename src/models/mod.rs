//! YesDev model types.

pub mod daily;
pub mod need;
pub mod problem;
pub mod project;
pub mod staff;
pub mod task;

pub use daily::{submit_daily, DailyParams, DailyResult};
pub use need::{CreateNeedParams, Need, NeedList, NeedQuery, UpdateNeedParams};
pub use problem::{Problem, UpdateProblemParams};
pub use project::{Project, UpdateProjectParams, UpdateProjectStatusParams};
pub use staff::{Profile, Staff, StaffQuery, Workgroup};
pub use task::{
    CheckTaskParams, CreateTaskParams, RevokeCheckTaskParams, Task, TaskListQuery,
    UpdateTaskParams,
};

use serde::{Deserialize, Serialize};

/// Marker stamped on everything this server creates.
pub const FROM_CHANNEL: &str = "mcp";

/// Payload returned by creation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    /// ID of the new entity.
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
}

/// `{"id": N}` request body shared by detail and delete services.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct IdParam {
    pub id: i64,
}
