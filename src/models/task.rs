//! Task model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;
use crate::models::{Created, IdParam, FROM_CHANNEL};
use crate::pagination::Page;
use crate::traits::{Create, Get, List, Remove, Update};

/// Service names for task operations.
pub mod service {
    pub const CREATE: &str = "Platform.Tasks.CreateNewTask";
    pub const DETAIL: &str = "Platform.Tasks.GetTaskDetail";
    pub const UPDATE: &str = "Platform.Tasks.UpdateTask";
    pub const REMOVE: &str = "Platform.Tasks.RemoveTask";
    pub const LIST: &str = "Platform.Tasks.GetTaskList";
    pub const CHECK: &str = "Platform.Tasks.CheckTask";
    pub const REVOKE_CHECK: &str = "Platform.Tasks.RevokeCheckTask";
}

/// Note appended to task descriptions written by this server.
pub const TASK_PROVENANCE_NOTE: &str = "<p><br>任务创建来自AI助手</p>";

/// Default task type: 技术开发.
pub const DEFAULT_TASK_TYPE: i64 = 3;

/// Default task status: 待办.
pub const DEFAULT_TASK_STATUS: i64 = 600;

/// A YesDev task.
///
/// All fields are optional: detail and list services return different
/// subsets, and older endpoints use the short field names as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    /// Task ID.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,

    /// Task title.
    #[serde(default, alias = "title", deserialize_with = "crate::serde_utils::opt_string")]
    pub task_title: Option<String>,

    /// HTML description.
    #[serde(default, alias = "description", deserialize_with = "crate::serde_utils::opt_string")]
    pub task_desc: Option<String>,

    /// Status code (`TASK_STATUS`).
    #[serde(default, alias = "status", deserialize_with = "crate::serde_utils::opt_i64")]
    pub task_status: Option<i64>,

    /// Type code (`TASK_TYPE`).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub task_type: Option<i64>,

    /// Owner ID(s), comma separated.
    #[serde(default, alias = "assignee", deserialize_with = "crate::serde_utils::opt_string")]
    pub staff_id: Option<String>,

    /// Owner display name.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub staff_name: Option<String>,

    /// Planned start date.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub plan_start_date: Option<String>,

    /// Planned finish date.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub task_finish_time: Option<String>,

    /// Estimated hours.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub task_time: Option<String>,

    /// Project the task belongs to.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub project_id: Option<i64>,

    /// Project display name.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_name: Option<String>,

    /// Requirement the task belongs to.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub need_id: Option<i64>,

    /// Creation time.
    #[serde(default, alias = "created_at", deserialize_with = "crate::serde_utils::opt_string")]
    pub add_time: Option<String>,

    /// Last update time.
    #[serde(default, alias = "updated_at", deserialize_with = "crate::serde_utils::opt_string")]
    pub sys_update_time: Option<String>,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskParams {
    /// Task title.
    pub task_title: String,
    /// Owner ID(s), comma separated; the token owner when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// HTML description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_desc: Option<String>,
    /// Planned finish date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_finish_time: Option<String>,
    /// Planned start date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_start_date: Option<String>,
    /// Type code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<i64>,
    /// Estimated hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_time: Option<f64>,
    /// Project ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Requirement ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_id: Option<i64>,
    /// Status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status: Option<i64>,
    /// 1 to suppress the notification email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_send_email: Option<i64>,
    /// Problem ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<i64>,
    /// 1 to mark the task as a milestone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_milestone: Option<i64>,
    /// Provenance marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_channel: Option<String>,
}

impl CreateTaskParams {
    /// Parameters with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            task_title: title.into(),
            ..Default::default()
        }
    }

    /// Fill defaults and stamp provenance.
    ///
    /// Missing dates become `today`, missing type/status become 技术开发/待办,
    /// a supplied description gets [`TASK_PROVENANCE_NOTE`] appended, and
    /// `from_channel` is always set. Caller-supplied values are kept.
    #[must_use]
    pub fn with_defaults(mut self, today: &str) -> Self {
        self.plan_start_date
            .get_or_insert_with(|| today.to_string());
        self.task_finish_time
            .get_or_insert_with(|| today.to_string());
        self.task_type.get_or_insert(DEFAULT_TASK_TYPE);
        self.task_status.get_or_insert(DEFAULT_TASK_STATUS);
        if let Some(desc) = self.task_desc.as_mut() {
            desc.push_str(TASK_PROVENANCE_NOTE);
        }
        self.from_channel = Some(FROM_CHANNEL.to_string());
        self
    }
}

/// Parameters for updating a task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskParams {
    /// Task ID.
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_finish_time: Option<String>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskListQuery {
    pub page: u32,
    pub page_size: u32,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Owner filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// Project filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Requirement filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_id: Option<i64>,
    /// Title keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
}

/// Parameters for accepting (验收) a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckTaskParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Parameters for revoking a task's acceptance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevokeCheckTaskParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Task {
    /// Accept a finished task.
    #[tracing::instrument(skip(client))]
    pub async fn check(client: &YesDevClient, params: CheckTaskParams) -> Result<()> {
        client.call_unit(service::CHECK, &params).await
    }

    /// Revoke a previous acceptance.
    #[tracing::instrument(skip(client))]
    pub async fn revoke_check(client: &YesDevClient, params: RevokeCheckTaskParams) -> Result<()> {
        client.call_unit(service::REVOKE_CHECK, &params).await
    }
}

#[async_trait]
impl Create for Task {
    type Params = CreateTaskParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &YesDevClient, params: Self::Params) -> Result<Created> {
        client.call(service::CREATE, &params).await
    }
}

#[async_trait]
impl Get for Task {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &YesDevClient, id: i64) -> Result<Self> {
        client.call(service::DETAIL, &IdParam { id }).await
    }
}

#[async_trait]
impl Update for Task {
    type Params = UpdateTaskParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &YesDevClient, params: Self::Params) -> Result<()> {
        client.call_unit(service::UPDATE, &params).await
    }
}

#[async_trait]
impl Remove for Task {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn remove(client: &YesDevClient, id: i64) -> Result<()> {
        client.call_unit(service::REMOVE, &IdParam { id }).await
    }
}

#[async_trait]
impl List for Task {
    type Query = TaskListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &YesDevClient, query: &Self::Query) -> Result<Page<Self>> {
        client.call(service::LIST, query).await
    }
}
