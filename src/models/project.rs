//! Project model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;
use crate::models::IdParam;
use crate::pagination::Page;
use crate::traits::{Get, Update};

/// Service names for project operations.
pub mod service {
    pub const MY_LIST: &str = "Platform.Projects.GetMyProjectList";
    pub const DETAIL: &str = "Platform.Projects.GetProjectDetail";
    pub const UPDATE: &str = "Platform.Projects.UpdateProject";
    pub const UPDATE_STATUS: &str = "Platform.Projects.UpdateProjectStatus";
}

/// A YesDev project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,

    /// Display name.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_name: Option<String>,

    /// HTML description.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_desc: Option<String>,

    /// Status code (`PROJECT_STATUS`).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub project_status: Option<i64>,

    /// Owner ID.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub charge_staff_id: Option<i64>,

    /// Owner display name.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub charge_staff_name: Option<String>,

    /// Planned start date.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_start_time: Option<String>,

    /// Planned end date.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_end_time: Option<String>,
}

/// Parameters for a partial project update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProjectParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_end_time: Option<String>,
}

/// Parameters for moving a project to another status.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateProjectStatusParams {
    pub id: i64,
    pub project_status: i64,
}

impl Project {
    /// Projects in progress that the token owner takes part in.
    #[tracing::instrument(skip(client))]
    pub async fn mine(client: &YesDevClient) -> Result<Page<Self>> {
        client.call(service::MY_LIST, &()).await
    }

    /// Change only the status of a project.
    #[tracing::instrument(skip(client))]
    pub async fn update_status(
        client: &YesDevClient,
        params: UpdateProjectStatusParams,
    ) -> Result<()> {
        client.call_unit(service::UPDATE_STATUS, &params).await
    }
}

#[async_trait]
impl Get for Project {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &YesDevClient, id: i64) -> Result<Self> {
        client.call(service::DETAIL, &IdParam { id }).await
    }
}

#[async_trait]
impl Update for Project {
    type Params = UpdateProjectParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &YesDevClient, params: Self::Params) -> Result<()> {
        client.call_unit(service::UPDATE, &params).await
    }
}
