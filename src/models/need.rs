//! Requirement (需求) model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;
use crate::models::{Created, IdParam, FROM_CHANNEL};
use crate::pagination::Page;
use crate::traits::{Create, Get, List, Remove, Update};

/// Service names for requirement operations.
pub mod service {
    pub const CREATE: &str = "Platform.Needs.CreateNeed";
    pub const UPDATE: &str = "Platform.Needs.UpdateNeed";
    pub const DETAIL: &str = "Platform.Needs.GetNeedDetail";
    pub const DETAIL_LITE: &str = "Platform.Needs.GetNeedDetailLite";
    pub const REMOVE: &str = "Platform.Needs.RemoveNeed";
    pub const QUERY: &str = "Platform.Needs.QueryNeeds";
    pub const PROJECT_LIST: &str = "Platform.Needs.GetProjectNeedList";
    pub const SUB_LIST: &str = "Platform.Needs.GetSubNeedList";
}

/// Note appended to requirement descriptions written by this server.
pub const NEED_PROVENANCE_NOTE: &str = "<p><br>需求创建来自AI助手</p>";

/// A YesDev requirement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Need {
    /// Requirement ID.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,

    /// Display name.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub need_name: Option<String>,

    /// HTML description.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub need_content: Option<String>,

    /// Status code (`NEED_STATUS`).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub need_status: Option<i64>,

    /// Priority code (`NEED_LEVEL`).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub need_level: Option<i64>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub charge_staff_name: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub created_staff_name: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub project_id: Option<i64>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub project_name: Option<String>,

    /// Parent requirement, if this is a sub-requirement.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub need_parent_id: Option<i64>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub need_start_date: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub need_finish_date: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub add_time: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub sys_update_time: Option<String>,
}

/// Detail payload: some services wrap the record as `{"need": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NeedDetail {
    Wrapped { need: Need },
    Bare(Need),
}

impl From<NeedDetail> for Need {
    fn from(detail: NeedDetail) -> Self {
        match detail {
            NeedDetail::Wrapped { need } | NeedDetail::Bare(need) => need,
        }
    }
}

/// Grouped list payload: `{"list": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeedList {
    #[serde(default)]
    pub list: Vec<Need>,
}

/// Parameters for creating a requirement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateNeedParams {
    pub need_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_finish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_channel: Option<String>,
}

impl CreateNeedParams {
    /// Stamp provenance: `from_channel` is always set and a supplied
    /// description gets [`NEED_PROVENANCE_NOTE`] appended.
    #[must_use]
    pub fn with_provenance(mut self) -> Self {
        if let Some(content) = self.need_content.as_mut() {
            content.push_str(NEED_PROVENANCE_NOTE);
        }
        self.from_channel = Some(FROM_CHANNEL.to_string());
        self
    }
}

/// Parameters for a partial requirement update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNeedParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_finish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_parent_id: Option<i64>,
}

/// Filters for `QueryNeeds`.
///
/// Multi-valued filters are comma separated strings, as the service expects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NeedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_have_project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_assign_staff: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_staff_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_staff_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_finish_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_add_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_add_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_update_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_update_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_actual_finish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_actual_finish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub page: u32,
    pub perpage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status_sort: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ProjectNeedsParam<'a> {
    project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    need_status: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SubNeedsParam {
    need_id: i64,
}

impl Need {
    /// Lightweight detail lookup.
    #[tracing::instrument(skip(client))]
    pub async fn get_lite(client: &YesDevClient, id: i64) -> Result<Self> {
        let detail: NeedDetail = client.call(service::DETAIL_LITE, &IdParam { id }).await?;
        Ok(detail.into())
    }

    /// All requirements of one project, optionally filtered by status.
    #[tracing::instrument(skip(client))]
    pub async fn project_needs(
        client: &YesDevClient,
        project_id: i64,
        need_status: Option<&str>,
    ) -> Result<NeedList> {
        let params = ProjectNeedsParam {
            project_id,
            need_status,
        };
        client.call(service::PROJECT_LIST, &params).await
    }

    /// Direct children of a requirement.
    #[tracing::instrument(skip(client))]
    pub async fn sub_needs(client: &YesDevClient, parent_id: i64) -> Result<NeedList> {
        client
            .call(service::SUB_LIST, &SubNeedsParam { need_id: parent_id })
            .await
    }
}

#[async_trait]
impl Create for Need {
    type Params = CreateNeedParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &YesDevClient, params: Self::Params) -> Result<Created> {
        client.call(service::CREATE, &params).await
    }
}

#[async_trait]
impl Get for Need {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &YesDevClient, id: i64) -> Result<Self> {
        let detail: NeedDetail = client.call(service::DETAIL, &IdParam { id }).await?;
        Ok(detail.into())
    }
}

#[async_trait]
impl Update for Need {
    type Params = UpdateNeedParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &YesDevClient, params: Self::Params) -> Result<()> {
        client.call_unit(service::UPDATE, &params).await
    }
}

#[async_trait]
impl Remove for Need {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn remove(client: &YesDevClient, id: i64) -> Result<()> {
        client.call_unit(service::REMOVE, &IdParam { id }).await
    }
}

#[async_trait]
impl List for Need {
    type Query = NeedQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &YesDevClient, query: &Self::Query) -> Result<Page<Self>> {
        client.call(service::QUERY, query).await
    }
}
