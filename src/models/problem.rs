//! Problem (defect) model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::Update;

/// Service names for problem operations.
pub mod service {
    pub const MINE: &str = "Platform.Problems.GetMyProblem";
    pub const UPDATE: &str = "Platform.Problems.UpdateProblem";
}

/// A YesDev problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub problem_title: Option<String>,

    /// `PROBLEM_STATUS` code.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub problem_status: Option<i64>,

    /// `PROBLEM_LEVEL` code.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub problem_level: Option<i64>,

    /// `PROBLEM_TYPE` code.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub problem_type: Option<i64>,

    /// `PROBLEM_ATTRIBUTION` code.
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub problem_attribution: Option<i64>,

    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub assign_staff_id: Option<i64>,
}

/// Parameters for updating a problem.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProblemParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_attribution: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_staff_id: Option<i64>,
    /// Rich-text remark, also added as a note on the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_content_remark: Option<String>,
}

impl Problem {
    /// Problems assigned to the token owner and awaiting action.
    #[tracing::instrument(skip(client))]
    pub async fn mine(client: &YesDevClient) -> Result<Page<Self>> {
        client.call(service::MINE, &()).await
    }
}

#[async_trait]
impl Update for Problem {
    type Params = UpdateProblemParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &YesDevClient, params: Self::Params) -> Result<()> {
        client.call_unit(service::UPDATE, &params).await
    }
}
