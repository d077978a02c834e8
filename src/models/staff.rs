//! Staff, workgroup and profile lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;

/// Service names for directory lookups.
pub mod service {
    pub const SEARCH_STAFF: &str = "Platform.Staff.SearchStaff";
    pub const MY_PROFILE: &str = "Platform.Staff.GetMyProfile";
    pub const WORKGROUP_LIST: &str = "Platform.Workgroup.GetWorkgroupList";
}

/// A staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Staff {
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub staff_name: Option<String>,
    /// Employee number (工号).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub staff_no: Option<String>,
}

/// Staff search filter: name or employee number.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StaffQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// A workgroup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workgroup {
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_utils::opt_string")]
    pub workgroup_name: Option<String>,
}

/// The token owner's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub staff_info: Staff,
}

impl Profile {
    #[tracing::instrument(skip(client))]
    pub async fn mine(client: &YesDevClient) -> Result<Self> {
        client.call(service::MY_PROFILE, &()).await
    }
}

#[async_trait]
impl List for Staff {
    type Query = StaffQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &YesDevClient, query: &Self::Query) -> Result<Page<Self>> {
        client.call(service::SEARCH_STAFF, query).await
    }
}

#[async_trait]
impl List for Workgroup {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &YesDevClient, query: &Self::Query) -> Result<Page<Self>> {
        client.call(service::WORKGROUP_LIST, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_reads_nested_staff_info() {
        let profile: Profile = serde_json::from_value(json!({
            "staff_info": {"id": 3, "staff_name": "张三", "staff_no": 10086}
        }))
        .unwrap();
        assert_eq!(profile.staff_info.id, Some(3));
        assert_eq!(profile.staff_info.staff_no.as_deref(), Some("10086"));
    }
}
