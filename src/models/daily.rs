//! Daily report (日报) submission.

use serde::{Deserialize, Serialize};

use crate::client::YesDevClient;
use crate::error::Result;

/// Service name for creating or replacing a daily report.
pub const DAILY_SERVICE: &str = "Platform.Daily.AddOrUpdateDaily";

/// Parameters for `AddOrUpdateDaily`.
#[derive(Debug, Clone, Serialize)]
pub struct DailyParams {
    /// Report date (`YYYY-MM-DD`).
    pub daily_time: String,
    /// HTML content.
    pub content: String,
    pub title: String,
}

impl DailyParams {
    /// Build parameters, filling the date and title defaults.
    ///
    /// Plain-text line breaks in `content` become `<br>`.
    pub fn new(content: &str, title: Option<String>, daily_time: Option<String>, today: &str) -> Self {
        let daily_time = daily_time
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| today.to_string());
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("日报 - {daily_time}"));
        Self {
            content: content.replace('\n', "<br>"),
            title,
            daily_time,
        }
    }
}

/// Result of a daily report submission.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DailyResult {
    /// True when an existing report for that date was replaced.
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_bool")]
    pub is_update: bool,
}

/// Submit or replace the report for `params.daily_time`.
#[tracing::instrument(skip(client))]
pub async fn submit_daily(client: &YesDevClient, params: &DailyParams) -> Result<DailyResult> {
    client.call(DAILY_SERVICE, params).await
}
