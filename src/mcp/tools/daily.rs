use rmcp::model::CallToolResult;

use crate::mcp::params::SubmitDailyArgs;
use crate::mcp::YesDevServer;
use crate::models::{submit_daily, DailyParams};

impl YesDevServer {
    /// Submit or replace a daily report; the date defaults to today.
    pub async fn submit_daily_report(&self, args: SubmitDailyArgs) -> CallToolResult {
        let params = DailyParams::new(&args.content, args.title, args.daily_time, &Self::today());
        let date = params.daily_time.clone();
        Self::respond("提交日报", submit_daily(&self.client, &params).await, |result| {
            if result.is_update {
                format!("成功更新了 {date} 的日报。")
            } else {
                format!("成功提交了 {date} 的新日报。")
            }
        })
    }
}
