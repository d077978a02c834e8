use rmcp::model::CallToolResult;

use crate::format::{render_list, Markdown};
use crate::mcp::params::SearchStaffArgs;
use crate::mcp::YesDevServer;
use crate::models::{Profile, Staff, StaffQuery, Workgroup};
use crate::traits::List;

impl YesDevServer {
    pub async fn search_staff(&self, args: SearchStaffArgs) -> CallToolResult {
        let query = StaffQuery::from(args);
        let ctx = self.render_context();
        Self::respond("搜索员工", Staff::list(&self.client, &query).await, |page| {
            render_list("### 员工列表", &page.items, &ctx, "未找到相关员工。")
        })
    }

    pub async fn get_workgroup_list(&self) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取工作组列表", Workgroup::list(&self.client, &()).await, |page| {
            render_list("### 工作组列表", &page.items, &ctx, "未找到任何工作组。")
        })
    }

    pub async fn get_my_profile(&self) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取个人资料", Profile::mine(&self.client).await, |profile| {
            profile.detail(&ctx)
        })
    }
}
