use rmcp::model::CallToolResult;

use crate::format::render_list;
use crate::mcp::params::UpdateProblemArgs;
use crate::mcp::YesDevServer;
use crate::models::Problem;
use crate::traits::Update;

impl YesDevServer {
    pub async fn get_my_problems(&self) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取问题列表", Problem::mine(&self.client).await, |page| {
            let heading = format!("### 待你处理的问题 (共 {} 个)", page.total_or_len());
            render_list(&heading, &page.items, &ctx, "你当前没有待处理的问题。")
        })
    }

    pub async fn update_problem(&self, args: UpdateProblemArgs) -> CallToolResult {
        let id = args.id;
        Self::respond(
            "更新问题",
            Problem::update(&self.client, args.into()).await,
            |()| format!("问题 {id} 已成功更新。"),
        )
    }
}
