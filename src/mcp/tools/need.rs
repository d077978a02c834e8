use rmcp::model::{CallToolResult, ErrorData as McpError};

use crate::format::{render_list, Markdown};
use crate::mcp::params::{CreateNeedArgs, IdArgs, ProjectNeedsArgs, QueryNeedsArgs, UpdateNeedArgs};
use crate::mcp::YesDevServer;
use crate::models::{CreateNeedParams, Need, NeedQuery};
use crate::traits::{Create, Get, List, Remove, Update};

impl YesDevServer {
    /// # Errors
    ///
    /// Returns `invalid_params` if the name is longer than 200 characters.
    pub async fn create_need(&self, args: CreateNeedArgs) -> Result<CallToolResult, McpError> {
        args.validate()?;
        let params = CreateNeedParams::from(args).with_provenance();
        Ok(Self::respond(
            "创建需求",
            Need::create(&self.client, params).await,
            |created| format!("新需求已成功创建，需求ID是 {}", created.id),
        ))
    }

    /// # Errors
    ///
    /// Returns `invalid_params` if a new name is longer than 200 characters.
    pub async fn update_need(&self, args: UpdateNeedArgs) -> Result<CallToolResult, McpError> {
        args.validate()?;
        let id = args.id;
        Ok(Self::respond(
            "更新需求",
            Need::update(&self.client, args.into()).await,
            |()| format!("需求 {id} 更新成功！"),
        ))
    }

    pub async fn get_need_detail(&self, args: IdArgs) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取需求详情", Need::get(&self.client, args.id).await, |need| {
            need.detail(&ctx)
        })
    }

    pub async fn get_need_detail_lite(&self, args: IdArgs) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond(
            "获取需求详情",
            Need::get_lite(&self.client, args.id).await,
            |need| need.detail(&ctx),
        )
    }

    pub async fn remove_need(&self, args: IdArgs) -> CallToolResult {
        let id = args.id;
        Self::respond("删除需求", Need::remove(&self.client, id).await, |()| {
            format!("需求 {id} 已被删除。")
        })
    }

    pub async fn query_needs(&self, args: QueryNeedsArgs) -> CallToolResult {
        let query = NeedQuery::from(args);
        let ctx = self.render_context();
        Self::respond("查询需求列表", Need::list(&self.client, &query).await, |page| {
            let heading = format!("### 需求列表 (共 {} 个)", page.total_or_len());
            render_list(&heading, &page.items, &ctx, "未查询到任何需求。")
        })
    }

    pub async fn get_project_needs(&self, args: ProjectNeedsArgs) -> CallToolResult {
        let ctx = self.render_context();
        let outcome =
            Need::project_needs(&self.client, args.project_id, args.need_status.as_deref()).await;
        Self::respond("获取项目需求", outcome, |needs| {
            render_list("### 项目需求列表", &needs.list, &ctx, "该项目下没有需求。")
        })
    }

    pub async fn get_sub_needs(&self, args: IdArgs) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond(
            "获取子需求列表",
            Need::sub_needs(&self.client, args.id).await,
            |needs| render_list("### 子需求列表", &needs.list, &ctx, "该需求下没有子需求。"),
        )
    }
}
