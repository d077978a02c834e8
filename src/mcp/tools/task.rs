use rmcp::model::{CallToolResult, ErrorData as McpError};

use crate::format::{render_list, Markdown};
use crate::mcp::params::{
    CheckTaskArgs, CreateTaskArgs, IdArgs, QueryTasksArgs, RevokeCheckTaskArgs, UpdateTaskArgs,
};
use crate::mcp::YesDevServer;
use crate::models::{CreateTaskParams, Task, TaskListQuery};
use crate::traits::{Create, Get, List, Remove, Update};

impl YesDevServer {
    /// Create a task, filling today's date and the default type and status.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` if the title is longer than 100 characters.
    pub async fn create_task(&self, args: CreateTaskArgs) -> Result<CallToolResult, McpError> {
        args.validate()?;
        let params = CreateTaskParams::from(args).with_defaults(&Self::today());
        Ok(Self::respond(
            "创建任务",
            Task::create(&self.client, params).await,
            |created| format!("成功创建任务，ID: {}", created.id),
        ))
    }

    pub async fn get_task_detail(&self, args: IdArgs) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取任务详情", Task::get(&self.client, args.id).await, |task| {
            task.detail(&ctx)
        })
    }

    /// # Errors
    ///
    /// Returns `invalid_params` if a new title is longer than 100 characters.
    pub async fn update_task(&self, args: UpdateTaskArgs) -> Result<CallToolResult, McpError> {
        args.validate()?;
        let id = args.id;
        Ok(Self::respond(
            "更新任务",
            Task::update(&self.client, args.into()).await,
            |()| format!("成功更新任务 {id}"),
        ))
    }

    pub async fn remove_task(&self, args: IdArgs) -> CallToolResult {
        let id = args.id;
        Self::respond("删除任务", Task::remove(&self.client, id).await, |()| {
            format!("成功删除任务 {id}")
        })
    }

    pub async fn query_tasks(&self, args: QueryTasksArgs) -> CallToolResult {
        let query = TaskListQuery::from(args);
        let ctx = self.render_context();
        Self::respond("查询任务列表", Task::list(&self.client, &query).await, |page| {
            let heading = format!("### 任务列表 (共 {} 个)", page.total_or_len());
            render_list(&heading, &page.items, &ctx, "未查询到任何任务。")
        })
    }

    pub async fn check_task(&self, args: CheckTaskArgs) -> CallToolResult {
        let id = args.id;
        Self::respond("任务验收", Task::check(&self.client, args.into()).await, |()| {
            format!("成功验收任务 {id}")
        })
    }

    pub async fn revoke_check_task(&self, args: RevokeCheckTaskArgs) -> CallToolResult {
        let id = args.id;
        Self::respond(
            "撤销任务验收",
            Task::revoke_check(&self.client, args.into()).await,
            |()| format!("成功撤销任务 {id} 的验收"),
        )
    }
}
