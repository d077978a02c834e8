use rmcp::model::CallToolResult;

use crate::format::{render_list, Markdown};
use crate::labels::LabelCategory;
use crate::mcp::params::{IdArgs, UpdateProjectArgs, UpdateProjectStatusArgs};
use crate::mcp::YesDevServer;
use crate::models::Project;
use crate::traits::{Get, Update};

impl YesDevServer {
    pub async fn get_my_project_list(&self) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond("获取我的项目列表", Project::mine(&self.client).await, |page| {
            render_list(
                "### 你的项目列表",
                &page.items,
                &ctx,
                "你当前没有参与任何进行中的项目。",
            )
        })
    }

    pub async fn get_project_detail(&self, args: IdArgs) -> CallToolResult {
        let ctx = self.render_context();
        Self::respond(
            "获取项目详情",
            Project::get(&self.client, args.id).await,
            |project| project.detail(&ctx),
        )
    }

    pub async fn update_project(&self, args: UpdateProjectArgs) -> CallToolResult {
        let id = args.id;
        Self::respond(
            "更新项目",
            Project::update(&self.client, args.into()).await,
            |()| format!("项目 {id} 更新成功！"),
        )
    }

    pub async fn update_project_status(&self, args: UpdateProjectStatusArgs) -> CallToolResult {
        let (id, status) = (args.id, args.project_status);
        Self::respond(
            "更新项目状态",
            Project::update_status(&self.client, args.into()).await,
            |()| {
                let label = self.labels.label(LabelCategory::ProjectStatus, status);
                format!("项目 {id} 的状态已更新为 {label}。")
            },
        )
    }
}
