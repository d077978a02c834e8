//! Markdown rendering for tool results.
//!
//! Provides the [`Markdown`] trait: list views render one bullet per item
//! with a deep link and resolved labels, detail views render a labeled field
//! block. Labels go through the injected [`LabelCache`], so an uninitialized
//! cache degrades to default labels instead of failing.

use crate::config::DEFAULT_WEB_URL;
use crate::labels::{LabelCache, LabelCategory};
use crate::models::{Need, Problem, Profile, Project, Staff, Task, Workgroup};

/// Placeholder for a missing date or name.
pub const UNSET: &str = "未设置";

/// Placeholder for a missing description.
pub const NONE: &str = "无";

/// Deep links into the YesDev web UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLinks {
    base: String,
}

impl Default for WebLinks {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_URL)
    }
}

impl WebLinks {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn task(&self, id: i64) -> String {
        format!("{}/task/taskDetail?id={id}", self.base)
    }

    pub fn project(&self, id: i64) -> String {
        format!("{}/#/project/project-detail?id={id}", self.base)
    }

    pub fn need(&self, id: i64) -> String {
        format!("{}/requirements/reqm-detail?id={id}", self.base)
    }

    pub fn problem(&self, id: i64) -> String {
        format!("{}/problem/problemDetail?id={id}", self.base)
    }
}

/// Everything a renderer needs besides the item itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub labels: &'a LabelCache,
    pub links: &'a WebLinks,
}

impl<'a> RenderContext<'a> {
    pub fn new(labels: &'a LabelCache, links: &'a WebLinks) -> Self {
        Self { labels, links }
    }

    fn label(&self, category: LabelCategory, code: Option<i64>) -> String {
        self.labels.label_opt(category, code)
    }
}

/// Trait for rendering YesDev records as markdown.
pub trait Markdown {
    /// One bullet line for list views.
    fn list_item(&self, ctx: &RenderContext<'_>) -> String;

    /// Labeled field block for detail views.
    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        self.list_item(ctx)
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or(UNSET)
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or(NONE)
}

fn id_text(id: Option<i64>) -> String {
    id.map_or_else(|| UNSET.to_string(), |id| id.to_string())
}

/// Link text with the target, or the bare text when the id is unknown.
fn linked(text: &str, id: Option<i64>, link: impl Fn(i64) -> String) -> String {
    match id {
        Some(id) => format!("[{text}]({})", link(id)),
        None => text.to_string(),
    }
}

/// Render a list under a heading, or `empty` when there are no items.
///
/// The empty sentence is a normal result, not an error.
pub fn render_list<T: Markdown>(
    heading: &str,
    items: &[T],
    ctx: &RenderContext<'_>,
    empty: &str,
) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let lines: Vec<String> = items.iter().map(|item| item.list_item(ctx)).collect();
    format!("{heading}\n\n{}", lines.join("\n")).trim().to_string()
}

impl Markdown for Staff {
    fn list_item(&self, _ctx: &RenderContext<'_>) -> String {
        format!(
            "- {}（员工ID：{}）",
            or_unset(self.staff_name.as_deref()),
            id_text(self.id)
        )
    }
}

impl Markdown for Workgroup {
    fn list_item(&self, _ctx: &RenderContext<'_>) -> String {
        format!(
            "- {}（工作组ID：{}）",
            or_unset(self.workgroup_name.as_deref()),
            id_text(self.id)
        )
    }
}

impl Markdown for Profile {
    fn list_item(&self, _ctx: &RenderContext<'_>) -> String {
        format!(
            "- {}（员工ID：{}）",
            or_unset(self.staff_info.staff_name.as_deref()),
            id_text(self.staff_info.id)
        )
    }

    fn detail(&self, _ctx: &RenderContext<'_>) -> String {
        let staff = &self.staff_info;
        [
            "### 我的个人资料".to_string(),
            format!("**员工ID**: {}", id_text(staff.id)),
            format!("**姓名**: {}", or_unset(staff.staff_name.as_deref())),
            format!("**工号**: {}", or_unset(staff.staff_no.as_deref())),
        ]
        .join("\n")
    }
}

impl Markdown for Task {
    fn list_item(&self, ctx: &RenderContext<'_>) -> String {
        let title = linked(or_unset(self.task_title.as_deref()), self.id, |id| {
            ctx.links.task(id)
        });
        format!(
            "- {title} (状态: {}, 类型: {})",
            ctx.label(LabelCategory::TaskStatus, self.task_status),
            ctx.label(LabelCategory::TaskType, self.task_type),
        )
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut lines = vec![
            format!("### 任务详情: {}", or_unset(self.task_title.as_deref())),
            format!("**ID**: {}", id_text(self.id)),
            format!("**状态**: {}", ctx.label(LabelCategory::TaskStatus, self.task_status)),
            format!("**类型**: {}", ctx.label(LabelCategory::TaskType, self.task_type)),
            format!(
                "**负责人**: {}",
                or_unset(self.staff_name.as_deref().or(self.staff_id.as_deref()))
            ),
            format!("**所属项目**: {}", or_unset(self.project_name.as_deref())),
            format!("**开始日期**: {}", or_unset(self.plan_start_date.as_deref())),
            format!("**截止日期**: {}", or_unset(self.task_finish_time.as_deref())),
            format!("**工时**: {}", or_unset(self.task_time.as_deref())),
            format!("**描述**: {}", or_none(self.task_desc.as_deref())),
        ];
        if let Some(id) = self.id {
            lines.push(format!("\n[在YesDev中查看任务]({})", ctx.links.task(id)));
        }
        lines.join("\n")
    }
}

impl Markdown for Project {
    fn list_item(&self, ctx: &RenderContext<'_>) -> String {
        let name = linked(or_unset(self.project_name.as_deref()), self.id, |id| {
            ctx.links.project(id)
        });
        format!(
            "- {name} (状态: {})",
            ctx.label(LabelCategory::ProjectStatus, self.project_status)
        )
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut lines = vec![
            format!("### 项目详情: {}", or_unset(self.project_name.as_deref())),
            format!("**ID**: {}", id_text(self.id)),
            format!("**负责人**: {}", or_unset(self.charge_staff_name.as_deref())),
            format!(
                "**状态**: {}",
                ctx.label(LabelCategory::ProjectStatus, self.project_status)
            ),
            format!("**开始日期**: {}", or_unset(self.project_start_time.as_deref())),
            format!("**结束日期**: {}", or_unset(self.project_end_time.as_deref())),
            format!("**描述**: {}", or_none(self.project_desc.as_deref())),
        ];
        if let Some(id) = self.id {
            lines.push(format!("\n[在YesDev中查看项目]({})", ctx.links.project(id)));
        }
        lines.join("\n")
    }
}

impl Markdown for Need {
    fn list_item(&self, ctx: &RenderContext<'_>) -> String {
        let name = linked(or_unset(self.need_name.as_deref()), self.id, |id| {
            ctx.links.need(id)
        });
        format!(
            "- {name} (状态: {})",
            ctx.label(LabelCategory::NeedStatus, self.need_status)
        )
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut lines = vec![
            format!("### 需求名称: {}", or_unset(self.need_name.as_deref())),
            format!("**需求ID**: {}", id_text(self.id)),
            format!("**状态**: {}", ctx.label(LabelCategory::NeedStatus, self.need_status)),
            format!("**优先级**: {}", ctx.label(LabelCategory::NeedLevel, self.need_level)),
            format!("**负责人**: {}", or_unset(self.charge_staff_name.as_deref())),
            format!("**创建人**: {}", or_unset(self.created_staff_name.as_deref())),
            format!("**所属项目**: {}", or_unset(self.project_name.as_deref())),
            format!("**创建时间**: {}", or_unset(self.add_time.as_deref())),
            format!("**最后更新**: {}", or_unset(self.sys_update_time.as_deref())),
        ];
        if let Some(id) = self.id {
            lines.push(format!("\n[在YesDev中查看需求]({})", ctx.links.need(id)));
        }
        lines.join("\n")
    }
}

impl Markdown for Problem {
    fn list_item(&self, ctx: &RenderContext<'_>) -> String {
        let title = linked(or_unset(self.problem_title.as_deref()), self.id, |id| {
            ctx.links.problem(id)
        });
        format!(
            "- {title} (问题优先级: {}, 状态: {}, 类型: {})",
            ctx.label(LabelCategory::ProblemLevel, self.problem_level),
            ctx.label(LabelCategory::ProblemStatus, self.problem_status),
            ctx.label(LabelCategory::ProblemType, self.problem_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelCatalog;
    use serde_json::json;

    fn ready_cache() -> LabelCache {
        let mut catalog = LabelCatalog::default();
        catalog.insert(LabelCategory::TaskStatus, 600, "待办");
        catalog.insert(LabelCategory::TaskType, 3, "技术开发");
        catalog.insert(LabelCategory::NeedStatus, 1, "待评审");
        LabelCache::with_catalog(catalog)
    }

    #[test]
    fn links_have_documented_shape() {
        let links = WebLinks::new("https://www.yesdev.cn/platform/");
        assert_eq!(links.task(9), "https://www.yesdev.cn/platform/task/taskDetail?id=9");
        assert_eq!(
            links.project(9),
            "https://www.yesdev.cn/platform/#/project/project-detail?id=9"
        );
        assert_eq!(
            links.need(9),
            "https://www.yesdev.cn/platform/requirements/reqm-detail?id=9"
        );
        assert_eq!(
            links.problem(9),
            "https://www.yesdev.cn/platform/problem/problemDetail?id=9"
        );
    }

    #[test]
    fn task_line_resolves_labels() {
        let labels = ready_cache();
        let links = WebLinks::default();
        let ctx = RenderContext::new(&labels, &links);
        let task: Task = serde_json::from_value(json!({
            "id": 42, "task_title": "接口联调", "task_status": 600, "task_type": 3
        }))
        .unwrap();
        assert_eq!(
            task.list_item(&ctx),
            "- [接口联调](https://www.yesdev.cn/platform/task/taskDetail?id=42) (状态: 待办, 类型: 技术开发)"
        );
    }

    #[test]
    fn uninitialized_cache_uses_defaults() {
        let labels = LabelCache::new();
        let links = WebLinks::default();
        let ctx = RenderContext::new(&labels, &links);
        let problem: Problem = serde_json::from_value(json!({
            "id": 3, "problem_title": "白屏", "problem_status": 10, "problem_level": 1
        }))
        .unwrap();
        let line = problem.list_item(&ctx);
        assert!(line.contains("问题优先级: 未知优先级"));
        assert!(line.contains("状态: 未知状态"));
        assert!(line.contains("类型: 其他"));
    }

    #[test]
    fn detail_fills_placeholders() {
        let labels = ready_cache();
        let links = WebLinks::default();
        let ctx = RenderContext::new(&labels, &links);
        let project: Project = serde_json::from_value(json!({"id": 5, "project_name": "官网"})).unwrap();
        let text = project.detail(&ctx);
        assert!(text.starts_with("### 项目详情: 官网"));
        assert!(text.contains("**开始日期**: 未设置"));
        assert!(text.contains("**描述**: 无"));
        assert!(text.ends_with("(https://www.yesdev.cn/platform/#/project/project-detail?id=5)"));
    }

    #[test]
    fn empty_list_renders_sentence() {
        let labels = ready_cache();
        let links = WebLinks::default();
        let ctx = RenderContext::new(&labels, &links);
        let needs: Vec<Need> = Vec::new();
        assert_eq!(render_list("### 需求列表", &needs, &ctx, "未查询到任何需求。"), "未查询到任何需求。");
    }
}
