//! MCP tool parameter types with JSON Schema support.
//!
//! Doc comments on fields become the schema descriptions the agent sees,
//! so they are written for the agent, in Chinese.

use rmcp::model::ErrorData as McpError;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::models::{
    CheckTaskParams, CreateNeedParams, CreateTaskParams, NeedQuery, RevokeCheckTaskParams,
    StaffQuery, TaskListQuery, UpdateNeedParams, UpdateProblemParams, UpdateProjectParams,
    UpdateProjectStatusParams, UpdateTaskParams,
};
use crate::pagination::PaginationParams;

/// Longest task title the service accepts.
pub const MAX_TASK_TITLE_CHARS: usize = 100;

/// Longest requirement name the service accepts.
pub const MAX_NEED_NAME_CHARS: usize = 200;

fn check_len(field: &str, value: &str, max: usize) -> Result<(), McpError> {
    let len = value.chars().count();
    if len > max {
        return Err(McpError::invalid_params(
            format!("{field} must be at most {max} characters, got {len}"),
            None,
        ));
    }
    Ok(())
}

/// Tools without arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

/// Tools addressing one entity by ID.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IdArgs {
    /// ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
}

/// Parameters for the `search_staff` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchStaffArgs {
    /// 搜索关键词，可以是姓名或工号
    #[serde(default)]
    pub keyword: Option<String>,
}

impl From<SearchStaffArgs> for StaffQuery {
    fn from(args: SearchStaffArgs) -> Self {
        Self {
            keyword: args.keyword,
        }
    }
}

/// Parameters for the `create_task` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTaskArgs {
    /// 任务标题，长度不超过100字
    #[schemars(length(max = 100))]
    pub task_title: String,
    /// 负责人ID，多个用英文逗号隔开，不传则使用当前用户
    #[serde(default)]
    pub staff_id: Option<String>,
    /// 任务描述，采用HTML格式
    #[serde(default)]
    pub task_desc: Option<String>,
    /// 任务计划完成时间，格式：YYYY-MM-DD，默认今天
    #[serde(default)]
    pub task_finish_time: Option<String>,
    /// 计划开始时间，格式：YYYY-MM-DD，默认今天
    #[serde(default)]
    pub plan_start_date: Option<String>,
    /// 任务类型，0其他1UI设计2产品原型3技术开发4测试5会议6编写文档7调研8沟通，默认3
    #[serde(default)]
    pub task_type: Option<i64>,
    /// 任务工时，单位：小时，保留一位小数
    #[serde(default)]
    pub task_time: Option<f64>,
    /// 项目ID
    #[serde(default)]
    pub project_id: Option<i64>,
    /// 需求ID
    #[serde(default)]
    pub need_id: Option<i64>,
    /// 任务状态，600待办、1500进行中、2000已完成，默认600
    #[serde(default)]
    pub task_status: Option<i64>,
    /// 是否发送邮件，1是0否
    #[serde(default)]
    pub not_send_email: Option<i64>,
    /// 问题ID
    #[serde(default)]
    pub problem_id: Option<i64>,
    /// 是否里程碑，1是0否
    #[serde(default)]
    pub is_milestone: Option<i64>,
}

impl CreateTaskArgs {
    pub fn validate(&self) -> Result<(), McpError> {
        check_len("task_title", &self.task_title, MAX_TASK_TITLE_CHARS)
    }
}

impl From<CreateTaskArgs> for CreateTaskParams {
    fn from(args: CreateTaskArgs) -> Self {
        Self {
            task_title: args.task_title,
            staff_id: args.staff_id,
            task_desc: args.task_desc,
            task_finish_time: args.task_finish_time,
            plan_start_date: args.plan_start_date,
            task_type: args.task_type,
            task_time: args.task_time,
            project_id: args.project_id,
            need_id: args.need_id,
            task_status: args.task_status,
            not_send_email: args.not_send_email,
            problem_id: args.problem_id,
            is_milestone: args.is_milestone,
            from_channel: None,
        }
    }
}

/// Parameters for the `update_task` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTaskArgs {
    /// 任务ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 新的任务标题，长度不超过100字
    #[serde(default)]
    #[schemars(length(max = 100))]
    pub task_title: Option<String>,
    /// 新的任务描述，采用HTML格式
    #[serde(default)]
    pub task_desc: Option<String>,
    /// 新的负责人ID，多个用英文逗号隔开
    #[serde(default)]
    pub staff_id: Option<String>,
    /// 新的任务状态，600待办、1500进行中、2000已完成
    #[serde(default)]
    pub task_status: Option<i64>,
    /// 新的任务类型
    #[serde(default)]
    pub task_type: Option<i64>,
    /// 新的任务工时，单位：小时
    #[serde(default)]
    pub task_time: Option<f64>,
    /// 新的计划开始时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub plan_start_date: Option<String>,
    /// 新的计划完成时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub task_finish_time: Option<String>,
}

impl UpdateTaskArgs {
    pub fn validate(&self) -> Result<(), McpError> {
        match &self.task_title {
            Some(title) => check_len("task_title", title, MAX_TASK_TITLE_CHARS),
            None => Ok(()),
        }
    }
}

impl From<UpdateTaskArgs> for UpdateTaskParams {
    fn from(args: UpdateTaskArgs) -> Self {
        Self {
            id: args.id,
            task_title: args.task_title,
            task_desc: args.task_desc,
            staff_id: args.staff_id,
            task_status: args.task_status,
            task_type: args.task_type,
            task_time: args.task_time,
            plan_start_date: args.plan_start_date,
            task_finish_time: args.task_finish_time,
        }
    }
}

/// Parameters for the `query_tasks` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryTasksArgs {
    /// 页码，默认1
    #[serde(default)]
    pub page: Option<u32>,
    /// 每页数量，默认20，最大100
    #[serde(default)]
    pub page_size: Option<u32>,
    /// 任务状态，600待办、1500进行中、2000已完成
    #[serde(default)]
    pub status: Option<i64>,
    /// 负责人ID
    #[serde(default)]
    pub staff_id: Option<String>,
    /// 项目ID
    #[serde(default)]
    pub project_id: Option<i64>,
    /// 需求ID
    #[serde(default)]
    pub need_id: Option<i64>,
    /// 任务标题关键词
    #[serde(default)]
    pub task_title: Option<String>,
}

impl From<QueryTasksArgs> for TaskListQuery {
    fn from(args: QueryTasksArgs) -> Self {
        let paging = PaginationParams::resolve(args.page, args.page_size);
        Self {
            page: paging.page,
            page_size: paging.perpage,
            status: args.status,
            staff_id: args.staff_id,
            project_id: args.project_id,
            need_id: args.need_id,
            task_title: args.task_title,
        }
    }
}

/// Parameters for the `check_task` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckTaskArgs {
    /// 任务ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 验收评论
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<CheckTaskArgs> for CheckTaskParams {
    fn from(args: CheckTaskArgs) -> Self {
        Self {
            id: args.id,
            comment: args.comment,
        }
    }
}

/// Parameters for the `revoke_check_task` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RevokeCheckTaskArgs {
    /// 任务ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 撤销原因
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<RevokeCheckTaskArgs> for RevokeCheckTaskParams {
    fn from(args: RevokeCheckTaskArgs) -> Self {
        Self {
            id: args.id,
            reason: args.reason,
        }
    }
}

/// Parameters for the `update_project` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProjectArgs {
    /// 要更新的项目ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 新的项目名称
    #[serde(default)]
    pub project_name: Option<String>,
    /// 新的项目描述
    #[serde(default)]
    pub project_desc: Option<String>,
    /// 新的项目负责人ID
    #[serde(default)]
    pub charge_staff_id: Option<i64>,
    /// 新的项目状态
    #[serde(default)]
    pub project_status: Option<i64>,
    /// 新的计划开始时间 (YYYY-MM-DD)
    #[serde(default)]
    pub project_start_time: Option<String>,
    /// 新的计划完成时间 (YYYY-MM-DD)
    #[serde(default)]
    pub project_end_time: Option<String>,
}

impl From<UpdateProjectArgs> for UpdateProjectParams {
    fn from(args: UpdateProjectArgs) -> Self {
        Self {
            id: args.id,
            project_name: args.project_name,
            project_desc: args.project_desc,
            charge_staff_id: args.charge_staff_id,
            project_status: args.project_status,
            project_start_time: args.project_start_time,
            project_end_time: args.project_end_time,
        }
    }
}

/// Parameters for the `update_project_status` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProjectStatusArgs {
    /// 项目ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 新的项目状态
    pub project_status: i64,
}

impl From<UpdateProjectStatusArgs> for UpdateProjectStatusParams {
    fn from(args: UpdateProjectStatusArgs) -> Self {
        Self {
            id: args.id,
            project_status: args.project_status,
        }
    }
}

/// Parameters for the `create_need` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateNeedArgs {
    /// 需求名称，最多200个字符
    #[schemars(length(max = 200))]
    pub need_name: String,
    /// 所属项目ID
    #[serde(default)]
    pub project_id: Option<i64>,
    /// 负责人ID
    #[serde(default)]
    pub charge_staff_id: Option<i64>,
    /// 需求优先级
    #[serde(default)]
    pub need_level: Option<i64>,
    /// 需求状态
    #[serde(default)]
    pub need_status: Option<i64>,
    /// 需求描述，使用HTML格式
    #[serde(default)]
    pub need_content: Option<String>,
    /// 需求开始时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub need_start_date: Option<String>,
    /// 需求完成时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub need_finish_date: Option<String>,
    /// 父需求ID
    #[serde(default)]
    pub need_parent_id: Option<i64>,
}

impl CreateNeedArgs {
    pub fn validate(&self) -> Result<(), McpError> {
        check_len("need_name", &self.need_name, MAX_NEED_NAME_CHARS)
    }
}

impl From<CreateNeedArgs> for CreateNeedParams {
    fn from(args: CreateNeedArgs) -> Self {
        Self {
            need_name: args.need_name,
            project_id: args.project_id,
            charge_staff_id: args.charge_staff_id,
            need_level: args.need_level,
            need_status: args.need_status,
            need_content: args.need_content,
            need_start_date: args.need_start_date,
            need_finish_date: args.need_finish_date,
            need_parent_id: args.need_parent_id,
            from_channel: None,
        }
    }
}

/// Parameters for the `update_need` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateNeedArgs {
    /// 要更新的需求ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 新的需求名称，最多200个字符
    #[serde(default)]
    #[schemars(length(max = 200))]
    pub need_name: Option<String>,
    /// 新的所属项目ID
    #[serde(default)]
    pub project_id: Option<i64>,
    /// 新的需求状态
    #[serde(default)]
    pub need_status: Option<i64>,
    /// 新的负责人ID
    #[serde(default)]
    pub charge_staff_id: Option<i64>,
    /// 新的需求优先级
    #[serde(default)]
    pub need_level: Option<i64>,
    /// 新的需求描述，使用HTML格式
    #[serde(default)]
    pub need_content: Option<String>,
    /// 新的需求开始时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub need_start_date: Option<String>,
    /// 新的需求完成时间，格式：YYYY-MM-DD
    #[serde(default)]
    pub need_finish_date: Option<String>,
    /// 新的父需求ID
    #[serde(default)]
    pub need_parent_id: Option<i64>,
}

impl UpdateNeedArgs {
    pub fn validate(&self) -> Result<(), McpError> {
        match &self.need_name {
            Some(name) => check_len("need_name", name, MAX_NEED_NAME_CHARS),
            None => Ok(()),
        }
    }
}

impl From<UpdateNeedArgs> for UpdateNeedParams {
    fn from(args: UpdateNeedArgs) -> Self {
        Self {
            id: args.id,
            need_name: args.need_name,
            project_id: args.project_id,
            need_status: args.need_status,
            charge_staff_id: args.charge_staff_id,
            need_level: args.need_level,
            need_content: args.need_content,
            need_start_date: args.need_start_date,
            need_finish_date: args.need_finish_date,
            need_parent_id: args.need_parent_id,
        }
    }
}

/// Parameters for the `query_needs` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryNeedsArgs {
    /// 需求名称
    #[serde(default)]
    pub need_name: Option<String>,
    /// 需求优先级
    #[serde(default)]
    pub need_level: Option<String>,
    /// 需求状态，多个用逗号隔开
    #[serde(default)]
    pub need_status: Option<String>,
    /// 是否关联项目的，1是关联的0不关联的
    #[serde(default)]
    pub is_have_project_id: Option<i64>,
    /// 我的需求，是否是指派给我的 1是0否
    #[serde(default)]
    pub is_assign_staff: Option<i64>,
    /// 负责人ID，多个用英文逗号分隔
    #[serde(default)]
    pub charge_staff_ids: Option<String>,
    /// 创建人ID，多个用英文逗号分隔
    #[serde(default)]
    pub created_staff_ids: Option<String>,
    /// 需求开始时间下限，格式：YYYY-MM-DD
    #[serde(default)]
    pub start_start_time: Option<String>,
    /// 需求开始时间上限，格式：YYYY-MM-DD
    #[serde(default)]
    pub end_start_time: Option<String>,
    /// 需求完成时间上限，格式：YYYY-MM-DD
    #[serde(default)]
    pub end_finish_time: Option<String>,
    /// 创建时间下限，格式：YYYY-MM-DD
    #[serde(default)]
    pub start_add_time: Option<String>,
    /// 创建时间上限，格式：YYYY-MM-DD
    #[serde(default)]
    pub end_add_time: Option<String>,
    /// 更新时间下限，格式：YYYY-MM-DD
    #[serde(default)]
    pub start_update_time: Option<String>,
    /// 更新时间上限，格式：YYYY-MM-DD
    #[serde(default)]
    pub end_update_time: Option<String>,
    /// 实际完成时间下限，格式：YYYY-MM-DD
    #[serde(default)]
    pub start_actual_finish_date: Option<String>,
    /// 实际完成时间上限，格式：YYYY-MM-DD
    #[serde(default)]
    pub end_actual_finish_date: Option<String>,
    /// 父需求ID，多个用英文逗号隔开
    #[serde(default)]
    pub need_parent_id: Option<String>,
    /// 所属项目ID，多个用英文逗号隔开
    #[serde(default)]
    pub project_id: Option<String>,
    /// 页码，默认1
    #[serde(default)]
    pub page: Option<u32>,
    /// 每页数量，默认20，最大100
    #[serde(default)]
    pub perpage: Option<u32>,
    /// 排序方式，0 id排序，1优先级 2计划完成时间 3创建时间 4需求进度 5最后更新 6计划开始时间
    #[serde(default)]
    pub order_status: Option<i64>,
    /// 排序顺序，1升序0降序
    #[serde(default)]
    pub order_status_sort: Option<i64>,
}

impl From<QueryNeedsArgs> for NeedQuery {
    fn from(args: QueryNeedsArgs) -> Self {
        let paging = PaginationParams::resolve(args.page, args.perpage);
        Self {
            need_name: args.need_name,
            need_level: args.need_level,
            need_status: args.need_status,
            is_have_project_id: args.is_have_project_id,
            is_assign_staff: args.is_assign_staff,
            charge_staff_ids: args.charge_staff_ids,
            created_staff_ids: args.created_staff_ids,
            start_start_time: args.start_start_time,
            end_start_time: args.end_start_time,
            end_finish_time: args.end_finish_time,
            start_add_time: args.start_add_time,
            end_add_time: args.end_add_time,
            start_update_time: args.start_update_time,
            end_update_time: args.end_update_time,
            start_actual_finish_date: args.start_actual_finish_date,
            end_actual_finish_date: args.end_actual_finish_date,
            need_parent_id: args.need_parent_id,
            project_id: args.project_id,
            page: paging.page,
            perpage: paging.perpage,
            order_status: args.order_status,
            order_status_sort: args.order_status_sort,
        }
    }
}

/// Parameters for the `get_project_needs` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectNeedsArgs {
    /// 项目ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub project_id: i64,
    /// 需求状态，多个用逗号隔开
    #[serde(default)]
    pub need_status: Option<String>,
}

/// Parameters for the `submit_daily_report` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitDailyArgs {
    /// 日报内容，使用HTML格式。参考模板：已完成xxxx，未完成xxxx，下一步计划xxxx。
    pub content: String,
    /// 日报标题，如果未提供，则默认为“日报 - 日期”。
    #[serde(default)]
    pub title: Option<String>,
    /// 日报日期，格式为 YYYY-MM-DD。如果未提供，则默认为今天。
    #[serde(default)]
    pub daily_time: Option<String>,
}

/// Parameters for the `update_problem` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProblemArgs {
    /// 要更新的问题ID
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub id: i64,
    /// 新的问题标题
    #[serde(default)]
    pub problem_title: Option<String>,
    /// 新的问题状态
    #[serde(default)]
    pub problem_status: Option<i64>,
    /// 新的问题优先级
    #[serde(default)]
    pub problem_level: Option<i64>,
    /// 新的问题类型
    #[serde(default)]
    pub problem_type: Option<i64>,
    /// 新的问题归因，100 代码错误 200 数据问题 300 遗留问题 400 功能遗漏 500 需求误解 600 产品设计缺陷 700 无法重现 800 误报 900 其他
    #[serde(default)]
    pub problem_attribution: Option<i64>,
    /// 新的负责人ID
    #[serde(default)]
    pub assign_staff_id: Option<i64>,
    /// 需要提交的备注信息，支持富文本，用于消息推送，同时添加一条备注
    #[serde(default)]
    pub note_content_remark: Option<String>,
}

impl From<UpdateProblemArgs> for UpdateProblemParams {
    fn from(args: UpdateProblemArgs) -> Self {
        Self {
            id: args.id,
            problem_title: args.problem_title,
            problem_status: args.problem_status,
            problem_level: args.problem_level,
            problem_type: args.problem_type,
            problem_attribution: args.problem_attribution,
            assign_staff_id: args.assign_staff_id,
            note_content_remark: args.note_content_remark,
        }
    }
}
