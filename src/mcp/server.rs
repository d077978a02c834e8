//! MCP Server handler for the YesDev API.

use std::fmt::Display;
use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Settings;
use crate::format::{RenderContext, WebLinks};
use crate::labels::LabelCache;
use crate::mcp::params::*;
use crate::YesDevClient;

type JsonObject = serde_json::Map<String, Value>;

/// Name reported in `initialize`.
pub const SERVER_NAME: &str = "yesdev-mcp";

/// One entry of the tool catalog.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    schema: fn() -> Arc<JsonObject>,
}

impl ToolSpec {
    /// The rmcp descriptor for this tool.
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, (self.schema)())
    }
}

macro_rules! tool {
    ($name:literal, $args:ty, $description:literal) => {
        ToolSpec {
            name: $name,
            description: $description,
            schema: YesDevServer::schema::<$args>,
        }
    };
}

/// Every tool this server offers, in listing order.
pub static TOOLS: &[ToolSpec] = &[
    tool!("search_staff", SearchStaffArgs, "根据员工姓名或工号搜索员工信息，获取对应的员工ID"),
    tool!("get_workgroup_list", NoArgs, "获取所有的工作组列表，获取对应的工作组ID"),
    tool!("get_my_profile", NoArgs, "获取我的个人资料，以及对应的员工ID"),
    tool!(
        "create_task",
        CreateTaskArgs,
        "创建一个新的YesDev任务，单个任务工时推荐不超4小时，如果任务工时超过8小时，请拆分成多个任务"
    ),
    tool!("get_task_detail", IdArgs, "获取指定任务的详细信息"),
    tool!("update_task", UpdateTaskArgs, "按需更新任务的信息"),
    tool!("remove_task", IdArgs, "删除指定的任务"),
    tool!("query_tasks", QueryTasksArgs, "查询任务列表，支持分页以及按状态、负责人、项目、需求筛选"),
    tool!("check_task", CheckTaskArgs, "对任务进行验收"),
    tool!("revoke_check_task", RevokeCheckTaskArgs, "撤销已验收的任务"),
    tool!("get_my_project_list", NoArgs, "获取我参与的、正在进行的项目列表"),
    tool!("get_project_detail", IdArgs, "获取指定ID的项目的详细信息"),
    tool!("update_project", UpdateProjectArgs, "局部更新指定ID的项目的信息"),
    tool!("update_project_status", UpdateProjectStatusArgs, "更新指定项目的状态"),
    tool!("create_need", CreateNeedArgs, "创建一个新的YesDev需求"),
    tool!("update_need", UpdateNeedArgs, "按需更新指定ID的需求信息"),
    tool!("get_need_detail", IdArgs, "获取指定ID的需求的详细信息"),
    tool!("get_need_detail_lite", IdArgs, "获取指定ID的需求的简化信息"),
    tool!("remove_need", IdArgs, "删除指定ID的需求"),
    tool!("query_needs", QueryNeedsArgs, "根据多种条件查询需求列表"),
    tool!("get_project_needs", ProjectNeedsArgs, "获取指定项目的全部需求列表"),
    tool!("get_sub_needs", IdArgs, "获取指定父需求的子需求列表"),
    tool!("submit_daily_report", SubmitDailyArgs, "提交或更新当天的日报内容"),
    tool!("get_my_problems", NoArgs, "获取指派给我的、待我处理的问题列表"),
    tool!(
        "update_problem",
        UpdateProblemArgs,
        "更新问题的信息，例如状态、负责人、问题归因、问题类型、备注等"
    ),
];

/// YesDev MCP Server.
///
/// Implements the MCP ServerHandler trait. Each tool validates its
/// arguments, performs exactly one YesDev call and renders the result as
/// markdown. Remote failures come back as error-flagged tool results, never
/// as protocol errors.
///
/// # Example
///
/// ```no_run
/// use yesdev_mcp::mcp::YesDevServer;
///
/// # async fn example() -> yesdev_mcp::Result<()> {
/// let server = YesDevServer::from_env()?;
/// server.initialize_labels().await;
/// // Server can now be used with an rmcp transport
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct YesDevServer {
    pub(crate) client: Arc<YesDevClient>,
    pub(crate) labels: Arc<LabelCache>,
    pub(crate) links: Arc<WebLinks>,
}

impl std::fmt::Debug for YesDevServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YesDevServer")
            .field("client", &self.client)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl YesDevServer {
    /// Create a server from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `YESDEV_ACCESS_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_settings(&Settings::from_env()?)
    }

    /// Create a server from resolved settings, with a fresh label cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
    pub fn from_settings(settings: &Settings) -> crate::Result<Self> {
        let client = YesDevClient::from_settings(settings)?;
        Ok(Self::with_parts(
            client,
            Arc::new(LabelCache::new()),
            WebLinks::new(&settings.web_url),
        ))
    }

    /// Create a server with an existing client and default deep links.
    pub fn new(client: YesDevClient) -> Self {
        Self::with_parts(client, Arc::new(LabelCache::new()), WebLinks::default())
    }

    /// Create a server sharing an existing label cache.
    pub fn with_parts(client: YesDevClient, labels: Arc<LabelCache>, links: WebLinks) -> Self {
        Self {
            client: Arc::new(client),
            labels,
            links: Arc::new(links),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &YesDevClient {
        &self.client
    }

    /// The label cache used by every formatter.
    pub fn labels(&self) -> &Arc<LabelCache> {
        &self.labels
    }

    /// Load display labels. Never fails; see [`LabelCache::initialize`].
    pub async fn initialize_labels(&self) {
        self.labels.initialize(self.client.as_ref()).await;
    }

    /// All tool descriptors.
    pub fn tools() -> Vec<Tool> {
        TOOLS.iter().map(ToolSpec::to_tool).collect()
    }

    pub(crate) fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.labels, &self.links)
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<JsonObject> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            Value::Object(map) => Arc::new(map),
            _ => Arc::new(JsonObject::new()),
        }
    }

    fn parse<T: DeserializeOwned>(args: Value) -> Result<T, McpError> {
        serde_json::from_value(args).map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    /// Plain text success result.
    pub(crate) fn text(text: impl Into<String>) -> CallToolResult {
        CallToolResult::success(vec![Content::text(text.into())])
    }

    /// Error-flagged result reading `{action}失败: {cause}`.
    pub(crate) fn failure(action: &str, cause: impl Display) -> CallToolResult {
        tracing::warn!(action, error = %cause, "tool call failed");
        CallToolResult {
            content: vec![Content::text(format!("{action}失败: {cause}"))],
            is_error: Some(true),
        }
    }

    /// Render a successful outcome, or turn the error into a failure result.
    pub(crate) fn respond<T>(
        action: &str,
        outcome: crate::Result<T>,
        render: impl FnOnce(T) -> String,
    ) -> CallToolResult {
        match outcome {
            Ok(value) => Self::text(render(value)),
            Err(e) => Self::failure(action, e),
        }
    }

    /// Today's date in local time, as `YYYY-MM-DD`.
    pub(crate) fn today() -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }

    /// Run one tool by name.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` for an unknown tool or arguments that do not
    /// match the tool's schema. Remote failures are `Ok` with `is_error` set.
    pub async fn dispatch(&self, request: CallToolRequestParam) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or(serde_json::json!({}));
        tracing::debug!(tool = %request.name, "dispatching tool call");

        match request.name.as_ref() {
            "search_staff" => Ok(self.search_staff(Self::parse(args)?).await),
            "get_workgroup_list" => Ok(self.get_workgroup_list().await),
            "get_my_profile" => Ok(self.get_my_profile().await),
            "create_task" => self.create_task(Self::parse(args)?).await,
            "get_task_detail" => Ok(self.get_task_detail(Self::parse(args)?).await),
            "update_task" => self.update_task(Self::parse(args)?).await,
            "remove_task" => Ok(self.remove_task(Self::parse(args)?).await),
            "query_tasks" => Ok(self.query_tasks(Self::parse(args)?).await),
            "check_task" => Ok(self.check_task(Self::parse(args)?).await),
            "revoke_check_task" => Ok(self.revoke_check_task(Self::parse(args)?).await),
            "get_my_project_list" => Ok(self.get_my_project_list().await),
            "get_project_detail" => Ok(self.get_project_detail(Self::parse(args)?).await),
            "update_project" => Ok(self.update_project(Self::parse(args)?).await),
            "update_project_status" => Ok(self.update_project_status(Self::parse(args)?).await),
            "create_need" => self.create_need(Self::parse(args)?).await,
            "update_need" => self.update_need(Self::parse(args)?).await,
            "get_need_detail" => Ok(self.get_need_detail(Self::parse(args)?).await),
            "get_need_detail_lite" => Ok(self.get_need_detail_lite(Self::parse(args)?).await),
            "remove_need" => Ok(self.remove_need(Self::parse(args)?).await),
            "query_needs" => Ok(self.query_needs(Self::parse(args)?).await),
            "get_project_needs" => Ok(self.get_project_needs(Self::parse(args)?).await),
            "get_sub_needs" => Ok(self.get_sub_needs(Self::parse(args)?).await),
            "submit_daily_report" => Ok(self.submit_daily_report(Self::parse(args)?).await),
            "get_my_problems" => Ok(self.get_my_problems().await),
            "update_problem" => Ok(self.update_problem(Self::parse(args)?).await),
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

impl ServerHandler for YesDevServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "YesDev MCP Server - 管理YesDev的任务、项目、需求、日报和问题。".to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: Self::tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(request).await
    }
}
