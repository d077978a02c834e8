//! Tests for the MCP server surface: server info and the tool catalog.

use rmcp::handler::server::ServerHandler;
use yesdev_mcp::mcp::{YesDevServer, SERVER_NAME, TOOLS};
use yesdev_mcp::YesDevClient;

fn server() -> YesDevServer {
    let client = YesDevClient::new("test-token", "http://127.0.0.1:9/api.php").unwrap();
    YesDevServer::new(client)
}

#[test]
fn yesdev_server_implements_server_handler() {
    fn assert_server_handler<T: ServerHandler>() {}
    assert_server_handler::<YesDevServer>();
}

#[test]
fn get_info_reports_name_and_tools_capability() {
    let info = server().get_info();
    assert_eq!(info.server_info.name, SERVER_NAME);
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.capabilities.tools.is_some());
}

#[test]
fn tool_catalog_has_every_tool() {
    let names: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
    for expected in [
        "search_staff",
        "get_workgroup_list",
        "get_my_profile",
        "create_task",
        "get_task_detail",
        "update_task",
        "remove_task",
        "query_tasks",
        "check_task",
        "revoke_check_task",
        "get_my_project_list",
        "get_project_detail",
        "update_project",
        "update_project_status",
        "create_need",
        "update_need",
        "get_need_detail",
        "get_need_detail_lite",
        "remove_need",
        "query_needs",
        "get_project_needs",
        "get_sub_needs",
        "submit_daily_report",
        "get_my_problems",
        "update_problem",
    ] {
        assert!(names.contains(&expected), "missing tool {expected}");
    }
    assert_eq!(YesDevServer::tools().len(), names.len());
}

#[test]
fn create_task_schema_requires_title() {
    let tool = TOOLS
        .iter()
        .find(|t| t.name == "create_task")
        .unwrap()
        .to_tool();
    let required = tool.input_schema.get("required").unwrap();
    assert!(required
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "task_title"));
}
