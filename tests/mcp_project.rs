//! Tests for the project tool handlers.

use std::sync::Arc;

use rmcp::model::{CallToolRequestParam, CallToolResult, RawContent};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yesdev_mcp::format::WebLinks;
use yesdev_mcp::mcp::YesDevServer;
use yesdev_mcp::{LabelCache, YesDevClient};

fn client_for(mock_server: &MockServer) -> YesDevClient {
    YesDevClient::new("test-token", &format!("{}/api.php", mock_server.uri())).unwrap()
}

fn request(name: &'static str, arguments: Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments.as_object().cloned(),
    }
}

fn extract_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(t) => t.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ret": 200, "data": data, "msg": ""}))
}

async fn mount_global_config(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Config.GetGlobalConfig"))
        .respond_with(ok(json!({
            "alias_list": {
                "PROJECT_STATUS": {
                    "1": {"name": "未开始"},
                    "2": {"name": "进行中"},
                    "3": {"name": "已完成"}
                }
            }
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn my_project_list_uses_loaded_labels() {
    let mock_server = MockServer::start().await;
    mount_global_config(&mock_server).await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Projects.GetMyProjectList"))
        .respond_with(ok(json!({
            "items": [{"id": 3, "project_name": "官网改版", "project_status": 2}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = YesDevServer::with_parts(
        client_for(&mock_server),
        Arc::new(LabelCache::new()),
        WebLinks::new("https://yesdev.example/platform"),
    );
    server.initialize_labels().await;
    // A second call must not fetch the configuration again.
    server.initialize_labels().await;
    assert!(server.labels().is_ready());

    let result = server
        .dispatch(request("get_my_project_list", json!({})))
        .await
        .unwrap();
    let text = extract_text(&result);

    assert!(text.starts_with("### 你的项目列表"));
    assert!(text.contains(
        "- [官网改版](https://yesdev.example/platform/#/project/project-detail?id=3) (状态: 进行中)"
    ));
}

#[tokio::test]
async fn empty_project_list_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Projects.GetMyProjectList"))
        .respond_with(ok(json!({"items": [], "total": 0})))
        .mount(&mock_server)
        .await;

    let result = YesDevServer::new(client_for(&mock_server))
        .dispatch(request("get_my_project_list", json!({})))
        .await
        .unwrap();
    assert_eq!(extract_text(&result), "你当前没有参与任何进行中的项目。");
}

#[tokio::test]
async fn update_project_status_reports_label() {
    let mock_server = MockServer::start().await;
    mount_global_config(&mock_server).await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Projects.UpdateProjectStatus"))
        .and(body_partial_json(json!({"id": 3, "project_status": 3})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = YesDevServer::new(client_for(&mock_server));
    server.initialize_labels().await;

    let result = server
        .dispatch(request("update_project_status", json!({"id": 3, "project_status": 3})))
        .await
        .unwrap();
    assert_eq!(extract_text(&result), "项目 3 的状态已更新为 已完成。");
}

#[tokio::test]
async fn failed_label_load_falls_back_to_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Config.GetGlobalConfig"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Projects.GetProjectDetail"))
        .and(body_partial_json(json!({"id": 4})))
        .respond_with(ok(json!({"id": 4, "project_name": "数据中台", "project_status": 2})))
        .mount(&mock_server)
        .await;

    let server = YesDevServer::new(client_for(&mock_server));
    server.initialize_labels().await;
    assert!(!server.labels().is_ready());

    let result = server
        .dispatch(request("get_project_detail", json!({"id": 4})))
        .await
        .unwrap();
    let text = extract_text(&result);

    assert!(!result.is_error.unwrap_or(false));
    assert!(text.starts_with("### 项目详情: 数据中台"));
    assert!(text.contains("未知状态"));
}

#[tokio::test]
async fn update_project_sends_partial_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Projects.UpdateProject"))
        .and(body_partial_json(json!({"id": 3, "project_name": "官网改版二期"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = YesDevServer::new(client_for(&mock_server))
        .dispatch(request("update_project", json!({"id": 3, "project_name": "官网改版二期"})))
        .await
        .unwrap();
    assert_eq!(extract_text(&result), "项目 3 更新成功！");
}
