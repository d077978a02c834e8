//! Tests for the requirement (需求) tool handlers.

use rmcp::model::{CallToolRequestParam, CallToolResult, RawContent};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yesdev_mcp::mcp::YesDevServer;
use yesdev_mcp::YesDevClient;

fn server_for(mock_server: &MockServer) -> YesDevServer {
    let client =
        YesDevClient::new("test-token", &format!("{}/api.php", mock_server.uri())).unwrap();
    YesDevServer::new(client)
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

#[tokio::test]
async fn create_need_stamps_provenance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.CreateNeed"))
        .and(body_partial_json(json!({
            "need_name": "支持导出报表",
            "need_content": "<p>按月导出</p><p><br>需求创建来自AI助手</p>",
            "from_channel": "mcp"
        })))
        .respond_with(ok(json!({"id": 301})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request(
            "create_need",
            json!({"need_name": "支持导出报表", "need_content": "<p>按月导出</p>"}),
        ))
        .await
        .unwrap();

    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(extract_text(&result), "新需求已成功创建，需求ID是 301");
}

#[tokio::test]
async fn create_need_rejects_long_name() {
    let mock_server = MockServer::start().await;

    let err = server_for(&mock_server)
        .dispatch(request("create_need", json!({"need_name": "名".repeat(201)})))
        .await
        .unwrap_err();
    assert!(err.message.contains("200"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn need_detail_accepts_wrapped_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.GetNeedDetail"))
        .and(body_partial_json(json!({"id": 88})))
        .respond_with(ok(json!({
            "need": {
                "id": 88,
                "need_name": "单点登录",
                "charge_staff_name": "王五",
                "project_name": "统一账号"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("get_need_detail", json!({"id": 88})))
        .await
        .unwrap();
    let text = extract_text(&result);

    assert!(text.starts_with("### 需求名称: 单点登录"));
    assert!(text.contains("**负责人**: 王五"));
    assert!(text.contains("**创建人**: 未设置"));
    assert!(text.contains("requirements/reqm-detail?id=88"));
}

#[tokio::test]
async fn need_detail_lite_accepts_bare_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.GetNeedDetailLite"))
        .respond_with(ok(json!({"id": 89, "need_name": "消息推送"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("get_need_detail_lite", json!({"id": 89})))
        .await
        .unwrap();
    assert!(extract_text(&result).starts_with("### 需求名称: 消息推送"));
}

#[tokio::test]
async fn project_needs_empty_list_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.GetProjectNeedList"))
        .and(body_partial_json(json!({"project_id": 12, "need_status": "1,2"})))
        .respond_with(ok(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request(
            "get_project_needs",
            json!({"project_id": 12, "need_status": "1,2"}),
        ))
        .await
        .unwrap();

    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(extract_text(&result), "该项目下没有需求。");
}

#[tokio::test]
async fn sub_needs_lists_children() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.GetSubNeedList"))
        .and(body_partial_json(json!({"need_id": 40})))
        .respond_with(ok(json!({"list": [
            {"id": 41, "need_name": "子需求A"},
            {"id": 42, "need_name": "子需求B"}
        ]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("get_sub_needs", json!({"id": 40})))
        .await
        .unwrap();
    let text = extract_text(&result);

    assert!(text.starts_with("### 子需求列表"));
    assert!(text.contains("[子需求A]"));
    assert!(text.contains("[子需求B]"));
}

#[tokio::test]
async fn query_needs_sends_paging_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.QueryNeeds"))
        .and(body_partial_json(json!({"page": 1, "perpage": 20, "need_name": "导出"})))
        .respond_with(ok(json!({"items": [{"id": 5, "need_name": "导出报表"}], "total": "1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("query_needs", json!({"need_name": "导出"})))
        .await
        .unwrap();
    assert!(extract_text(&result).starts_with("### 需求列表 (共 1 个)"));
}

#[tokio::test]
async fn remove_need_failure_uses_unknown_error_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Needs.RemoveNeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ret": 403, "msg": ""})))
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("remove_need", json!({"id": 9})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(extract_text(&result), "删除需求失败: 未知错误");
}
