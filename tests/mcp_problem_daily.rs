//! Tests for the problem and daily report tool handlers.

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
async fn daily_report_converts_line_breaks_and_defaults_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Daily.AddOrUpdateDaily"))
        .and(body_partial_json(json!({
            "daily_time": "2024-05-20",
            "title": "日报 - 2024-05-20",
            "content": "完成接口联调<br>修复两个缺陷"
        })))
        .respond_with(ok(json!({"is_update": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request(
            "submit_daily_report",
            json!({"content": "完成接口联调\n修复两个缺陷", "daily_time": "2024-05-20"}),
        ))
        .await
        .unwrap();

    assert_eq!(extract_text(&result), "成功提交了 2024-05-20 的新日报。");
}

#[tokio::test]
async fn daily_report_update_of_today() {
    let mock_server = MockServer::start().await;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Daily.AddOrUpdateDaily"))
        .and(body_partial_json(json!({"daily_time": today, "title": "周五日报"})))
        .respond_with(ok(json!({"is_update": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request(
            "submit_daily_report",
            json!({"content": "复盘", "title": "周五日报"}),
        ))
        .await
        .unwrap();

    assert_eq!(extract_text(&result), format!("成功更新了 {today} 的日报。"));
}

#[tokio::test]
async fn my_problems_lists_with_labels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Problems.GetMyProblem"))
        .respond_with(ok(json!({
            "items": [{"id": 77, "problem_title": "首页白屏"}],
            "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("get_my_problems", json!({})))
        .await
        .unwrap();
    let text = extract_text(&result);

    assert!(text.starts_with("### 待你处理的问题 (共 1 个)"));
    assert!(text.contains("problem/problemDetail?id=77"));
    assert!(text.contains("(问题优先级: 未知优先级, 状态: 未知状态, 类型: 其他)"));
}

#[tokio::test]
async fn no_problems_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Problems.GetMyProblem"))
        .respond_with(ok(json!({})))
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request("get_my_problems", json!({})))
        .await
        .unwrap();
    assert_eq!(extract_text(&result), "你当前没有待处理的问题。");
}

#[tokio::test]
async fn update_problem_forwards_remark() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("s", "Platform.Problems.UpdateProblem"))
        .and(body_partial_json(json!({
            "id": 77,
            "problem_status": 3,
            "note_content_remark": "已修复"
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = server_for(&mock_server)
        .dispatch(request(
            "update_problem",
            json!({"id": 77, "problem_status": 3, "note_content_remark": "已修复"}),
        ))
        .await
        .unwrap();
    assert_eq!(extract_text(&result), "问题 77 已成功更新。");
}
