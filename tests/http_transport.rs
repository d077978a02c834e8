//! Tests for the session-keyed HTTP transport.
//!
//! Drives the axum router directly with tower's `oneshot`.

#![cfg(feature = "http")]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use yesdev_mcp::http::{AppState, SESSION_HEADER};
use yesdev_mcp::mcp::YesDevServer;
use yesdev_mcp::YesDevClient;

fn state() -> AppState {
    let client = YesDevClient::new("test-token", "http://127.0.0.1:9/api.php").unwrap();
    AppState::new(YesDevServer::new(client))
}

fn post(session: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(id) = session {
        builder = builder.header(SESSION_HEADER, id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri("/mcp");
    if let Some(id) = session {
        builder = builder.header(SESSION_HEADER, id);
    }
    builder.body(Body::empty()).unwrap()
}

fn initialize() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "0"}
        }
    })
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let session = response
        .headers()
        .get(SESSION_HEADER)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, session, body)
}

async fn open_session(router: &Router) -> String {
    let (status, session, body) = send(router, post(None, initialize())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["serverInfo"]["name"], "yesdev-mcp");
    session.expect("initialize should return a session id")
}

#[tokio::test]
async fn request_without_session_is_rejected() {
    let router = state().into_router();

    let (status, _, body) = send(
        &router,
        post(None, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32000);
}

#[tokio::test]
async fn initialize_creates_session() {
    let state = state();
    let router = state.clone().into_router();

    let session = open_session(&router).await;
    assert!(!session.is_empty());
    assert_eq!(state.sessions().len(), 1);
    assert!(state.sessions().get(&session).is_some());
}

#[tokio::test]
async fn session_lists_tools() {
    let state = state();
    let router = state.clone().into_router();
    let session = open_session(&router).await;
    assert!(!state.sessions().get(&session).unwrap().is_initialized());

    let (status, _, body) = send(
        &router,
        post(
            Some(&session),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_null());
    assert!(state.sessions().get(&session).unwrap().is_initialized());

    let (status, echoed, body) = send(
        &router,
        post(Some(&session), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed.as_deref(), Some(session.as_str()));
    assert_eq!(body["id"], 2);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn unknown_tool_and_method_are_rpc_errors() {
    let router = state().into_router();
    let session = open_session(&router).await;

    let (status, _, body) = send(
        &router,
        post(
            Some(&session),
            json!([
                {"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "nope"}},
                {"jsonrpc": "2.0", "id": 4, "method": "resources/list"}
            ]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let responses = body.as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32602);
    assert_eq!(responses[1]["error"]["code"], -32601);
}

#[tokio::test]
async fn unknown_session_is_rejected() {
    let router = state().into_router();

    let (status, _, body) = send(
        &router,
        post(
            Some("no-such-session"),
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32000);
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let router = state().into_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/mcp")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn delete_terminates_session() {
    let state = state();
    let router = state.clone().into_router();
    let session = open_session(&router).await;

    let (status, _, _) = send(&router, delete(Some(&session))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.sessions().is_empty());

    let (status, _, body) = send(&router, delete(Some(&session))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], -32001);

    let (status, _, _) = send(&router, delete(None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let router = state().into_router();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
