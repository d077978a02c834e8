//! Axum routes for `/mcp`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use rmcp::handler::server::ServerHandler;
use rmcp::model::CallToolRequestParam;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, BAD_SESSION};
use super::session::{Session, SessionRegistry};
use crate::mcp::YesDevServer;

/// Header correlating requests with a session.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Shared state for the HTTP transport.
#[derive(Clone)]
pub struct AppState {
    server: YesDevServer,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// State whose sessions are all cloned from `server`.
    pub fn new(server: YesDevServer) -> Self {
        Self {
            server,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// The axum router for this state.
    pub fn into_router(self) -> Router {
        Router::new()
            .route("/mcp", post(post_mcp).delete(delete_mcp).get(get_mcp))
            .with_state(self)
    }
}

/// Router for a fresh transport around `server`.
pub fn router(server: YesDevServer) -> Router {
    AppState::new(server).into_router()
}

/// Bind `host:port` and serve until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn serve(server: YesDevServer, host: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "YesDev MCP HTTP transport listening");
    axum::serve(listener, router(server)).await
}

fn rpc_error(status: StatusCode, error: JsonRpcError) -> Response {
    (status, Json(JsonRpcResponse::error(None, error))).into_response()
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
}

/// POST /mcp
async fn post_mcp(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::parse_error()),
    };

    let (is_batch, messages) = match payload {
        Value::Array(items) => (true, items),
        single => (false, vec![single]),
    };
    let requests: Vec<JsonRpcRequest> = match messages
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()
    {
        Ok(requests) => requests,
        Err(_) => return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::invalid_request()),
    };
    if requests.is_empty() {
        return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::invalid_request());
    }

    let session = match session_id(&headers) {
        Some(id) => match state.sessions.get(id) {
            Some(session) => session,
            None => {
                tracing::warn!(session = id, "request for unknown MCP session");
                return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::bad_session());
            }
        },
        None if requests.iter().any(JsonRpcRequest::is_initialize) => {
            state.sessions.create(state.server.clone())
        }
        None => return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::bad_session()),
    };

    let mut responses = Vec::with_capacity(requests.len());
    for request in requests {
        if let Some(response) = handle_message(&session, request).await {
            responses.push(response);
        }
    }

    let mut response = match (is_batch, responses.pop()) {
        (_, None) => StatusCode::ACCEPTED.into_response(),
        (false, Some(single)) => Json(single).into_response(),
        (true, Some(last)) => {
            responses.push(last);
            Json(responses).into_response()
        }
    };
    if let Ok(value) = HeaderValue::from_str(session.id()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }
    response
}

/// DELETE /mcp
async fn delete_mcp(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(id) = session_id(&headers) else {
        return rpc_error(StatusCode::BAD_REQUEST, JsonRpcError::bad_session());
    };
    match state.sessions.remove(id) {
        Some(_) => StatusCode::OK.into_response(),
        None => rpc_error(StatusCode::NOT_FOUND, JsonRpcError::session_not_found()),
    }
}

/// GET /mcp; server-initiated streams are not offered.
async fn get_mcp() -> Response {
    rpc_error(
        StatusCode::METHOD_NOT_ALLOWED,
        JsonRpcError::new(BAD_SESSION, "Method not allowed."),
    )
}

/// Handle one message; notifications produce no response.
async fn handle_message(session: &Session, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.is_notification() {
        if request.method == "notifications/initialized" {
            session.mark_initialized();
        }
        tracing::debug!(session = session.id(), method = %request.method, "notification");
        return None;
    }

    tracing::debug!(session = session.id(), method = %request.method, "request");
    let server = session.server();
    let outcome = match request.method.as_str() {
        "initialize" => to_result(&server.get_info()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": YesDevServer::tools() })),
        "tools/call" => call_tool(server, request.params).await,
        other => Err(JsonRpcError::method_not_found(other)),
    };

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(error) => JsonRpcResponse::error(request.id, error),
    })
}

async fn call_tool(server: &YesDevServer, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let request: CallToolRequestParam = serde_json::from_value(params.unwrap_or_else(|| json!({})))
        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;
    match server.dispatch(request).await {
        Ok(result) => to_result(&result),
        Err(e) => Err(JsonRpcError::new(e.code.0, e.message.to_string())),
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize MCP result");
        JsonRpcError::internal_error()
    })
}
