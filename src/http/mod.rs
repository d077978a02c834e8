//! Session-keyed HTTP transport for the MCP server.
//!
//! `POST /mcp` carries JSON-RPC traffic, `DELETE /mcp` ends a session and
//! the `Mcp-Session-Id` header correlates requests. Each session holds its
//! own [`YesDevServer`](crate::mcp::YesDevServer) handle; sessions share the
//! API client and the label cache.

mod jsonrpc;
mod router;
mod session;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use router::{router, serve, AppState, SESSION_HEADER};
pub use session::{Session, SessionRegistry};
