//! Model Context Protocol server handling and JSON-RPC implementations
//!
//! Protocol-level validation, negotiation, formatting and routing, plus the stdio
//! transport. The HTTP transport lives in `crate::http`.

pub mod rpc;
pub mod server;
pub mod stdio;
