//! HTTP transport
//!
//! The notes REST routes plus metadata and the `/mcp` JSON-RPC listener.

pub mod handlers;
pub mod notes;
