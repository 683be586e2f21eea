//! Note tools and resources exposed over the MCP protocol
//!
//! Every handler works against the `NoteBackend` held in `AppState`, so the same
//! surface serves both the direct file store and the REST-backed client.

pub mod resources;
pub mod tools;
pub mod utils;
