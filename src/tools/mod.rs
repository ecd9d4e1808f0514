//! Tool implementations
//!
//! Plain functions behind the MCP tools; each returns a serializable response
//! or a user-facing error message.

pub mod nutrition;
pub mod status;
