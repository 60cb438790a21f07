//! MCP (Model Context Protocol) server.
//!
//! Exposes the YouTube search and transcript tools to AI assistants.
//! Implements JSON-RPC 2.0 over stdio, one message per line.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
