// MCP (Model Context Protocol) server for the Zoom Cloud API.
// Exposes token refresh, recording listing, recording details, and
// meeting transcript fetching as tools for agent clients.

pub mod dispatch;
pub mod protocol;
pub mod server;
pub mod tools;

pub use dispatch::Dispatcher;
pub use server::McpServer;
