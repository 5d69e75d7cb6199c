//! MCP tool parameter schemas
//!
//! Defines the input parameter structures for all MCP tools.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for `list_conversations` tool.
///
/// This tool takes no parameters, but we need an empty struct for the schema.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListConversationsParams {}

/// Parameters for `read_messages` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadMessagesParams {
    /// The dialog ID from `list_conversations`.
    #[schemars(description = "The dialog ID from list_conversations()")]
    pub dialog_id: i64,

    /// ISO format date/time lower bound.
    #[schemars(description = "ISO format date/time (e.g., \"2025-10-01\" or \"2025-10-01T14:30:00\")")]
    pub since_date: String,

    /// Maximum number of messages to retrieve (default: 50, max: 200).
    #[schemars(description = "Maximum number of messages to retrieve (default: 50, max: 200)")]
    pub limit: Option<u32>,
}

/// Parameters for `search_messages` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchMessagesParams {
    /// The dialog ID from `list_conversations`.
    #[schemars(description = "The dialog ID from list_conversations()")]
    pub dialog_id: i64,

    /// Search query string to match in messages.
    #[schemars(description = "Search query string to match in messages")]
    pub query: String,

    /// Maximum number of messages to retrieve (default: 50, max: 200).
    #[schemars(description = "Maximum number of messages to retrieve (default: 50, max: 200)")]
    pub limit: Option<u32>,
}

/// Parameters for `get_saved_messages_id` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSavedMessagesIdParams {}
