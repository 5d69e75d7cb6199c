//! MCP Server implementation for Telegram Reader.
//!
//! Exposes 4 read-only tools for AI agents to browse a Telegram account's
//! conversations.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

use telegram_reader_core::error::CoreError;
use telegram_reader_core::services::{DialogService, MessageService, SessionManager};
use telegram_reader_core::utils::datetime::parse_since_date;

use crate::output;
use crate::schemas::{
    GetSavedMessagesIdParams, ListConversationsParams, ReadMessagesParams, SearchMessagesParams,
};

/// Message count used when the caller does not ask for one.
const DEFAULT_MESSAGE_LIMIT: usize = 50;
/// Hard cap on the message count, regardless of what the caller asks for.
const MAX_MESSAGE_LIMIT: usize = 200;

/// Map a core error onto the MCP error surface.
///
/// Expected errors (bad input, unknown dialog) keep their message at warn
/// level; everything else is logged as an error. Library messages are
/// preserved verbatim either way.
fn map_core_error(context: &str, error: &CoreError) -> McpError {
    if error.is_expected() {
        tracing::warn!("{context} error: {error}");
        McpError::invalid_params(error.to_string(), None)
    } else {
        tracing::error!("{context} error: {error}");
        McpError::internal_error(error.to_string(), None)
    }
}

fn clamp_limit(limit: Option<u32>) -> usize {
    limit.map_or(DEFAULT_MESSAGE_LIMIT, |requested| {
        usize::try_from(requested).map_or(MAX_MESSAGE_LIMIT, |n| n.min(MAX_MESSAGE_LIMIT))
    })
}

/// MCP Server for Telegram Reader.
///
/// Provides AI agents with read-only access to Telegram conversations
/// through the Model Context Protocol.
#[derive(Clone)]
pub struct TelegramReaderMcp {
    /// Dialog service for conversation listings.
    dialogs: Arc<DialogService>,
    /// Message service for retrieval and search.
    messages: Arc<MessageService>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl TelegramReaderMcp {
    /// Create a new MCP server instance over a shared session manager.
    #[must_use]
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self {
            dialogs: Arc::new(DialogService::new(Arc::clone(&sessions))),
            messages: Arc::new(MessageService::new(sessions)),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl TelegramReaderMcp {
    /// List all conversations accessible to the authenticated user.
    #[tool(
        description = "List all Telegram conversations accessible to the authenticated user, including private chats, groups, channels, and Saved Messages"
    )]
    async fn list_conversations(
        &self,
        _params: Parameters<ListConversationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let dialogs = self
            .dialogs
            .list_dialogs()
            .await
            .map_err(|e| map_core_error("List conversations", &e))?;

        if dialogs.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No conversations found.",
            )]));
        }

        Ok(CallToolResult::success(vec![Content::text(
            output::format_conversations(&dialogs),
        )]))
    }

    /// Read messages from a conversation since a specified date.
    #[tool(
        description = "Read messages from a Telegram conversation since a specified date (ISO format), oldest first"
    )]
    async fn read_messages(
        &self,
        Parameters(params): Parameters<ReadMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        // Malformed dates come back as text so the agent can self-correct.
        let Ok(since) = parse_since_date(&params.since_date) else {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "Error: Invalid date format '{}'. Use ISO format like '2025-10-01' or '2025-10-01T14:30:00'",
                params.since_date
            ))]));
        };

        let limit = clamp_limit(params.limit);

        let messages = self
            .messages
            .messages_since(params.dialog_id, since, limit)
            .await
            .map_err(|e| map_core_error("Read messages", &e))?;

        if messages.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "No messages found in dialog {} since {}",
                params.dialog_id, params.since_date
            ))]));
        }

        let title = format!(
            "Messages from dialog {} since {}:",
            params.dialog_id, params.since_date
        );
        Ok(CallToolResult::success(vec![Content::text(
            output::format_messages(&title, &messages),
        )]))
    }

    /// Search for messages in a conversation matching a query.
    #[tool(
        description = "Search for messages in a Telegram conversation matching a query string"
    )]
    async fn search_messages(
        &self,
        Parameters(params): Parameters<SearchMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = clamp_limit(params.limit);

        let messages = self
            .messages
            .search(params.dialog_id, &params.query, limit)
            .await
            .map_err(|e| map_core_error("Search messages", &e))?;

        if messages.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "No messages found in dialog {} matching '{}'",
                params.dialog_id, params.query
            ))]));
        }

        let title = format!(
            "Messages in dialog {} matching '{}':",
            params.dialog_id, params.query
        );
        Ok(CallToolResult::success(vec![Content::text(
            output::format_messages(&title, &messages),
        )]))
    }

    /// Get the dialog ID for Saved Messages.
    #[tool(
        description = "Get the dialog ID of your Saved Messages (the account's self-chat)"
    )]
    async fn get_saved_messages_id(
        &self,
        _params: Parameters<GetSavedMessagesIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let saved = self
            .dialogs
            .saved_messages()
            .await
            .map_err(|e| map_core_error("Get saved messages id", &e))?;

        let text = saved.map_or_else(
            || {
                "Saved Messages not found. This shouldn't happen - try list_conversations() instead."
                    .to_string()
            },
            |dialog| format!("Your Saved Messages ID is: {}", dialog.id),
        );

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for TelegramReaderMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Telegram Reader MCP Server - Read-only access to a Telegram account's conversations. \
                 Use list_conversations to see all dialogs with their IDs, \
                 read_messages to fetch messages from a dialog since a date, \
                 search_messages to find messages matching a query, and \
                 get_saved_messages_id to locate the Saved Messages self-chat. \
                 No write or send capability is exposed."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
