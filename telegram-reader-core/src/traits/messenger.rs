//! 消息平台查询抽象 Trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::types::{DialogInfo, MessageInfo};

/// Read-only query boundary over an authenticated messaging client.
///
/// Platform implementation:
/// - MCP server: `GrammersGateway` (grammers-client crate)
///
/// All methods delegate to the client library; implementations classify
/// entities into [`DialogInfo`]/[`MessageInfo`] at this boundary and never
/// leak library types upward.
#[async_trait]
pub trait MessengerGateway: Send + Sync {
    /// Whether the underlying transport is still believed to be alive.
    ///
    /// A `false` return tells the session manager to discard this handle
    /// and connect a fresh one.
    async fn is_connected(&self) -> bool;

    /// List all dialogs accessible to the authenticated user, classified.
    async fn list_dialogs(&self) -> CoreResult<Vec<DialogInfo>>;

    /// Messages in `dialog_id` with timestamp >= `since`, oldest first,
    /// at most `limit` entries.
    ///
    /// # Errors
    /// [`crate::error::CoreError::DialogNotFound`] when the identifier does
    /// not resolve to an accessible dialog.
    async fn messages_since(
        &self,
        dialog_id: i64,
        since: DateTime<Utc>,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>>;

    /// Messages in `dialog_id` matching `query` per the platform's search,
    /// in the order the platform returns them, at most `limit` entries.
    ///
    /// # Errors
    /// [`crate::error::CoreError::DialogNotFound`] when the identifier does
    /// not resolve to an accessible dialog.
    async fn search_messages(
        &self,
        dialog_id: i64,
        query: &str,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>>;
}
