//! 会话查询服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::SessionManager;
use crate::types::{DialogInfo, DialogKind};

/// Read-only dialog queries over the shared client handle.
pub struct DialogService {
    sessions: Arc<SessionManager>,
}

impl DialogService {
    /// Create a dialog service instance.
    #[must_use]
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// List all dialogs (conversations) accessible to the authenticated
    /// user, including private chats, groups, channels and Saved Messages.
    pub async fn list_dialogs(&self) -> CoreResult<Vec<DialogInfo>> {
        let client = self.sessions.get().await?;

        log::info!("Fetching all conversations...");
        let dialogs = client.list_dialogs().await?;
        log::info!("Found {} conversations", dialogs.len());

        Ok(dialogs)
    }

    /// Find the Saved Messages dialog, the account's self-chat.
    ///
    /// Every account has exactly one self-chat, so `None` should not occur
    /// in practice.
    pub async fn saved_messages(&self) -> CoreResult<Option<DialogInfo>> {
        Ok(self
            .list_dialogs()
            .await?
            .into_iter()
            .find(|dialog| dialog.kind == DialogKind::SavedMessages))
    }
}
