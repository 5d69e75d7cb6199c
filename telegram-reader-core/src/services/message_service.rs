//! 消息查询服务

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::services::SessionManager;
use crate::types::MessageInfo;

/// Read-only message queries over the shared client handle.
pub struct MessageService {
    sessions: Arc<SessionManager>,
}

impl MessageService {
    /// Create a message service instance.
    #[must_use]
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Messages from `dialog_id` with timestamp >= `since`, oldest first.
    pub async fn messages_since(
        &self,
        dialog_id: i64,
        since: DateTime<Utc>,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        let client = self.sessions.get().await?;

        log::info!("Searching for messages in {dialog_id} since {since} (limit: {limit})");
        let messages = client.messages_since(dialog_id, since, limit).await?;
        log::info!("Found {} messages since {since}", messages.len());

        Ok(messages)
    }

    /// Messages from `dialog_id` matching `query`, per the platform's
    /// server-side search semantics.
    pub async fn search(
        &self,
        dialog_id: i64,
        query: &str,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        let client = self.sessions.get().await?;

        log::info!("Searching for '{query}' in {dialog_id} (limit: {limit})");
        let messages = client.search_messages(dialog_id, query, limit).await?;
        log::info!("Found {} messages matching '{query}'", messages.len());

        Ok(messages)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{message_at, MockConnector, MockGateway};
    use crate::traits::MessengerConnector;
    use chrono::TimeZone;

    fn service(gateway: Arc<MockGateway>) -> MessageService {
        let connector = Arc::new(MockConnector::new(gateway));
        MessageService::new(Arc::new(SessionManager::new(
            connector as Arc<dyn MessengerConnector>,
        )))
    }

    #[tokio::test]
    async fn passes_bounds_through_to_gateway() {
        let gateway = Arc::new(MockGateway::default());
        let since = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();

        service(Arc::clone(&gateway))
            .messages_since(1001, since, 50)
            .await
            .unwrap();

        let calls = gateway.since_calls();
        assert_eq!(calls, vec![(1001, since, 50)]);
    }

    #[tokio::test]
    async fn returns_messages_oldest_first_as_delivered() {
        let gateway = Arc::new(MockGateway::default());
        gateway.set_messages(vec![
            message_at(1, "first", 2025, 10, 1),
            message_at(2, "second", 2025, 10, 2),
        ]);
        let since = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();

        let messages = service(gateway)
            .messages_since(1001, since, 50)
            .await
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert!(messages[0].date <= messages[1].date);
    }

    #[tokio::test]
    async fn search_records_query_and_limit() {
        let gateway = Arc::new(MockGateway::default());

        service(Arc::clone(&gateway))
            .search(1001, "meeting", 25)
            .await
            .unwrap();

        let calls = gateway.search_calls();
        assert_eq!(calls, vec![(1001, "meeting".to_string(), 25)]);
    }

    #[tokio::test]
    async fn unknown_dialog_surfaces_not_found() {
        let gateway = Arc::new(MockGateway::default());
        gateway.set_messages_error_not_found(4242);

        let err = service(gateway)
            .search(4242, "anything", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DialogNotFound(4242)));
    }
}
