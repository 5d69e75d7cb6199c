//! Shared client session management
//!
//! Owns the single authenticated client handle for the process. Constructed
//! once at startup and shared by reference with the query services, instead
//! of living behind a hidden global.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::CoreResult;
use crate::traits::{MessengerConnector, MessengerGateway};

/// Lazily connects and hands out the shared client handle.
///
/// Invariant: at most one live authenticated handle exists per process. The
/// mutex is scoped to the whole get-or-create sequence, so concurrent
/// callers never race to create two sessions and all observe the same
/// handle. A failed connect leaves no stored handle behind.
pub struct SessionManager {
    connector: Arc<dyn MessengerConnector>,
    client: Mutex<Option<Arc<dyn MessengerGateway>>>,
}

impl SessionManager {
    /// Create a session manager around a connector.
    #[must_use]
    pub fn new(connector: Arc<dyn MessengerConnector>) -> Self {
        Self {
            connector,
            client: Mutex::new(None),
        }
    }

    /// Get the shared client handle, connecting or reconnecting if needed.
    ///
    /// The handle is created on first use and recreated when the stored one
    /// reports itself disconnected; it is never explicitly torn down.
    pub async fn get(&self) -> CoreResult<Arc<dyn MessengerGateway>> {
        let mut guard = self.client.lock().await;

        if let Some(client) = guard.as_ref() {
            if client.is_connected().await {
                return Ok(Arc::clone(client));
            }
            log::info!("Client disconnected, reconnecting");
        }

        let client = self.connector.connect().await?;
        log::info!("Telegram client connected");
        *guard = Some(Arc::clone(&client));

        Ok(client)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{MockConnector, MockGateway};
    use std::time::Duration;

    #[tokio::test]
    async fn concurrent_first_calls_connect_once() {
        let gateway = Arc::new(MockGateway::default());
        let connector = Arc::new(MockConnector::new(Arc::clone(&gateway)).with_delay(
            Duration::from_millis(20),
        ));
        let manager = Arc::new(SessionManager::new(
            Arc::clone(&connector) as Arc<dyn MessengerConnector>
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(async move { manager.get().await }));
        }

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(connector.connect_count(), 1);
        for client in &clients {
            assert!(Arc::ptr_eq(client, &clients[0]));
        }
    }

    #[tokio::test]
    async fn reuses_connected_handle() {
        let gateway = Arc::new(MockGateway::default());
        let connector = Arc::new(MockConnector::new(Arc::clone(&gateway)));
        let manager = SessionManager::new(Arc::clone(&connector) as Arc<dyn MessengerConnector>);

        let first = manager.get().await.unwrap();
        let second = manager.get().await.unwrap();

        assert_eq!(connector.connect_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn reconnects_when_handle_reports_disconnected() {
        let gateway = Arc::new(MockGateway::default());
        let connector = Arc::new(MockConnector::new(Arc::clone(&gateway)));
        let manager = SessionManager::new(Arc::clone(&connector) as Arc<dyn MessengerConnector>);

        manager.get().await.unwrap();
        gateway.set_connected(false);
        manager.get().await.unwrap();

        assert_eq!(connector.connect_count(), 2);
    }

    #[tokio::test]
    async fn failed_connect_leaves_no_handle() {
        let gateway = Arc::new(MockGateway::default());
        let connector = Arc::new(
            MockConnector::new(Arc::clone(&gateway)).with_error("no authorized session"),
        );
        let manager = SessionManager::new(Arc::clone(&connector) as Arc<dyn MessengerConnector>);

        assert!(manager.get().await.is_err());

        // Next call retries the connect from scratch.
        connector.clear_error();
        manager.get().await.unwrap();
        assert_eq!(connector.connect_count(), 2);
    }
}
