use super::*;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use telegram_reader_core::error::CoreResult;
use telegram_reader_core::traits::{MessengerConnector, MessengerGateway};
use telegram_reader_core::types::{DialogInfo, DialogKind, MessageInfo};
use tokio::sync::Mutex;

pub fn dialog(id: i64, name: &str, kind: DialogKind, username: Option<&str>) -> DialogInfo {
    DialogInfo {
        id,
        name: name.to_string(),
        kind,
        username: username.map(str::to_string),
    }
}

pub fn saved_messages_dialog() -> DialogInfo {
    dialog(264_837_327, "Saved Messages", DialogKind::SavedMessages, None)
}

pub fn message_on(id: i32, text: &str, day: u32) -> MessageInfo {
    MessageInfo {
        id,
        date: Utc.with_ymd_and_hms(2025, 10, day, 12, 0, 0).unwrap(),
        text: text.to_string(),
        sender: Some(42),
    }
}

/// Scriptable messenger gateway that records every query.
#[derive(Default)]
pub struct MockMessenger {
    connected: AtomicBool,
    dialogs: Mutex<Vec<DialogInfo>>,
    dialogs_error: Mutex<Option<String>>,
    messages: Mutex<Vec<MessageInfo>>,
    unknown_dialog: Mutex<Option<i64>>,
    since_calls: Mutex<Vec<(i64, DateTime<Utc>, usize)>>,
    search_calls: Mutex<Vec<(i64, String, usize)>>,
}

impl MockMessenger {
    pub async fn set_dialogs(&self, dialogs: Vec<DialogInfo>) {
        *self.dialogs.lock().await = dialogs;
    }

    pub async fn set_dialogs_error(&self, message: &str) {
        *self.dialogs_error.lock().await = Some(message.to_string());
    }

    pub async fn set_messages(&self, messages: Vec<MessageInfo>) {
        *self.messages.lock().await = messages;
    }

    pub async fn set_unknown_dialog(&self, dialog_id: i64) {
        *self.unknown_dialog.lock().await = Some(dialog_id);
    }

    pub async fn since_calls(&self) -> Vec<(i64, DateTime<Utc>, usize)> {
        self.since_calls.lock().await.clone()
    }

    pub async fn search_calls(&self) -> Vec<(i64, String, usize)> {
        self.search_calls.lock().await.clone()
    }

    async fn check_known(&self, dialog_id: i64) -> CoreResult<()> {
        if *self.unknown_dialog.lock().await == Some(dialog_id) {
            return Err(CoreError::DialogNotFound(dialog_id));
        }
        Ok(())
    }
}

#[async_trait]
impl MessengerGateway for MockMessenger {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn list_dialogs(&self) -> CoreResult<Vec<DialogInfo>> {
        if let Some(message) = self.dialogs_error.lock().await.clone() {
            return Err(CoreError::Client(message));
        }
        Ok(self.dialogs.lock().await.clone())
    }

    async fn messages_since(
        &self,
        dialog_id: i64,
        since: DateTime<Utc>,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        self.check_known(dialog_id).await?;
        self.since_calls
            .lock()
            .await
            .push((dialog_id, since, limit));
        Ok(self.messages.lock().await.clone())
    }

    async fn search_messages(
        &self,
        dialog_id: i64,
        query: &str,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        self.check_known(dialog_id).await?;
        self.search_calls
            .lock()
            .await
            .push((dialog_id, query.to_string(), limit));
        Ok(self.messages.lock().await.clone())
    }
}

/// Connector handing out one shared mock messenger.
pub struct MockConnector {
    gateway: Arc<MockMessenger>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(gateway: Arc<MockMessenger>) -> Self {
        Self {
            gateway,
            connects: AtomicUsize::new(0),
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessengerConnector for MockConnector {
    async fn connect(&self) -> CoreResult<Arc<dyn MessengerGateway>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.gateway.connected.store(true, Ordering::SeqCst);
        Ok(Arc::clone(&self.gateway) as Arc<dyn MessengerGateway>)
    }
}

/// Build a server over a mock messenger; the connector is returned so tests
/// can assert on the connect sequence.
pub(super) fn build_server(gateway: Arc<MockMessenger>) -> (TelegramReaderMcp, Arc<MockConnector>) {
    let connector = Arc::new(MockConnector::new(gateway));
    let sessions = Arc::new(SessionManager::new(
        Arc::clone(&connector) as Arc<dyn MessengerConnector>
    ));
    (TelegramReaderMcp::new(sessions), connector)
}

/// Extract the single text payload from a tool result.
pub(super) fn text_of(result: &CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|content| content.raw.as_text())
        .map(|text| text.text.as_str())
        .expect("expected text content in result")
}
