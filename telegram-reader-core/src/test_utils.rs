//! Shared mocks for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::{CoreError, CoreResult};
use crate::traits::{MessengerConnector, MessengerGateway};
use crate::types::{DialogInfo, DialogKind, MessageInfo};

pub fn dialog(id: i64, name: &str, kind: DialogKind) -> DialogInfo {
    DialogInfo {
        id,
        name: name.to_string(),
        kind,
        username: None,
    }
}

#[allow(clippy::unwrap_used)]
pub fn message_at(id: i32, text: &str, year: i32, month: u32, day: u32) -> MessageInfo {
    MessageInfo {
        id,
        date: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        text: text.to_string(),
        sender: Some(42),
    }
}

/// Scriptable gateway that records every call.
#[derive(Default)]
pub struct MockGateway {
    connected: AtomicBool,
    dialogs: Mutex<Vec<DialogInfo>>,
    dialogs_error: Mutex<Option<String>>,
    messages: Mutex<Vec<MessageInfo>>,
    messages_not_found: Mutex<Option<i64>>,
    since_calls: Mutex<Vec<(i64, DateTime<Utc>, usize)>>,
    search_calls: Mutex<Vec<(i64, String, usize)>>,
}

#[allow(clippy::unwrap_used)]
impl MockGateway {
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn set_dialogs(&self, dialogs: Vec<DialogInfo>) {
        *self.dialogs.lock().unwrap() = dialogs;
    }

    pub fn set_dialogs_error(&self, message: &str) {
        *self.dialogs_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_messages(&self, messages: Vec<MessageInfo>) {
        *self.messages.lock().unwrap() = messages;
    }

    pub fn set_messages_error_not_found(&self, dialog_id: i64) {
        *self.messages_not_found.lock().unwrap() = Some(dialog_id);
    }

    pub fn since_calls(&self) -> Vec<(i64, DateTime<Utc>, usize)> {
        self.since_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<(i64, String, usize)> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
#[async_trait]
impl MessengerGateway for MockGateway {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn list_dialogs(&self) -> CoreResult<Vec<DialogInfo>> {
        if let Some(message) = self.dialogs_error.lock().unwrap().clone() {
            return Err(CoreError::Client(message));
        }
        Ok(self.dialogs.lock().unwrap().clone())
    }

    async fn messages_since(
        &self,
        dialog_id: i64,
        since: DateTime<Utc>,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        if let Some(missing) = *self.messages_not_found.lock().unwrap() {
            return Err(CoreError::DialogNotFound(missing));
        }
        self.since_calls
            .lock()
            .unwrap()
            .push((dialog_id, since, limit));
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn search_messages(
        &self,
        dialog_id: i64,
        query: &str,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        if let Some(missing) = *self.messages_not_found.lock().unwrap() {
            return Err(CoreError::DialogNotFound(missing));
        }
        self.search_calls
            .lock()
            .unwrap()
            .push((dialog_id, query.to_string(), limit));
        Ok(self.messages.lock().unwrap().clone())
    }
}

/// Connector that hands out one shared mock gateway and counts connects.
pub struct MockConnector {
    gateway: Arc<MockGateway>,
    connects: AtomicUsize,
    delay: Option<Duration>,
    error: Mutex<Option<String>>,
}

#[allow(clippy::unwrap_used)]
impl MockConnector {
    pub fn new(gateway: Arc<MockGateway>) -> Self {
        Self {
            gateway,
            connects: AtomicUsize::new(0),
            delay: None,
            error: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_error(self, message: &str) -> Self {
        *self.error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap() = None;
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[allow(clippy::unwrap_used)]
#[async_trait]
impl MessengerConnector for MockConnector {
    async fn connect(&self) -> CoreResult<Arc<dyn MessengerGateway>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.connects.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(CoreError::Session(message));
        }

        self.gateway.set_connected(true);
        Ok(Arc::clone(&self.gateway) as Arc<dyn MessengerGateway>)
    }
}
