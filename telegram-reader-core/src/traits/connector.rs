//! 会话建立抽象 Trait

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::traits::MessengerGateway;

/// Creates an authenticated [`MessengerGateway`].
///
/// Implementations load credentials, open the persisted session and perform
/// the authentication handshake. Called by the session manager under its
/// lock, so at most one connect sequence runs at a time.
#[async_trait]
pub trait MessengerConnector: Send + Sync {
    /// Connect and authenticate a fresh client handle.
    async fn connect(&self) -> CoreResult<Arc<dyn MessengerGateway>>;
}
