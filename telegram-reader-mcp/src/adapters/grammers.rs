//! grammers-backed implementation of the core client traits.
//!
//! All library types stay inside this module: entities are classified into
//! `DialogKind` via `PeerFlags` right here at the boundary, and errors are
//! mapped into `CoreError` with the library message preserved.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use grammers_client::types::{Chat, Message};
use grammers_client::{Client, Config, InitParams, InvocationError, SignInError};
use grammers_session::Session;

use telegram_reader_core::config::ApiCredentials;
use telegram_reader_core::error::{CoreError, CoreResult};
use telegram_reader_core::traits::{MessengerConnector, MessengerGateway};
use telegram_reader_core::types::{DialogInfo, DialogKind, MessageInfo, PeerFlags};

const SESSION_DIR: &str = "telegram-reader";
const SESSION_FILE: &str = "telegram_mcp.session";

/// Path of the persisted session file, owned by grammers-session.
pub fn session_path() -> CoreResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| CoreError::Session("no cache directory available".to_string()))?;
    Ok(cache_dir.join(SESSION_DIR).join(SESSION_FILE))
}

/// Connector that opens the persisted session and authenticates against
/// Telegram. Credentials are read from the environment on each connect, so
/// configuration errors surface on the triggering tool call.
pub struct GrammersConnector {
    session_path: PathBuf,
}

impl GrammersConnector {
    /// Create a connector bound to a session file path.
    #[must_use]
    pub fn new(session_path: PathBuf) -> Self {
        Self { session_path }
    }
}

#[async_trait]
impl MessengerConnector for GrammersConnector {
    async fn connect(&self) -> CoreResult<Arc<dyn MessengerGateway>> {
        let credentials = ApiCredentials::from_env()?;
        let client = connect_client(&credentials, &self.session_path).await?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| CoreError::Client(e.to_string()))?;
        if !authorized {
            return Err(CoreError::Session(
                "no authorized session found; run `telegram-reader-mcp login` first".to_string(),
            ));
        }

        // Persist refreshed auth keys alongside the handshake.
        client
            .session()
            .save_to_file(&self.session_path)
            .map_err(|e| CoreError::Session(format!("failed to save session file: {e}")))?;

        Ok(Arc::new(GrammersGateway::new(client)))
    }
}

async fn connect_client(credentials: &ApiCredentials, path: &Path) -> CoreResult<Client> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CoreError::Session(format!("failed to create session dir: {e}")))?;
    }

    let session = Session::load_file_or_create(path)
        .map_err(|e| CoreError::Session(format!("failed to load session file: {e}")))?;

    Client::connect(Config {
        session,
        api_id: credentials.api_id,
        api_hash: credentials.api_hash.clone(),
        params: InitParams::default(),
    })
    .await
    .map_err(|e| CoreError::Session(e.to_string()))
}

/// Query gateway over a connected grammers [`Client`].
pub struct GrammersGateway {
    client: Client,
    connected: AtomicBool,
}

impl GrammersGateway {
    fn new(client: Client) -> Self {
        Self {
            client,
            connected: AtomicBool::new(true),
        }
    }

    /// Map a library error, downgrading the health flag when the failure
    /// looks transport-level rather than an RPC rejection.
    fn note_failure(&self, err: &InvocationError) -> CoreError {
        if !matches!(err, InvocationError::Rpc(_)) {
            self.connected.store(false, Ordering::SeqCst);
        }
        CoreError::Client(err.to_string())
    }

    /// Resolve a dialog id to its chat by scanning the dialog list.
    ///
    /// The ids accepted here are exactly the ids `list_dialogs` reports.
    async fn find_chat(&self, dialog_id: i64) -> CoreResult<Chat> {
        let mut iter = self.client.iter_dialogs();
        while let Some(dialog) = iter.next().await.map_err(|e| self.note_failure(&e))? {
            if dialog.chat().id() == dialog_id {
                return Ok(dialog.chat().clone());
            }
        }
        Err(CoreError::DialogNotFound(dialog_id))
    }
}

fn classify_chat(chat: &Chat, me_id: i64) -> DialogKind {
    let flags = match chat {
        Chat::User(_) => PeerFlags {
            is_user: true,
            is_self: chat.id() == me_id,
            ..PeerFlags::default()
        },
        Chat::Group(_) => PeerFlags {
            megagroup: true,
            ..PeerFlags::default()
        },
        Chat::Channel(_) => PeerFlags {
            broadcast: true,
            ..PeerFlags::default()
        },
    };
    DialogKind::classify(flags)
}

fn to_message_info(message: &Message) -> MessageInfo {
    let text = message.text();
    MessageInfo {
        id: message.id(),
        date: message.date(),
        text: if text.is_empty() {
            MessageInfo::NO_TEXT_PLACEHOLDER.to_string()
        } else {
            text.to_string()
        },
        sender: message.sender().map(|sender| sender.id()),
    }
}

#[async_trait]
impl MessengerGateway for GrammersGateway {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn list_dialogs(&self) -> CoreResult<Vec<DialogInfo>> {
        let me = self
            .client
            .get_me()
            .await
            .map_err(|e| self.note_failure(&e))?;

        let mut dialogs = Vec::new();
        let mut iter = self.client.iter_dialogs();
        while let Some(dialog) = iter.next().await.map_err(|e| self.note_failure(&e))? {
            let chat = dialog.chat();
            let info = DialogInfo {
                id: chat.id(),
                name: chat.name().to_string(),
                kind: classify_chat(chat, me.id()),
                username: chat.username().map(str::to_string),
            };
            tracing::debug!("Found {}: {:?}", info.kind, info);
            dialogs.push(info);
        }

        Ok(dialogs)
    }

    async fn messages_since(
        &self,
        dialog_id: i64,
        since: DateTime<Utc>,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        let chat = self.find_chat(dialog_id).await?;

        // The library iterates newest first; collect down to the bound,
        // then flip to oldest-first and keep the `limit` closest to it.
        let mut collected = Vec::new();
        let mut iter = self.client.iter_messages(chat.pack());
        while let Some(message) = iter.next().await.map_err(|e| self.note_failure(&e))? {
            if message.date() < since {
                break;
            }
            collected.push(to_message_info(&message));
        }

        collected.reverse();
        collected.truncate(limit);
        Ok(collected)
    }

    async fn search_messages(
        &self,
        dialog_id: i64,
        query: &str,
        limit: usize,
    ) -> CoreResult<Vec<MessageInfo>> {
        let chat = self.find_chat(dialog_id).await?;

        let mut messages = Vec::new();
        let mut iter = self
            .client
            .search_messages(chat.pack())
            .query(query)
            .limit(limit);
        while let Some(message) = iter.next().await.map_err(|e| self.note_failure(&e))? {
            messages.push(to_message_info(&message));
        }

        Ok(messages)
    }
}

/// First-time interactive sign-in: phone -> login code -> optional 2FA
/// password, then persist the session file.
///
/// Runs on the terminal, never under the MCP transport (stdout/stdin carry
/// the protocol there).
pub async fn interactive_login() -> anyhow::Result<()> {
    let credentials = ApiCredentials::from_env()?;
    let path = session_path()?;
    let client = connect_client(&credentials, &path).await?;

    if client.is_authorized().await? {
        eprintln!("Already authorized; session file is ready at {}", path.display());
        return Ok(());
    }

    let phone = prompt("Phone number (international format): ")?;
    let token = client.request_login_code(phone.trim()).await?;
    let code = prompt("Login code: ")?;

    match client.sign_in(&token, code.trim()).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let password = prompt("2FA password: ")?;
            client
                .check_password(password_token, password.trim())
                .await?;
        }
        Err(e) => return Err(e.into()),
    }

    client.session().save_to_file(&path)?;
    eprintln!("Signed in; session saved to {}", path.display());
    Ok(())
}

fn prompt(label: &str) -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    stderr.write_all(label.as_bytes())?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
