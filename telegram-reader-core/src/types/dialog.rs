//! 会话相关类型定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conversation classification, derived once at the client boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    /// The account's self-chat
    SavedMessages,
    /// Person-to-person chat
    PrivateChat,
    /// Group-capable channel (megagroup) or small group
    Group,
    /// Broadcast channel
    Channel,
    /// Anything the flags do not identify
    Chat,
}

impl DialogKind {
    /// Human-readable label used in formatted listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SavedMessages => "Saved Messages",
            Self::PrivateChat => "Private Chat",
            Self::Group => "Group",
            Self::Channel => "Channel",
            Self::Chat => "Chat",
        }
    }

    /// Classify an entity from its raw attribute flags.
    ///
    /// Priority order matters: the self-check wins over every other flag,
    /// then user, then megagroup, then broadcast.
    #[must_use]
    pub fn classify(flags: PeerFlags) -> Self {
        if flags.is_self {
            Self::SavedMessages
        } else if flags.is_user {
            Self::PrivateChat
        } else if flags.megagroup {
            Self::Group
        } else if flags.broadcast {
            Self::Channel
        } else {
            Self::Chat
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw attributes of the underlying entity, read off the client library
/// exactly once per dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerFlags {
    /// Entity is a user account
    pub is_user: bool,
    /// Entity is the authenticated user itself
    pub is_self: bool,
    /// Entity is a group-capable channel
    pub megagroup: bool,
    /// Entity is a broadcast channel
    pub broadcast: bool,
}

/// 会话信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogInfo {
    /// Dialog ID as reported by the client library
    pub id: i64,
    /// Display name
    pub name: String,
    /// Derived classification
    pub kind: DialogKind,
    /// Public username, when the entity has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
