//! 消息相关类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 消息信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageInfo {
    /// Message ID within its dialog
    pub id: i32,
    /// Message timestamp
    #[serde(with = "crate::utils::datetime")]
    pub date: DateTime<Utc>,
    /// Message text, or a placeholder for media-only messages
    pub text: String,
    /// Sender ID, absent for some service messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<i64>,
}

impl MessageInfo {
    /// Placeholder used when the source message carries no text body.
    pub const NO_TEXT_PLACEHOLDER: &'static str = "(no text content)";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_date_as_rfc3339() {
        let msg = MessageInfo {
            id: 7,
            date: Utc.with_ymd_and_hms(2025, 10, 1, 14, 30, 0).unwrap(),
            text: "hello".to_string(),
            sender: Some(42),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["date"], "2025-10-01T14:30:00+00:00");
        assert_eq!(json["sender"], 42);
    }

    #[test]
    fn round_trips_through_json() {
        let msg = MessageInfo {
            id: 1,
            date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            text: MessageInfo::NO_TEXT_PLACEHOLDER.to_string(),
            sender: None,
        };

        let json = serde_json::to_string(&msg).unwrap();
        let back: MessageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
