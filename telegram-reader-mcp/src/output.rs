//! Text rendering for tool responses.
//!
//! The layout is part of the tool contract: agents and tests compare these
//! strings verbatim, so any change here is a breaking change.

use telegram_reader_core::types::{DialogInfo, MessageInfo};

const RULE_WIDTH: usize = 100;

/// Render the conversation table.
pub fn format_conversations(dialogs: &[DialogInfo]) -> String {
    let mut lines = vec![
        "All your Telegram conversations:".to_string(),
        "=".repeat(RULE_WIDTH),
    ];
    lines.push(format!(
        "{:<15} | {:<15} | {:<20} | {}",
        "ID", "Type", "Username", "Name"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for dialog in dialogs {
        let username = dialog
            .username
            .as_ref()
            .map_or_else(|| "(no username)".to_string(), |name| format!("@{name}"));
        lines.push(format!(
            "{:<15} | {:<15} | {username:<20} | {}",
            dialog.id,
            dialog.kind.label(),
            dialog.name
        ));
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!("\nTotal: {} conversations", dialogs.len()));

    lines.join("\n")
}

/// Render a message listing under the given title line.
pub fn format_messages(title: &str, messages: &[MessageInfo]) -> String {
    let mut lines = vec![title.to_string(), "=".repeat(RULE_WIDTH)];

    for msg in messages {
        lines.push(format!("\nMessage ID: {}", msg.id));
        lines.push(format!("Date: {}", msg.date));
        lines.push(match msg.sender {
            Some(sender) => format!("Sender: {sender}"),
            None => "Sender: (unknown)".to_string(),
        });
        lines.push(format!("Content:\n{}", msg.text));
        lines.push("-".repeat(RULE_WIDTH));
    }

    lines.push(format!("\nTotal: {} messages", messages.len()));

    lines.join("\n")
}
