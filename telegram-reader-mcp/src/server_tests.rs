use super::test_mocks::*;
use super::*;

use telegram_reader_core::types::DialogKind;

use crate::schemas::{
    GetSavedMessagesIdParams, ListConversationsParams, ReadMessagesParams, SearchMessagesParams,
};

#[test]
fn clamp_limit_applies_default_and_cap() {
    assert_eq!(clamp_limit(None), 50);
    assert_eq!(clamp_limit(Some(10)), 10);
    assert_eq!(clamp_limit(Some(200)), 200);
    assert_eq!(clamp_limit(Some(999)), 200);
}

#[test]
fn map_core_error_preserves_message() {
    let error = map_core_error("Read messages", &CoreError::DialogNotFound(4242));
    assert!(error.to_string().contains("4242"));

    let error = map_core_error("List conversations", &CoreError::Client("FLOOD_WAIT".into()));
    assert!(error.to_string().contains("FLOOD_WAIT"));
}

#[tokio::test]
async fn list_conversations_empty_returns_literal() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(gateway);

    let result = server
        .list_conversations(Parameters(ListConversationsParams {}))
        .await
        .unwrap();

    assert_eq!(text_of(&result), "No conversations found.");
}

#[tokio::test]
async fn list_conversations_renders_table() {
    let gateway = Arc::new(MockMessenger::default());
    gateway
        .set_dialogs(vec![
            saved_messages_dialog(),
            dialog(1001, "Alice", DialogKind::PrivateChat, Some("alice")),
        ])
        .await;
    let (server, _) = build_server(gateway);

    let result = server
        .list_conversations(Parameters(ListConversationsParams {}))
        .await
        .unwrap();

    let text = text_of(&result);
    assert!(text.starts_with("All your Telegram conversations:"));
    assert!(text.contains("264837327       | Saved Messages"));
    assert!(text.contains("@alice"));
    assert!(text.ends_with("Total: 2 conversations"));
}

#[tokio::test]
async fn list_conversations_gateway_error_propagates_message() {
    let gateway = Arc::new(MockMessenger::default());
    gateway.set_dialogs_error("RPC error 420: FLOOD_WAIT").await;
    let (server, _) = build_server(gateway);

    let error = server
        .list_conversations(Parameters(ListConversationsParams {}))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("FLOOD_WAIT"));
}

#[tokio::test]
async fn read_messages_invalid_date_returns_literal_without_connecting() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, connector) = build_server(Arc::clone(&gateway));

    let result = server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "not-a-date".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    let text = text_of(&result);
    assert!(text.contains("Invalid date format 'not-a-date'"));
    assert_eq!(connector.connect_count(), 0);
    assert!(gateway.since_calls().await.is_empty());
}

#[tokio::test]
async fn read_messages_clamps_limit_to_cap() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(Arc::clone(&gateway));

    server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "2025-10-01".to_string(),
            limit: Some(999),
        }))
        .await
        .unwrap();

    let calls = gateway.since_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, 1001);
    assert_eq!(calls[0].2, 200);
}

#[tokio::test]
async fn read_messages_defaults_limit() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(Arc::clone(&gateway));

    server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "2025-10-01".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(gateway.since_calls().await[0].2, 50);
}

#[tokio::test]
async fn read_messages_passes_parsed_since_date() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(Arc::clone(&gateway));

    server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "2025-10-01".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    let since = gateway.since_calls().await[0].1;
    assert_eq!(since.to_rfc3339(), "2025-10-01T00:00:00+00:00");
}

#[tokio::test]
async fn read_messages_empty_returns_literal() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(gateway);

    let result = server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "2025-10-01".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        text_of(&result),
        "No messages found in dialog 1001 since 2025-10-01"
    );
}

#[tokio::test]
async fn read_messages_renders_blocks() {
    let gateway = Arc::new(MockMessenger::default());
    gateway
        .set_messages(vec![message_on(7, "standup moved to 11", 1)])
        .await;
    let (server, _) = build_server(gateway);

    let result = server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 1001,
            since_date: "2025-10-01".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    let text = text_of(&result);
    assert!(text.starts_with("Messages from dialog 1001 since 2025-10-01:"));
    assert!(text.contains("Message ID: 7"));
    assert!(text.contains("Sender: 42"));
    assert!(text.contains("Content:\nstandup moved to 11"));
    assert!(text.ends_with("Total: 1 messages"));
}

#[tokio::test]
async fn read_messages_unknown_dialog_embeds_identifier() {
    let gateway = Arc::new(MockMessenger::default());
    gateway.set_unknown_dialog(4242).await;
    let (server, _) = build_server(gateway);

    let error = server
        .read_messages(Parameters(ReadMessagesParams {
            dialog_id: 4242,
            since_date: "2025-10-01".to_string(),
            limit: None,
        }))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("4242"));
}

#[tokio::test]
async fn search_messages_passes_query_and_clamped_limit() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(Arc::clone(&gateway));

    server
        .search_messages(Parameters(SearchMessagesParams {
            dialog_id: 1001,
            query: "meeting".to_string(),
            limit: Some(500),
        }))
        .await
        .unwrap();

    let calls = gateway.search_calls().await;
    assert_eq!(calls, vec![(1001, "meeting".to_string(), 200)]);
}

#[tokio::test]
async fn search_messages_empty_returns_literal() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(gateway);

    let result = server
        .search_messages(Parameters(SearchMessagesParams {
            dialog_id: 1001,
            query: "meeting".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        text_of(&result),
        "No messages found in dialog 1001 matching 'meeting'"
    );
}

#[tokio::test]
async fn search_messages_renders_blocks_with_query_title() {
    let gateway = Arc::new(MockMessenger::default());
    gateway
        .set_messages(vec![message_on(3, "about the meeting", 2)])
        .await;
    let (server, _) = build_server(gateway);

    let result = server
        .search_messages(Parameters(SearchMessagesParams {
            dialog_id: 1001,
            query: "meeting".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    let text = text_of(&result);
    assert!(text.starts_with("Messages in dialog 1001 matching 'meeting':"));
    assert!(text.contains("about the meeting"));
}

#[tokio::test]
async fn get_saved_messages_id_returns_id() {
    let gateway = Arc::new(MockMessenger::default());
    gateway
        .set_dialogs(vec![
            dialog(1001, "Alice", DialogKind::PrivateChat, Some("alice")),
            saved_messages_dialog(),
        ])
        .await;
    let (server, _) = build_server(gateway);

    let result = server
        .get_saved_messages_id(Parameters(GetSavedMessagesIdParams {}))
        .await
        .unwrap();

    assert_eq!(text_of(&result), "Your Saved Messages ID is: 264837327");
}

#[tokio::test]
async fn get_saved_messages_id_fallback_when_absent() {
    let gateway = Arc::new(MockMessenger::default());
    gateway
        .set_dialogs(vec![dialog(1001, "Alice", DialogKind::PrivateChat, None)])
        .await;
    let (server, _) = build_server(gateway);

    let result = server
        .get_saved_messages_id(Parameters(GetSavedMessagesIdParams {}))
        .await
        .unwrap();

    assert!(text_of(&result).contains("Saved Messages not found"));
}

#[tokio::test]
async fn tool_calls_share_one_connect_sequence() {
    let gateway = Arc::new(MockMessenger::default());
    gateway.set_dialogs(vec![saved_messages_dialog()]).await;
    let (server, connector) = build_server(gateway);

    server
        .list_conversations(Parameters(ListConversationsParams {}))
        .await
        .unwrap();
    server
        .get_saved_messages_id(Parameters(GetSavedMessagesIdParams {}))
        .await
        .unwrap();
    server
        .search_messages(Parameters(SearchMessagesParams {
            dialog_id: 264_837_327,
            query: "notes".to_string(),
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(connector.connect_count(), 1);
}

#[tokio::test]
async fn get_info_contains_expected_instructions() {
    let gateway = Arc::new(MockMessenger::default());
    let (server, _) = build_server(gateway);

    let info = server.get_info();

    assert_eq!(info.protocol_version, ProtocolVersion::LATEST);
    let instructions = info.instructions.unwrap_or_default();
    assert!(instructions.contains("list_conversations"));
    assert!(instructions.contains("get_saved_messages_id"));
}
