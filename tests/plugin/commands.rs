use std::sync::Arc;

use iris_recall::history::HistoryQuery;
use iris_recall::{CommandContext, HistoryPlugin, MessageEvent};

use super::channel_harness::{RecordingChannel, plugin_with, seed, test_config};

#[tokio::test]
async fn recall_by_user_deletes_newest_first() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(0), Arc::clone(&channel)).await;
    seed(store.as_ref(), "a", "userA", "general", 5).await;
    seed(store.as_ref(), "b", "userB", "general", 5).await;

    let reply = plugin
        .handle_command(
            "/recall --user userA --number 3",
            &CommandContext::new("general", "mod"),
        )
        .await;

    assert_eq!(reply, None);
    assert_eq!(channel.deleted_ids(), vec!["a-004", "a-003", "a-002"]);
    let left = store
        .query(&HistoryQuery::channel("general").with_user("userA"))
        .await
        .unwrap();
    assert_eq!(left.len(), 2);
    assert_eq!(store.count().await.unwrap(), 7);
}

#[tokio::test]
async fn bare_recall_removes_the_latest_message() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(0), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 3).await;

    plugin
        .handle_command("/recall", &CommandContext::new("general", "mod"))
        .await;
    assert_eq!(channel.deleted_ids(), vec!["m-002"]);
}

#[tokio::test]
async fn invalid_number_recalls_one() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(0), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 3).await;

    plugin
        .handle_command("/recall -n lots", &CommandContext::new("general", "mod"))
        .await;
    assert_eq!(channel.calls(), 1);
}

#[tokio::test]
async fn partial_failure_is_summarised() {
    let channel = RecordingChannel::rejecting(&["m-001"]);
    let (plugin, store) = plugin_with(&test_config(0), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 3).await;

    let reply = plugin
        .handle_command("/recall -n 3", &CommandContext::new("general", "mod"))
        .await;
    assert_eq!(reply.as_deref(), Some("done: 2 succeeded, 1 failed"));
    // The rejected message stays in history.
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn empty_channel_has_nothing_to_recall() {
    let (plugin, _store) = plugin_with(&test_config(0), RecordingChannel::new()).await;
    let reply = plugin
        .handle_command("/recall -n 5", &CommandContext::new("quiet", "mod"))
        .await;
    assert_eq!(reply.as_deref(), Some("nothing to recall"));
}

#[tokio::test]
async fn quoted_messages_take_precedence() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(0), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 3).await;

    let ctx = CommandContext::new("general", "mod").with_quoted(vec!["m-000".to_string()]);
    plugin.handle_command("/recall -n 3", &ctx).await;
    assert_eq!(channel.deleted_ids(), vec!["m-000"]);
}

#[tokio::test]
async fn disabled_history_still_recalls_quoted_messages() {
    let mut config = test_config(0);
    config.retention.max_per_user = 0;
    config.retention.max_age_hours = 0;
    let channel = RecordingChannel::new();
    let plugin = HistoryPlugin::new(&config, Arc::clone(&channel) as _, None);

    assert!(!plugin.listens_for_events());
    assert!(!plugin.observe(&MessageEvent::inbound("x", "u", "c")).await);

    let reply = plugin
        .handle_command("/recall", &CommandContext::new("c", "mod"))
        .await;
    assert_eq!(
        reply.as_deref(),
        Some("message history is disabled; reply to a message to recall it")
    );

    let ctx = CommandContext::new("c", "mod").with_quoted(vec!["q1".into(), "q2".into()]);
    assert_eq!(plugin.handle_command("/recall", &ctx).await, None);
    assert_eq!(channel.deleted_ids(), vec!["q1", "q2"]);
}
