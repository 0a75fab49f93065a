use std::sync::Arc;

use iris_recall::CommandContext;

use super::channel_harness::{RecordingChannel, eventually, plugin_with, seed, test_config};

#[tokio::test]
async fn stop_with_nothing_running() {
    let (plugin, _store) = plugin_with(&test_config(0), RecordingChannel::new()).await;
    let reply = plugin
        .handle_command("/recall stop", &CommandContext::new("general", "mod"))
        .await;
    assert_eq!(reply.as_deref(), Some("no active operation"));
}

#[tokio::test]
async fn stop_halts_a_running_recall() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(40), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 20).await;
    let plugin = Arc::new(plugin);

    let running = {
        let plugin = Arc::clone(&plugin);
        tokio::spawn(async move {
            plugin
                .handle_command("/recall -n 20", &CommandContext::new("general", "mod"))
                .await
        })
    };

    let ctx = CommandContext::new("general", "mod");
    assert!(eventually(|| channel.calls() >= 1).await);
    let status = plugin.handle_command("/recall status", &ctx).await.unwrap();
    assert!(status.starts_with("1 recall task(s) running:"), "{status}");

    assert_eq!(
        plugin.handle_command("/recall stop", &ctx).await.as_deref(),
        Some("stopped 1 recall task(s)")
    );
    assert_eq!(
        plugin.handle_command("/recall stop", &ctx).await.as_deref(),
        Some("no active operation")
    );

    assert_eq!(running.await.unwrap(), None);
    let attempted = channel.calls();
    assert!(attempted < 20, "recall ran to completion: {attempted}");
    assert_eq!(store.count().await.unwrap(), 20 - attempted as u64);
    assert_eq!(
        plugin.handle_command("/recall status", &ctx).await.as_deref(),
        Some("no active operation")
    );
}

#[tokio::test]
async fn stop_leaves_other_channels_running() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(40), Arc::clone(&channel)).await;
    seed(store.as_ref(), "a", "u", "alpha", 3).await;
    seed(store.as_ref(), "b", "u", "beta", 30).await;
    let plugin = Arc::new(plugin);

    let alpha = {
        let plugin = Arc::clone(&plugin);
        tokio::spawn(async move {
            plugin
                .handle_command("/recall -n 3", &CommandContext::new("alpha", "mod"))
                .await
        })
    };
    assert!(eventually(|| plugin.recall_service().registry().active_in("alpha") == 1).await);

    let beta_ctx = CommandContext::new("beta", "mod");
    assert_eq!(
        plugin.handle_command("/recall stop", &beta_ctx).await.as_deref(),
        Some("no active operation")
    );

    assert_eq!(alpha.await.unwrap(), None);
    let deleted = channel.deleted_ids();
    assert_eq!(deleted, vec!["a-002", "a-001", "a-000"]);
}

#[tokio::test]
async fn dispose_cancels_running_recalls() {
    let channel = RecordingChannel::new();
    let (plugin, store) = plugin_with(&test_config(40), Arc::clone(&channel)).await;
    seed(store.as_ref(), "m", "u", "general", 20).await;
    let plugin = Arc::new(plugin);

    let running = {
        let plugin = Arc::clone(&plugin);
        tokio::spawn(async move {
            plugin
                .handle_command("/recall -n 20", &CommandContext::new("general", "mod"))
                .await
        })
    };
    assert!(eventually(|| plugin.recall_service().registry().active_in("general") == 1).await);

    plugin.dispose().await;
    assert!(plugin.recall_service().registry().is_empty());
    running.await.unwrap();
    assert!(channel.calls() < 20);
}
