use std::sync::Arc;

use chrono::Utc;
use iris_recall::MessageEvent;
use iris_recall::retention::MS_PER_HOUR;
use tempfile::TempDir;

use super::channel_harness::{RecordingChannel, plugin_with, seed, test_config};

#[tokio::test]
async fn observed_messages_are_recorded() {
    let (plugin, store) = plugin_with(&test_config(0), RecordingChannel::new()).await;
    assert!(plugin.listens_for_events());

    assert!(
        plugin
            .observe(&MessageEvent::inbound("in-1", "user", "general"))
            .await
    );
    assert!(
        plugin
            .observe(&MessageEvent::outbound("out-1", "bot", "general"))
            .await
    );
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn on_ready_sweeps_stale_records() {
    let mut config = test_config(0);
    config.retention.max_age_hours = 1;
    let (plugin, store) = plugin_with(&config, RecordingChannel::new()).await;

    let now = Utc::now().timestamp_millis();
    plugin
        .observe_at(&MessageEvent::inbound("stale", "u", "c"), now - 3 * MS_PER_HOUR)
        .await;
    plugin
        .observe_at(&MessageEvent::inbound("fresh", "u", "c"), now)
        .await;

    assert!(plugin.on_ready());
    let mut remaining = 2;
    for _ in 0..100 {
        remaining = store.count().await.unwrap();
        if remaining == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(remaining, 1);

    plugin.dispose().await;
}

#[tokio::test]
async fn dispose_purges_history_by_default() {
    let (plugin, store) = plugin_with(&test_config(0), RecordingChannel::new()).await;
    seed(store.as_ref(), "m", "u", "c", 10).await;
    plugin.on_ready();

    plugin.dispose().await;
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn dispose_keeps_history_when_purge_disabled() {
    let mut config = test_config(0);
    config.retention.purge_on_dispose = false;
    let (plugin, store) = plugin_with(&config, RecordingChannel::new()).await;
    seed(store.as_ref(), "m", "u", "c", 4).await;

    plugin.dispose().await;
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn opened_plugin_persists_under_workspace() {
    let tmp = TempDir::new().unwrap();
    let mut config = test_config(0);
    config.workspace_dir = tmp.path().to_path_buf();
    config.retention.purge_on_dispose = false;

    let plugin = iris_recall::HistoryPlugin::open(&config, RecordingChannel::new())
        .await
        .unwrap();
    plugin
        .observe(&MessageEvent::inbound("m1", "u", "c"))
        .await;
    plugin.dispose().await;

    assert!(iris_recall::SqliteHistoryStore::db_path(tmp.path()).exists());
    let reopened = iris_recall::HistoryPlugin::open(&config, Arc::new(RecordingChannel::default()))
        .await
        .unwrap();
    assert_eq!(reopened.store().unwrap().count().await.unwrap(), 1);
}

#[tokio::test]
async fn opened_plugin_without_caps_creates_no_database() {
    let tmp = TempDir::new().unwrap();
    let mut config = test_config(0);
    config.workspace_dir = tmp.path().to_path_buf();
    config.retention.max_per_user = 0;
    config.retention.max_age_hours = 0;

    let plugin = iris_recall::HistoryPlugin::open(&config, RecordingChannel::new())
        .await
        .unwrap();
    assert!(plugin.store().is_none());
    assert!(!iris_recall::SqliteHistoryStore::db_path(tmp.path()).exists());
}
