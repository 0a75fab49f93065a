use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use iris_recall::Config;
use iris_recall::history::{HistoryQuery, HistoryStore, MessageRecord, SqliteHistoryStore};
use iris_recall::retention::{RetentionPolicy, run_sweep};
use tracing::info;

async fn open_store(config: &Config) -> Result<SqliteHistoryStore> {
    SqliteHistoryStore::open(&config.workspace_dir)
        .await
        .with_context(|| {
            format!(
                "failed to open message history under {}",
                config.workspace_dir.display()
            )
        })
}

async fn run_sweep_once(config: &Config) -> Result<()> {
    let policy = RetentionPolicy::from(&config.retention);
    if !policy.is_enabled() {
        println!("Retention is disabled; nothing to sweep.");
        return Ok(());
    }

    let store = open_store(config).await?;
    let report = run_sweep(&store, &policy, Utc::now().timestamp_millis()).await;
    println!(
        "Swept {} record(s): {} past the age cap, {} past the count cap.",
        report.total(),
        report.age_deleted,
        report.count_deleted
    );
    store.close().await;
    Ok(())
}

fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |ts| ts.to_rfc3339())
}

fn print_records(records: &[MessageRecord]) {
    if records.is_empty() {
        println!("No retained records.");
        return;
    }
    println!("{:<24} {:<20} {:<20} TIMESTAMP", "MESSAGE", "USER", "CHANNEL");
    for record in records {
        println!(
            "{:<24} {:<20} {:<20} {}",
            record.message_id,
            record.user_id,
            record.channel_id,
            format_timestamp(record.timestamp)
        );
    }
}

async fn list_records(
    config: &Config,
    channel: String,
    user: Option<String>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let store = open_store(config).await?;
    let mut query = HistoryQuery::channel(channel).with_limit(limit);
    if let Some(user) = user {
        query = query.with_user(user);
    }

    let records = store.query(&query).await.context("failed to query history")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&records);
    }
    store.close().await;
    Ok(())
}

async fn purge(config: &Config) -> Result<()> {
    let store = open_store(config).await?;
    let purged = store.delete_all().await.context("failed to purge history")?;
    info!(purged, "message history purged");
    println!("Purged {purged} record(s).");
    store.close().await;
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Sweep => run_sweep_once(&config).await,
        Commands::List {
            channel,
            user,
            limit,
            json,
        } => list_records(&config, channel, user, limit, json).await,
        Commands::Purge => purge(&config).await,
    }
}
