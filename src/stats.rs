//! Database statistics and health overview.
//!
//! Provides a quick summary of what's stored: file and block counts,
//! per-stage and per-module breakdowns, and the last import time. Used by
//! `kpoint stats` to give confidence that imports are working as expected.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let total_files: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM knowledge_files")
        .fetch_one(&pool)
        .await?;

    let total_blocks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM knowledge_blocks")
        .fetch_one(&pool)
        .await?;

    let last_import: Option<i64> = sqlx::query_scalar("SELECT MAX(updated_at) FROM knowledge_files")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Knowledge Point Ingest — Database Stats");
    println!("=======================================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!();
    println!("  Files:       {}", total_files);
    println!("  Blocks:      {}", total_blocks);
    println!(
        "  Last import: {}",
        match last_import {
            Some(ts) => format_ts_relative(ts),
            None => "never".to_string(),
        }
    );

    // Per-stage breakdown
    let stage_rows = sqlx::query(
        "SELECT stage, COUNT(*) AS block_count FROM knowledge_blocks \
         GROUP BY stage ORDER BY stage",
    )
    .fetch_all(&pool)
    .await?;

    if !stage_rows.is_empty() {
        println!();
        println!("  By stage:");
        for row in &stage_rows {
            let stage: String = row.get("stage");
            let count: i64 = row.get("block_count");
            println!("  {:<12} {:>6}", stage, count);
        }
    }

    // Per-module breakdown
    let module_rows = sqlx::query(
        "SELECT module, COUNT(*) AS block_count FROM knowledge_blocks \
         GROUP BY module ORDER BY module",
    )
    .fetch_all(&pool)
    .await?;

    if !module_rows.is_empty() {
        println!();
        println!("  By module:");
        for row in &module_rows {
            let module: String = row.get("module");
            let count: i64 = row.get("block_count");
            println!("  {:<12} {:>6}", module, count);
        }
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
