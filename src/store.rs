//! Idempotent persistence for parsed knowledge files.
//!
//! Each file is one unit of work: the registry row and every block row go
//! through a single transaction, so a file is either fully upserted or not
//! upserted at all for the run.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::ParsedStage;

/// Value of the `source` key component for file-ingested blocks.
pub const BLOCK_SOURCE_FILE: &str = "file";

/// Schema-evolution tag written into every block row.
pub const PARSED_VERSION: i64 = 1;

/// Fingerprint stored in the registry for `code`, if any.
pub async fn stored_hash(pool: &SqlitePool, code: &str) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT content_hash FROM knowledge_files WHERE code = ?")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(hash)
}

/// Number of file-sourced blocks already persisted for `code`.
pub async fn persisted_block_count(pool: &SqlitePool, code: &str) -> Result<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM knowledge_blocks WHERE code = ? AND source = ?",
    )
    .bind(code)
    .bind(BLOCK_SOURCE_FILE)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Upsert the registry row and all parsed blocks for one file.
///
/// Returns the number of block rows written. Re-running with identical
/// parsed input leaves the same final row values.
pub async fn upsert_file(
    pool: &SqlitePool,
    code: &str,
    file_name: &str,
    raw_content: &str,
    content_hash: &str,
    stages: &[ParsedStage],
) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO knowledge_files (code, file_name, content_hash, raw_content, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(code) DO UPDATE SET
            file_name = excluded.file_name,
            content_hash = excluded.content_hash,
            raw_content = excluded.raw_content,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(code)
    .bind(file_name)
    .bind(content_hash)
    .bind(raw_content)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let mut blocks = 0u64;
    for stage in stages {
        for module in &stage.modules {
            sqlx::query(
                r#"
                INSERT INTO knowledge_blocks
                    (code, stage, module, source, title, content,
                     source_file_name, source_file_hash, parsed_version, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(code, stage, module, source) DO UPDATE SET
                    title = excluded.title,
                    content = excluded.content,
                    source_file_name = excluded.source_file_name,
                    source_file_hash = excluded.source_file_hash,
                    parsed_version = excluded.parsed_version,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(code)
            .bind(stage.stage.as_str())
            .bind(module.module.as_str())
            .bind(BLOCK_SOURCE_FILE)
            .bind(&module.title)
            .bind(&module.content)
            .bind(file_name)
            .bind(content_hash)
            .bind(PARSED_VERSION)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            blocks += 1;
        }
    }

    tx.commit().await?;
    Ok(blocks)
}
