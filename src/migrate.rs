use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // File registry: one row per knowledge-point source document
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS knowledge_files (
            code TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            content_hash TEXT NOT NULL,
            raw_content TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Content blocks, one per (code, stage, module, source)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS knowledge_blocks (
            code TEXT NOT NULL,
            stage TEXT NOT NULL,
            module TEXT NOT NULL,
            source TEXT NOT NULL DEFAULT 'file',
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            source_file_name TEXT NOT NULL,
            source_file_hash TEXT NOT NULL,
            parsed_version INTEGER NOT NULL DEFAULT 1,
            updated_at INTEGER NOT NULL,
            PRIMARY KEY (code, stage, module, source)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_blocks_code ON knowledge_blocks(code)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_blocks_stage ON knowledge_blocks(stage)")
        .execute(&pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_files_updated_at ON knowledge_files(updated_at DESC)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
