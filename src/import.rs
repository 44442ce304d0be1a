//! Import pipeline orchestration.
//!
//! Coordinates the full batch flow: scan → code extraction → change
//! detection → parse → upsert, strictly sequentially, one file at a time.
//! Per-file errors become recorded outcomes and never abort the run; the
//! final report is a fold over the outcome list.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::code;
use crate::config::Config;
use crate::db;
use crate::detect::{self, Decision, ReprocessReason};
use crate::models::{FileOutcome, SkipReason};
use crate::parser;
use crate::report::{self, ImportReport};
use crate::scan::{self, ScannedFile};
use crate::store;

pub async fn run_import(config: &Config, full: bool, dry_run: bool) -> Result<()> {
    // A missing source directory is fatal before any per-file work.
    let files = scan::scan_source_dir(config)?;

    if dry_run {
        return run_dry(&files);
    }

    let pool = db::connect(config).await?;

    println!("import {}", config.source.dir.display());

    let mut outcomes: Vec<(String, FileOutcome)> = Vec::with_capacity(files.len());
    for file in &files {
        let outcome = process_file(&pool, file, full).await;
        match &outcome {
            FileOutcome::Processed { blocks } => {
                println!("  {}: {} blocks", file.file_name, blocks);
            }
            FileOutcome::Skipped { reason } => {
                println!("  {}: skipped ({})", file.file_name, reason);
            }
            FileOutcome::Failed { error } => {
                println!("  {}: failed ({})", file.file_name, error);
            }
        }
        outcomes.push((file.file_name.clone(), outcome));
    }

    let summary = ImportReport::from_outcomes(&outcomes);
    report::write_report(&config.report.path, &summary)?;
    report::print_summary(&summary);
    println!("  report: {}", config.report.path.display());
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Scan and parse without touching the database or the report file.
fn run_dry(files: &[ScannedFile]) -> Result<()> {
    println!("import (dry-run)");
    println!("  files found: {}", files.len());

    let mut total_blocks = 0u64;
    for file in files {
        let code = match code::extract_code(&file.file_name) {
            Ok(code) => code,
            Err(reason) => {
                println!("  {}: skipped ({})", file.file_name, reason);
                continue;
            }
        };
        let raw = match std::fs::read_to_string(&file.path) {
            Ok(raw) => raw,
            Err(err) => {
                println!("  {}: failed ({})", file.file_name, err);
                continue;
            }
        };
        match parser::parse_document(&raw) {
            Ok(stages) => {
                let blocks: u64 = stages.iter().map(|s| s.modules.len() as u64).sum();
                println!("  {} -> {}: {} blocks", file.file_name, code, blocks);
                total_blocks += blocks;
            }
            Err(err) => println!("  {}: failed ({})", file.file_name, err),
        }
    }
    println!("  estimated blocks: {}", total_blocks);
    Ok(())
}

/// Process one file into its terminal outcome. Errors are captured here so
/// the loop always moves on to the next file.
async fn process_file(pool: &SqlitePool, file: &ScannedFile, full: bool) -> FileOutcome {
    match try_process_file(pool, file, full).await {
        Ok(outcome) => outcome,
        Err(err) => FileOutcome::Failed {
            error: format!("{err:#}"),
        },
    }
}

async fn try_process_file(
    pool: &SqlitePool,
    file: &ScannedFile,
    full: bool,
) -> Result<FileOutcome> {
    let file_name = &file.file_name;

    let code = match code::extract_code(file_name) {
        Ok(code) => code,
        Err(reason) => return Ok(FileOutcome::Skipped { reason }),
    };

    let raw = std::fs::read_to_string(&file.path)
        .with_context(|| format!("failed to read {}", file.path.display()))?;
    let new_hash = detect::fingerprint(&raw);

    if !full {
        let prior_hash = store::stored_hash(pool, &code).await?;
        let block_count = store::persisted_block_count(pool, &code).await?;
        match detect::decide(prior_hash.as_deref(), &new_hash, block_count) {
            Decision::Skip => {
                return Ok(FileOutcome::Skipped {
                    reason: SkipReason::Unchanged,
                })
            }
            Decision::Reprocess(ReprocessReason::Repair) => {
                println!(
                    "  {}: registry unchanged but no blocks stored; reprocessing",
                    file_name
                );
            }
            Decision::Reprocess(_) => {}
        }
    }

    let stages = match parser::parse_document(&raw) {
        Ok(stages) => stages,
        Err(err) => {
            // Parse failures leave prior state untouched.
            return Ok(FileOutcome::Failed {
                error: err.to_string(),
            });
        }
    };

    let blocks = store::upsert_file(pool, &code, file_name, &raw, &new_hash, &stages).await?;
    Ok(FileOutcome::Processed { blocks })
}
