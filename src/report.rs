//! Import run reporting.
//!
//! The report is a pure fold over the per-file outcome list, serialized as
//! JSON to a fixed path (overwriting any prior run's report) and mirrored
//! as a console tally.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::models::FileOutcome;

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub total_files: u64,
    pub processed: u64,
    pub skipped: u64,
    pub upserted_blocks: u64,
    pub failed: u64,
    pub failed_files: Vec<FailedFile>,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

impl ImportReport {
    /// Fold the per-file outcomes into the run summary.
    pub fn from_outcomes(outcomes: &[(String, FileOutcome)]) -> Self {
        let mut report = ImportReport {
            total_files: outcomes.len() as u64,
            processed: 0,
            skipped: 0,
            upserted_blocks: 0,
            failed: 0,
            failed_files: Vec::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        };

        for (file, outcome) in outcomes {
            match outcome {
                FileOutcome::Processed { blocks } => {
                    report.processed += 1;
                    report.upserted_blocks += blocks;
                }
                FileOutcome::Skipped { .. } => {
                    report.skipped += 1;
                }
                FileOutcome::Failed { error } => {
                    report.failed += 1;
                    report.failed_files.push(FailedFile {
                        file: file.clone(),
                        error: error.clone(),
                    });
                }
            }
        }

        report
    }
}

/// Write the report artifact, replacing any report from an earlier run.
pub fn write_report(path: &Path, report: &ImportReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Console tally mirroring the report artifact.
pub fn print_summary(report: &ImportReport) {
    println!("  total files: {}", report.total_files);
    println!("  processed: {}", report.processed);
    println!("  skipped: {}", report.skipped);
    println!("  failed: {}", report.failed);
    println!("  blocks upserted: {}", report.upserted_blocks);
    if !report.failed_files.is_empty() {
        println!("  failures:");
        for f in &report.failed_files {
            println!("    {}: {}", f.file, f.error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkipReason;

    fn outcomes() -> Vec<(String, FileOutcome)> {
        vec![
            ("c1.1.1-a.txt".into(), FileOutcome::Processed { blocks: 3 }),
            ("c1.1.2-b.txt".into(), FileOutcome::Processed { blocks: 2 }),
            (
                "notes.txt".into(),
                FileOutcome::Skipped {
                    reason: SkipReason::NoCodeMatch,
                },
            ),
            (
                "c1.1.3-c.txt".into(),
                FileOutcome::Failed {
                    error: "no stage markers found".into(),
                },
            ),
        ]
    }

    #[test]
    fn test_counts_add_up_to_total() {
        let report = ImportReport::from_outcomes(&outcomes());
        assert_eq!(report.total_files, 4);
        assert_eq!(
            report.processed + report.skipped + report.failed,
            report.total_files
        );
    }

    #[test]
    fn test_blocks_are_summed_over_processed_files() {
        let report = ImportReport::from_outcomes(&outcomes());
        assert_eq!(report.upserted_blocks, 5);
    }

    #[test]
    fn test_failed_files_carry_filename_and_error() {
        let report = ImportReport::from_outcomes(&outcomes());
        assert_eq!(report.failed_files.len(), 1);
        assert_eq!(report.failed_files[0].file, "c1.1.3-c.txt");
        assert_eq!(report.failed_files[0].error, "no stage markers found");
    }

    #[test]
    fn test_empty_run_is_all_zeroes() {
        let report = ImportReport::from_outcomes(&[]);
        assert_eq!(report.total_files, 0);
        assert_eq!(report.upserted_blocks, 0);
        assert!(report.failed_files.is_empty());
    }
}
