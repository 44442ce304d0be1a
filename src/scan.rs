use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::Config;

/// A candidate source file found in the configured directory.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub file_name: String,
    pub path: PathBuf,
}

/// Enumerate candidate source files in the configured flat directory.
///
/// A missing directory is fatal for the whole run. Unreadable individual
/// files are not detected here; they surface at read time.
pub fn scan_source_dir(config: &Config) -> Result<Vec<ScannedFile>> {
    let root = &config.source.dir;
    if !root.exists() {
        bail!("Source directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.source.include_globs)?;
    let exclude_set = build_globset(&config.source.exclude_globs)?;

    let mut files = Vec::new();

    // The source layout is flat, so do not descend into subdirectories.
    for entry in WalkDir::new(root).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();

        if exclude_set.is_match(&file_name) {
            continue;
        }
        if !include_set.is_match(&file_name) {
            continue;
        }

        files.push(ScannedFile {
            file_name,
            path: entry.path().to_path_buf(),
        });
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
