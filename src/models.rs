//! Core data models for the knowledge-point ingestion pipeline.
//!
//! These types represent the parsed stage/module structure of a source
//! document and the per-file outcomes that flow into the import report.

use std::fmt;

/// One of the three fixed learning stages inside a knowledge-point document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Stage1,
    Stage2,
    Stage3,
}

impl Stage {
    /// Storage key for this stage (`stage1` / `stage2` / `stage3`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Stage1 => "stage1",
            Stage::Stage2 => "stage2",
            Stage::Stage3 => "stage3",
        }
    }

    /// Map a stage-header numeral (一/二/三) to its stage.
    pub fn from_marker(marker: char) -> Option<Stage> {
        match marker {
            '一' => Some(Stage::Stage1),
            '二' => Some(Stage::Stage2),
            '三' => Some(Stage::Stage3),
            _ => None,
        }
    }
}

/// Closed set of module codes that may appear in a module header tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCode {
    M02,
    M03,
    M04,
    M05,
    M06,
}

impl ModuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleCode::M02 => "M02",
            ModuleCode::M03 => "M03",
            ModuleCode::M04 => "M04",
            ModuleCode::M05 => "M05",
            ModuleCode::M06 => "M06",
        }
    }

    pub fn parse(s: &str) -> Option<ModuleCode> {
        match s {
            "M02" => Some(ModuleCode::M02),
            "M03" => Some(ModuleCode::M03),
            "M04" => Some(ModuleCode::M04),
            "M05" => Some(ModuleCode::M05),
            "M06" => Some(ModuleCode::M06),
            _ => None,
        }
    }
}

/// One stage parsed from a source document, in file order.
///
/// A stage with zero modules is kept structurally but persists nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStage {
    pub stage: Stage,
    /// Original header line, trimmed.
    pub heading: String,
    pub modules: Vec<ParsedModule>,
}

/// One module block parsed from a stage body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModule {
    pub module: ModuleCode,
    /// Human-readable label from the module header tag.
    pub title: String,
    /// Verbatim captured lines. Trailing blank lines are trimmed,
    /// internal blank lines are preserved.
    pub content: String,
}

/// Why a file was skipped rather than processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Filename has no leading code pattern at all.
    NoCodeMatch,
    /// A leading pattern matched but the extracted code fails strict
    /// three-segment validation.
    InvalidCode(String),
    /// Content hash matches the registry and blocks are already stored.
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCodeMatch => {
                write!(f, "filename does not match the knowledge-point code pattern")
            }
            SkipReason::InvalidCode(code) => {
                write!(f, "extracted code '{}' is not a valid knowledge-point code", code)
            }
            SkipReason::Unchanged => write!(f, "content unchanged"),
        }
    }
}

/// Terminal outcome for one scanned file. Every file gets exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed { blocks: u64 },
    Skipped { reason: SkipReason },
    Failed { error: String },
}
