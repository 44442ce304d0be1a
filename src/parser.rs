//! Stage/module structure parser for knowledge-point documents.
//!
//! A source document is a sequence of up to three stage sections, each
//! introduced by a `第X阶段` header line and containing module blocks
//! introduced by `【…｜M0x｜title】` tag lines. Everything else is opaque
//! content belonging to the most recently opened module.
//!
//! Parsing is split into a line classifier and a small state machine with
//! states {no stage, in stage, in module}, so the flush-on-header behavior
//! and the trailing-blank-trim rule are testable on their own.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{ModuleCode, ParsedModule, ParsedStage, Stage};

/// Module header tag: fullwidth brackets and bars, e.g. `【模块｜M02｜核心概念】`.
static MODULE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"【[^】]*｜(M0[2-6])｜([^】]*)】").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The document contains no recognizable stage header at all.
    #[error("no stage markers found")]
    NoStages,
    /// Stage headers were found but no module tag anywhere under them.
    #[error("stage markers found but no module tags")]
    NoModules,
}

/// Classification of a single input line.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    StageHeader { stage: Stage, heading: &'a str },
    ModuleHeader { module: ModuleCode, title: String },
    Content(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    // Stage header: `第` + 一/二/三 + `阶段` at line start, anything after.
    if let Some(rest) = trimmed.strip_prefix('第') {
        let mut chars = rest.chars();
        if let Some(marker) = chars.next() {
            if let Some(stage) = Stage::from_marker(marker) {
                if chars.as_str().starts_with("阶段") {
                    return Line::StageHeader {
                        stage,
                        heading: trimmed,
                    };
                }
            }
        }
    }

    if let Some(caps) = MODULE_TAG.captures(line) {
        if let Some(module) = ModuleCode::parse(&caps[1]) {
            return Line::ModuleHeader {
                module,
                title: caps[2].trim().to_string(),
            };
        }
    }

    Line::Content(line)
}

/// Parse raw document text into its ordered stage/module tree.
///
/// A stage whose body never opens a module yields zero modules; that is
/// expected. A document with no stage header at all, or with stages but
/// no module anywhere, has no exploitable structure and is a parse error.
pub fn parse_document(text: &str) -> Result<Vec<ParsedStage>, ParseError> {
    let mut stages: Vec<ParsedStage> = Vec::new();
    let mut open_module: Option<(ModuleCode, String)> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        match classify(line) {
            Line::StageHeader { stage, heading } => {
                flush_module(&mut stages, &mut open_module, &mut buffer);
                stages.push(ParsedStage {
                    stage,
                    heading: heading.to_string(),
                    modules: Vec::new(),
                });
            }
            Line::ModuleHeader { module, title } => {
                // A module tag before any stage header has nothing to
                // attach to; drop it like unattached content.
                if stages.is_empty() {
                    continue;
                }
                flush_module(&mut stages, &mut open_module, &mut buffer);
                open_module = Some((module, title));
            }
            Line::Content(content) => {
                // Lines before the first stage header are ignored. Inside a
                // stage but before its first module, lines are buffered
                // speculatively; they are dropped if no module ever opens.
                if !stages.is_empty() {
                    buffer.push(content);
                }
            }
        }
    }

    flush_module(&mut stages, &mut open_module, &mut buffer);

    if stages.is_empty() {
        return Err(ParseError::NoStages);
    }
    if stages.iter().all(|s| s.modules.is_empty()) {
        return Err(ParseError::NoModules);
    }

    Ok(stages)
}

/// Close the open module, if any: trim trailing blank lines from its
/// buffered content and attach it to the current stage. The buffer is
/// cleared either way, so speculative pre-module lines never leak into
/// the next module.
fn flush_module(
    stages: &mut [ParsedStage],
    open_module: &mut Option<(ModuleCode, String)>,
    buffer: &mut Vec<&str>,
) {
    let lines = std::mem::take(buffer);

    if let Some((module, title)) = open_module.take() {
        let mut lines = lines;
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        // A module can only be open while a stage is open.
        if let Some(stage) = stages.last_mut() {
            stage.modules.push(ParsedModule {
                module,
                title,
                content: lines.join("\n"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_stages_with_modules_in_first() {
        let text = "第一阶段：基础\n\
                    【模块｜M02｜核心概念】\n\
                    第一行\n\
                    \n\
                    第三行\n\
                    【模块｜M03｜重点提示】\n\
                    提示内容\n\
                    \n\
                    第二阶段：进阶\n";
        let stages = parse_document(text).unwrap();

        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].stage, Stage::Stage1);
        assert_eq!(stages[0].modules.len(), 2);
        assert_eq!(stages[1].stage, Stage::Stage2);
        assert_eq!(stages[1].modules.len(), 0);

        // Internal blank line kept, trailing blank line trimmed.
        let m02 = &stages[0].modules[0];
        assert_eq!(m02.module, ModuleCode::M02);
        assert_eq!(m02.title, "核心概念");
        assert_eq!(m02.content, "第一行\n\n第三行");

        let m03 = &stages[0].modules[1];
        assert_eq!(m03.module, ModuleCode::M03);
        assert_eq!(m03.content, "提示内容");
    }

    #[test]
    fn test_stage_heading_is_preserved_verbatim() {
        let text = "第三阶段：冲刺串讲\n【考点｜M04｜真题】\n题目\n";
        let stages = parse_document(text).unwrap();
        assert_eq!(stages[0].heading, "第三阶段：冲刺串讲");
        assert_eq!(stages[0].stage, Stage::Stage3);
    }

    #[test]
    fn test_content_before_first_module_is_dropped() {
        let text = "第一阶段\n\
                    引言，没有模块标签\n\
                    【模块｜M05｜记忆口诀】\n\
                    口诀内容\n";
        let stages = parse_document(text).unwrap();
        assert_eq!(stages[0].modules.len(), 1);
        assert_eq!(stages[0].modules[0].content, "口诀内容");
    }

    #[test]
    fn test_last_module_flushes_at_eof() {
        let text = "第二阶段\n【模块｜M06｜易错辨析】\n最后一行";
        let stages = parse_document(text).unwrap();
        assert_eq!(stages[0].modules[0].content, "最后一行");
    }

    #[test]
    fn test_no_stage_markers_is_error() {
        let text = "只有内容\n【模块｜M02｜核心概念】\n正文\n";
        assert_eq!(parse_document(text), Err(ParseError::NoStages));
    }

    #[test]
    fn test_stages_without_any_module_is_error() {
        let text = "第一阶段\n正文但没有模块标签\n第二阶段\n";
        assert_eq!(parse_document(text), Err(ParseError::NoModules));
    }

    #[test]
    fn test_unknown_module_code_is_plain_content() {
        let text = "第一阶段\n\
                    【模块｜M02｜核心概念】\n\
                    【模块｜M99｜不存在】\n\
                    正文\n";
        let stages = parse_document(text).unwrap();
        assert_eq!(stages[0].modules.len(), 1);
        assert_eq!(stages[0].modules[0].content, "【模块｜M99｜不存在】\n正文");
    }

    #[test]
    fn test_stage_header_tolerates_colon_and_spacing() {
        for text in [
            "第一阶段\n【模块｜M02｜a】\nx\n",
            "第一阶段：\n【模块｜M02｜a】\nx\n",
            "第一阶段 要点\n【模块｜M02｜a】\nx\n",
        ] {
            let stages = parse_document(text).unwrap();
            assert_eq!(stages[0].stage, Stage::Stage1, "input: {text:?}");
        }
    }

    #[test]
    fn test_module_content_captured_verbatim() {
        let text = "第一阶段\n【模块｜M02｜a】\n  缩进保留\n尾部空白行被去掉\n\n\n";
        let stages = parse_document(text).unwrap();
        assert_eq!(stages[0].modules[0].content, "  缩进保留\n尾部空白行被去掉");
    }
}
