//! Locating the configuration body inside a snippet

use super::lexer::{self, SegmentKind};
use super::statements;
use super::types::ExtractionError;
use crate::syntax::{AssignmentStyle, BodyEnd, Fallback, SyntaxDefinition, SyntaxDescriptor};
use tracing::trace;

/// Byte range of the configuration body and the receiver its statements use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    pub receiver: String,
}

struct CodeMap {
    code: Vec<(usize, usize)>,
}

impl CodeMap {
    fn new(text: &str, syntax: &SyntaxDescriptor) -> Self {
        let code = lexer::segment(text, syntax)
            .into_iter()
            .filter(|s| s.kind == SegmentKind::Code)
            .map(|s| (s.start, s.end))
            .collect();
        Self { code }
    }

    fn is_code(&self, pos: usize) -> bool {
        let idx = self.code.partition_point(|(start, _)| *start <= pos);
        idx > 0 && pos < self.code[idx - 1].1
    }
}

/// `stripped` must already have its comments blanked out.
pub fn locate(stripped: &str, definition: &dyn SyntaxDefinition) -> Result<Block, ExtractionError> {
    let syntax = definition.descriptor();
    let code = CodeMap::new(stripped, syntax);

    for anchor in &syntax.anchors {
        for caps in anchor.pattern.captures_iter(stripped) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if !code.is_code(whole.start()) {
                trace!(offset = whole.start(), "anchor match inside a literal, skipping");
                continue;
            }
            let receiver = caps
                .name("recv")
                .map(|m| m.as_str())
                .unwrap_or(syntax.default_receiver)
                .to_string();
            let start = whole.end();
            let end = body_end(stripped, start, anchor.end, whole.as_str(), syntax).ok_or_else(|| {
                ExtractionError::at(
                    format!(
                        "Configuration block opened by '{}' is never closed",
                        whole.as_str().trim()
                    ),
                    stripped,
                    whole.start(),
                )
            })?;
            let (start, end) = match anchor.end {
                BodyEnd::Statement => unwrap_list(stripped, start, end, syntax),
                _ => (start, end),
            };
            return Ok(Block { start, end, receiver });
        }
    }

    if let Some(block) = fallback(stripped, syntax) {
        trace!("no anchor matched, accepting bare literal");
        return Ok(block);
    }

    for keyword in syntax.anchor_keywords {
        let found = stripped
            .match_indices(keyword)
            .find(|(pos, _)| code.is_code(*pos));
        if let Some((pos, _)) = found {
            return Err(ExtractionError::at(
                format!("Found '{}' but no configuration block follows it", keyword),
                stripped,
                pos,
            ));
        }
    }

    Err(ExtractionError::new(format!(
        "No {} Sentry initialization found; expected something like `{}`",
        definition.id().name(),
        definition.example()
    )))
}

fn body_end(
    text: &str,
    start: usize,
    end: BodyEnd,
    anchor_text: &str,
    syntax: &SyntaxDescriptor,
) -> Option<usize> {
    let body = &text[start..];
    let relative = match end {
        BodyEnd::Delimiter(close) => lexer::matching_close(body, syntax, close),
        BodyEnd::Keyword(keyword) => lexer::find_at_depth_zero(body, syntax, |cb| {
            cb.word.is_some_and(|(s, e)| &body[s..e] == keyword)
        }),
        BodyEnd::Statement => {
            if !anchor_text.trim_end().ends_with(',') {
                return Some(start);
            }
            let stop = lexer::find_at_depth_zero(body, syntax, |cb| {
                cb.byte == b'\n' && cb.prev.is_some_and(|p| p != b',')
            });
            Some(stop.unwrap_or(body.len()))
        }
    };
    relative.map(|r| start + r)
}

/// `config :app, [a: 1]` carries its keyword list inside brackets
fn unwrap_list(text: &str, start: usize, end: usize, syntax: &SyntaxDescriptor) -> (usize, usize) {
    let body = &text[start..end];
    let trimmed = body.trim_start();
    let open = start + (body.len() - trimmed.len());
    if !trimmed.starts_with('[') {
        return (start, end);
    }
    match lexer::matching_close(&text[open + 1..end], syntax, b']') {
        Some(close) if text[open + 1 + close + 1..end].trim().is_empty() => (open + 1, open + 1 + close),
        _ => (start, end),
    }
}

fn fallback(text: &str, syntax: &SyntaxDescriptor) -> Option<Block> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let offset = text.len() - text.trim_start().len();

    match syntax.fallback? {
        Fallback::Delimited(open, close) => {
            if trimmed.as_bytes()[0] != open {
                return None;
            }
            let inner_start = offset + 1;
            let close_pos = lexer::matching_close(&text[inner_start..], syntax, close)?;
            let end = inner_start + close_pos;
            text[end + 1..].trim().is_empty().then(|| Block {
                start: inner_start,
                end,
                receiver: syntax.default_receiver.to_string(),
            })
        }
        Fallback::ReceiverStatements => {
            let ident_end = trimmed
                .bytes()
                .position(|b| !(lexer::is_ident_byte(b) || b == b'$'))
                .unwrap_or(trimmed.len());
            if ident_end == 0 || trimmed.as_bytes().get(ident_end) != Some(&b'.') {
                return None;
            }
            let receiver = &trimmed[..ident_end];
            let first = statements::split(text, 0, syntax, syntax.separators).into_iter().next()?;
            let recognized = syntax.assignments.iter().any(|style| {
                matches!(style, AssignmentStyle::Receiver | AssignmentStyle::Setter)
                    && statements::parse_assignment(text, &first, syntax, receiver, *style).is_some()
            });
            recognized.then(|| Block {
                start: 0,
                end: text.len(),
                receiver: receiver.to_string(),
            })
        }
    }
}
