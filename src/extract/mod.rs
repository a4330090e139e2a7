//! Configuration extraction
//!
//! One generic scanner handles every host syntax. The steps are:
//! blank comments, locate the anchored configuration body, split it into
//! depth-zero statements, parse each statement's binding, then infer the
//! value from its literal shape. Extraction is total: malformed input yields
//! an invalid [`ExtractionResult`] with errors, never a panic or `Err`.

mod block;
mod infer;
mod lexer;
mod statements;
mod types;

pub use block::Block;
pub use types::{ExtractedOption, ExtractedValue, ExtractionError, ExtractionResult, Position, ValueType};

use crate::syntax::{SyntaxDefinition, SyntaxId, SyntaxRegistry};
use indexmap::IndexMap;
use infer::Inference;
use types::LineIndex;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Resource caps applied to every extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_input_bytes: usize,
    /// Arrays nested deeper than this stay opaque
    pub max_nesting_depth: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Clone)]
pub struct ConfigExtractor {
    registry: Arc<SyntaxRegistry>,
    limits: ExtractionLimits,
}

impl ConfigExtractor {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(SyntaxRegistry::with_defaults()))
    }

    pub fn with_registry(registry: Arc<SyntaxRegistry>) -> Self {
        Self {
            registry,
            limits: ExtractionLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ExtractionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ExtractionLimits {
        self.limits
    }

    pub fn registry(&self) -> &SyntaxRegistry {
        &self.registry
    }

    pub fn extract(&self, syntax: SyntaxId, text: &str) -> ExtractionResult {
        if text.len() > self.limits.max_input_bytes {
            warn!(syntax = %syntax, size = text.len(), "input exceeds size limit");
            return ExtractionResult::failed(
                syntax,
                text,
                ExtractionError::new(format!(
                    "Input is {} bytes, larger than the {} byte limit",
                    text.len(),
                    self.limits.max_input_bytes
                )),
            );
        }

        let Some(definition) = self.registry.get(syntax) else {
            warn!(syntax = %syntax, "no syntax definition registered");
            return ExtractionResult::failed(
                syntax,
                text,
                ExtractionError::new(format!("No extraction rules registered for {}", syntax)),
            );
        };

        let descriptor = definition.descriptor();
        let stripped = lexer::strip_comments(text, descriptor);
        let block = match block::locate(&stripped, definition) {
            Ok(block) => block,
            Err(error) => {
                warn!(syntax = %syntax, error = %error, "no configuration block");
                return ExtractionResult::failed(syntax, text, error);
            }
        };
        debug!(
            syntax = %syntax,
            start = block.start,
            end = block.end,
            receiver = %block.receiver,
            "located configuration block"
        );

        let (options, warnings) = self.collect_options(definition, text, &stripped, &block);
        debug!(syntax = %syntax, options = options.len(), warnings = warnings.len(), "extraction complete");

        ExtractionResult {
            syntax,
            valid: true,
            options,
            source: text.to_string(),
            errors: Vec::new(),
            warnings,
        }
    }

    fn collect_options(
        &self,
        definition: &dyn SyntaxDefinition,
        text: &str,
        stripped: &str,
        block: &Block,
    ) -> (IndexMap<String, ExtractedOption>, Vec<ExtractionError>) {
        let descriptor = definition.descriptor();
        let body = &stripped[block.start..block.end];

        let mut items: Vec<_> = statements::split(body, block.start, descriptor, descriptor.separators)
            .into_iter()
            .filter(|item| {
                let spread = statements::is_spread(item.text(stripped), descriptor);
                if spread {
                    trace!(item = item.text(stripped), "skipping spread");
                }
                !spread
            })
            .collect();
        if descriptor.merge_continuations {
            items = statements::merge_continuations(stripped, items, descriptor);
        }

        let lines = LineIndex::new(text);
        let mut options: IndexMap<String, ExtractedOption> = IndexMap::new();
        let mut warnings = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let assignment = statements::parse_any(stripped, item, descriptor, &block.receiver).or_else(|| {
                let key = descriptor.positional_key.filter(|_| index == 0)?;
                Some(statements::Assignment {
                    key: key.to_string(),
                    value: item.start..item.end,
                    shorthand: false,
                })
            });
            let Some(assignment) = assignment else {
                debug!(item = item.text(stripped), "skipping statement without assignment");
                continue;
            };

            let code = &stripped[assignment.value.clone()];
            let raw = text
                .get(assignment.value.clone())
                .unwrap_or(code)
                .trim()
                .to_string();

            let (value, value_type) = if assignment.shorthand {
                (ExtractedValue::Raw(code.to_string()), ValueType::Callback)
            } else {
                let mut inference = Inference::new(descriptor, self.limits.max_nesting_depth);
                let inferred = inference.infer(code);
                if inference.depth_exceeded {
                    warnings.push(ExtractionError::located(
                        format!(
                            "Value of '{}' nests deeper than {} levels and was kept as raw text",
                            assignment.key, self.limits.max_nesting_depth
                        ),
                        lines.position(item.start),
                    ));
                }
                inferred
            };

            let line = lines.line(item.start);
            trace!(key = %assignment.key, value_type = %value_type, line, "extracted option");

            if let Some(previous) = options.get(&assignment.key) {
                warnings.push(ExtractionError::located(
                    format!(
                        "Option '{}' is set more than once (first on line {}); the last value wins",
                        assignment.key, previous.line
                    ),
                    lines.position(item.start),
                ));
            }
            options.insert(
                assignment.key.clone(),
                ExtractedOption {
                    key: assignment.key,
                    value,
                    raw,
                    value_type,
                    line,
                },
            );
        }

        (options, warnings)
    }
}

impl Default for ConfigExtractor {
    fn default() -> Self {
        Self::new()
    }
}
