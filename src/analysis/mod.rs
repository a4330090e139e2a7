//! Rule-based analysis of extracted options
//!
//! The analyzer resolves every extracted key against an [`OptionDictionary`],
//! runs value rules, checks required options and a best-practice checklist,
//! and folds the findings into a 0-100 health score.

mod recommendations;
mod rules;
mod score;
mod types;

pub use recommendations::{Check, CHECKLIST};
pub use rules::{
    default_rules, DebugEnabledRule, DsnRule, PiiEnabledRule, SampleRateRangeRule, TracesQuotaRule,
    TypeMismatchRule, ValueRule,
};
pub use score::{compute as compute_score, summarize, ScoreInputs, BONUS_OPTIONS};
pub use types::{AnalysisResult, Diagnostic, OptionAnalysis, Priority, Recommendation, Severity};

use crate::dictionary::OptionDictionary;
use crate::extract::{ExtractedOption, ExtractionResult};
use crate::normalize::has_logical_option;
use crate::syntax::{SyntaxDefinition, SyntaxId, SyntaxRegistry};
use std::sync::Arc;
use tracing::debug;

pub struct Analyzer {
    dictionary: Arc<OptionDictionary>,
    registry: Arc<SyntaxRegistry>,
    rules: Vec<Box<dyn ValueRule>>,
}

impl Analyzer {
    pub fn new(dictionary: Arc<OptionDictionary>) -> Self {
        Self {
            dictionary,
            registry: Arc::new(SyntaxRegistry::with_defaults()),
            rules: default_rules(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Box<dyn ValueRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Syntaxes used to render recommendation examples
    pub fn with_registry(mut self, registry: Arc<SyntaxRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn dictionary(&self) -> &OptionDictionary {
        &self.dictionary
    }

    pub fn analyze(&self, extraction: &ExtractionResult, target: SyntaxId) -> AnalysisResult {
        if !extraction.valid {
            debug!(syntax = %target, errors = extraction.errors.len(), "skipping analysis of invalid extraction");
            return AnalysisResult {
                valid: false,
                syntax: target,
                summary: "Configuration could not be parsed, so no score was computed.".to_string(),
                options: Vec::new(),
                missing_required: Vec::new(),
                diagnostics: vec![Diagnostic::error("parse-failed", "Failed to parse configuration")],
                recommendations: Vec::new(),
                score: None,
                errors: extraction.errors.clone(),
            };
        }

        let syntax = self.registry.get(target);
        let options: Vec<OptionAnalysis> = extraction
            .options
            .values()
            .map(|option| self.analyze_option(option, target, syntax))
            .collect();

        let missing_required: Vec<Diagnostic> = self
            .dictionary
            .required()
            .into_iter()
            .filter(|required| !self.is_present(extraction, &required.key))
            .map(|required| {
                Diagnostic::error(
                    "missing-required",
                    format!("Required option '{}' is not set", native_key(syntax, &required.key)),
                )
            })
            .collect();

        let diagnostics: Vec<Diagnostic> = extraction
            .warnings
            .iter()
            .map(|warning| Diagnostic::info("extraction-note", warning.to_string()))
            .collect();

        let recommendations: Vec<Recommendation> = CHECKLIST
            .iter()
            .filter(|check| !check.satisfied_by.iter().any(|key| self.is_present(extraction, key)))
            .map(|check| check.recommend(syntax))
            .collect();

        let mut result = AnalysisResult {
            valid: true,
            syntax: target,
            summary: String::new(),
            options,
            missing_required,
            diagnostics,
            recommendations,
            score: None,
            errors: Vec::new(),
        };

        let count_priority =
            |p: Priority| result.recommendations.iter().filter(|r| r.priority == p).count();
        let inputs = ScoreInputs {
            errors: result.error_count(),
            warnings: result.warning_count(),
            high: count_priority(Priority::High),
            medium: count_priority(Priority::Medium),
            bonuses: BONUS_OPTIONS
                .iter()
                .filter(|key| self.is_present(extraction, key))
                .count(),
        };
        let score = score::compute(&inputs);
        debug!(syntax = %target, ?inputs, score, "scored configuration");

        result.summary = summarize(inputs.errors, inputs.warnings, score);
        result.score = Some(score);
        result
    }

    fn analyze_option(
        &self,
        option: &ExtractedOption,
        target: SyntaxId,
        syntax: Option<&dyn SyntaxDefinition>,
    ) -> OptionAnalysis {
        let Some(definition) = self.dictionary.resolve(&option.key) else {
            let mut message = format!(
                "Unknown option '{}'; it may be deprecated or specific to another SDK",
                option.key
            );
            if let Some(suggestion) = self.dictionary.suggest(&option.key) {
                message.push_str(&format!(
                    ". Did you mean '{}'?",
                    native_key(syntax, &suggestion.key)
                ));
            }
            debug!(key = %option.key, "unknown option");
            return OptionAnalysis {
                option: option.clone(),
                definition: None,
                diagnostics: vec![Diagnostic::warning("unknown-option", message).for_option(&option.key)],
            };
        };
        debug!(key = %option.key, canonical = %definition.key, "resolved option");

        let mut diagnostics = Vec::new();
        if !definition.applies_to(target) {
            diagnostics.push(
                Diagnostic::warning(
                    "unsupported-syntax",
                    format!("'{}' is not an option of the {} SDK", option.key, target.name()),
                )
                .for_option(&option.key),
            );
        }
        for warning in &definition.warnings {
            diagnostics.push(Diagnostic::info("option-note", warning.clone()).for_option(&option.key));
        }
        for rule in &self.rules {
            diagnostics.extend(rule.check(option, definition, target));
        }

        OptionAnalysis {
            option: option.clone(),
            definition: Some(definition.clone()),
            diagnostics,
        }
    }

    /// Present when any spelling of `canonical`, or one of its aliases, was extracted
    fn is_present(&self, extraction: &ExtractionResult, canonical: &str) -> bool {
        has_logical_option(extraction, canonical)
            || extraction.keys().any(|key| {
                self.dictionary
                    .resolve(key)
                    .is_some_and(|definition| definition.key == canonical)
            })
    }
}

fn native_key(syntax: Option<&dyn SyntaxDefinition>, canonical: &str) -> String {
    syntax.map_or_else(|| canonical.to_string(), |s| s.descriptor().native_key(canonical))
}
