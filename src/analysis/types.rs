use crate::dictionary::DictionaryOption;
use crate::extract::{ExtractedOption, ExtractionError};
use crate::syntax::SyntaxId;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable kebab-case identifier of the check that produced it
    pub code: &'static str,
    pub message: String,
    /// Key as written in the snippet, when the diagnostic is about one option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            option: None,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    pub fn for_option(mut self, key: &str) -> Self {
        self.option = Some(key.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    /// Canonical key of the option to add
    pub option: String,
    pub title: String,
    pub message: String,
    /// Snippet line in the target syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionAnalysis {
    pub option: ExtractedOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<DictionaryOption>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub valid: bool,
    pub syntax: SyntaxId,
    pub summary: String,
    pub options: Vec<OptionAnalysis>,
    pub missing_required: Vec<Diagnostic>,
    /// Findings about the snippet as a whole
    pub diagnostics: Vec<Diagnostic>,
    pub recommendations: Vec<Recommendation>,
    /// `None` when the snippet could not be parsed
    pub score: Option<u8>,
    pub errors: Vec<ExtractionError>,
}

impl AnalysisResult {
    /// Every diagnostic: per option, missing required, then snippet level
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.options
            .iter()
            .flat_map(|o| o.diagnostics.iter())
            .chain(self.missing_required.iter())
            .chain(self.diagnostics.iter())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.all_diagnostics().filter(|d| d.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.all_diagnostics().any(|d| d.code == code)
    }

    pub fn recommends(&self, canonical: &str) -> bool {
        self.recommendations.iter().any(|r| r.option == canonical)
    }
}
