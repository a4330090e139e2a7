//! Output formatting for multiple formats
//!
//! JSON and YAML serialize the result types directly. The human format is
//! meant for terminals and groups diagnostics under the option they concern.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{AnalysisResult, Diagnostic, Severity};
use crate::config::InitscopeConfig;
use crate::dictionary::DictionaryOption;
use crate::extract::ExtractionResult;
use crate::syntax::{SyntaxDefinition, SyntaxId, SyntaxRegistry};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Dictionary entry as listed by `initscope options`
#[derive(Debug, Serialize)]
pub struct OptionEntry<'a> {
    #[serde(flatten)]
    pub option: &'a DictionaryOption,
    /// Spelling in the syntax the listing was filtered by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyntaxInfo<'a> {
    pub id: SyntaxId,
    pub name: &'static str,
    pub extensions: &'a [&'a str],
    pub example: &'static str,
}

impl<'a> SyntaxInfo<'a> {
    pub fn of(syntax: &'a dyn SyntaxDefinition) -> Self {
        Self {
            id: syntax.id(),
            name: syntax.id().name(),
            extensions: syntax.extensions(),
            example: syntax.example(),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_analysis(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(result, "analysis result"),
            OutputFormat::Yaml => to_yaml(result, "analysis result"),
            OutputFormat::Human => Ok(self.format_analysis_human(result)),
        }
    }

    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(result, "extraction result"),
            OutputFormat::Yaml => to_yaml(result, "extraction result"),
            OutputFormat::Human => Ok(self.format_extraction_human(result)),
        }
    }

    pub fn format_options(&self, entries: &[OptionEntry<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&entries, "option list"),
            OutputFormat::Yaml => to_yaml(&entries, "option list"),
            OutputFormat::Human => Ok(self.format_options_human(entries)),
        }
    }

    pub fn format_syntaxes(&self, registry: &SyntaxRegistry) -> Result<String> {
        let infos: Vec<SyntaxInfo<'_>> = registry.all().into_iter().map(SyntaxInfo::of).collect();
        match self.format {
            OutputFormat::Json => to_json(&infos, "syntax list"),
            OutputFormat::Yaml => to_yaml(&infos, "syntax list"),
            OutputFormat::Human => Ok(self.format_syntaxes_human(&infos)),
        }
    }

    pub fn format_config(&self, config: &InitscopeConfig) -> Result<String> {
        let config_map = config.to_display_map();
        match self.format {
            OutputFormat::Json => to_json(&config_map, "config"),
            OutputFormat::Yaml => to_yaml(&config_map, "config"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    // Human-readable formatting methods

    fn format_analysis_human(&self, result: &AnalysisResult) -> String {
        let mut output = String::new();
        let name = result.syntax.name();

        if !result.valid {
            output.push_str(&format!("\u{2717} Sentry Configuration ({})\n{}\n\n", name, RULE));
            output.push_str(&format!("{}\n", result.summary));
            for error in &result.errors {
                output.push_str(&format!("  - {}\n", error));
            }
            return output;
        }

        let score = result.score.unwrap_or(0);
        let symbol = if result.error_count() == 0 { "\u{2713}" } else { "\u{26A0}" };
        output.push_str(&format!("{} Sentry Configuration ({})\n{}\n\n", symbol, name, RULE));

        let filled_blocks = (score as usize + 5) / 10;
        let bar = "\u{2588}".repeat(filled_blocks) + &"\u{2591}".repeat(10 - filled_blocks);
        output.push_str(&format!("Score: {} {}/100\n", bar, score));
        output.push_str(&format!("{}\n\n", result.summary));

        if result.options.is_empty() {
            output.push_str("Options: (none)\n\n");
        } else {
            output.push_str("Options:\n");
            for (i, analysis) in result.options.iter().enumerate() {
                let is_last = i == result.options.len() - 1;
                let connector = if is_last { "\u{2514}" } else { "\u{251C}" };
                let indent = if is_last { " " } else { "\u{2502}" };
                let option = &analysis.option;
                output.push_str(&format!(
                    "{}\u{2500} {} = {}  (line {})\n",
                    connector,
                    option.key,
                    preview(&option.raw),
                    option.line
                ));
                for diagnostic in &analysis.diagnostics {
                    output.push_str(&format!("{}    {}\n", indent, diagnostic_line(diagnostic)));
                }
            }
            output.push('\n');
        }

        if !result.missing_required.is_empty() {
            output.push_str("Missing Required Options:\n");
            for diagnostic in &result.missing_required {
                output.push_str(&format!("  {}\n", diagnostic_line(diagnostic)));
            }
            output.push('\n');
        }

        if !result.diagnostics.is_empty() {
            output.push_str("Notes:\n");
            for diagnostic in &result.diagnostics {
                output.push_str(&format!("  {}\n", diagnostic_line(diagnostic)));
            }
            output.push('\n');
        }

        if !result.recommendations.is_empty() {
            output.push_str("Recommendations:\n");
            for recommendation in &result.recommendations {
                output.push_str(&format!(
                    "  [{}] {}: {}\n",
                    recommendation.priority, recommendation.title, recommendation.message
                ));
                if let Some(ref example) = recommendation.example {
                    for line in example.lines() {
                        output.push_str(&format!("        {}\n", line));
                    }
                }
            }
        }

        output
    }

    fn format_extraction_human(&self, result: &ExtractionResult) -> String {
        let mut output = String::new();
        let symbol = if result.valid { "\u{2713}" } else { "\u{2717}" };
        output.push_str(&format!(
            "{} Extracted Options ({})\n{}\n\n",
            symbol,
            result.syntax.name(),
            RULE
        ));

        if !result.valid {
            for error in &result.errors {
                output.push_str(&format!("  - {}\n", error));
            }
            return output;
        }

        if result.is_empty() {
            output.push_str("(no options)\n");
        }
        let width = result.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for option in result.options.values() {
            output.push_str(&format!(
                "{:<width$}  {:<10} {}\n",
                option.key,
                option.value_type.to_string(),
                preview(&option.raw),
                width = width
            ));
        }

        if !result.warnings.is_empty() {
            output.push_str("\n\u{26A0} Warnings:\n");
            for warning in &result.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }
        output
    }

    fn format_options_human(&self, entries: &[OptionEntry<'_>]) -> String {
        let mut output = String::new();
        output.push_str(&format!("Sentry Options ({})\n{}\n\n", entries.len(), RULE));

        for entry in entries {
            let option = entry.option;
            let key = entry.native_key.as_deref().unwrap_or(&option.key);
            let required = if option.required { ", required" } else { "" };
            output.push_str(&format!(
                "{} ({}, {}{})\n",
                key, option.option_type, option.category, required
            ));
            output.push_str(&format!("  {}\n", option.description));
            if let Some(ref default) = option.default_value {
                output.push_str(&format!("  Default: {}\n", default));
            }
            if let Some(ref guidance) = option.guidance {
                output.push_str(&format!("  Guidance: {}\n", guidance));
            }
            for warning in &option.warnings {
                output.push_str(&format!("  \u{26A0} {}\n", warning));
            }
            if !option.related.is_empty() {
                output.push_str(&format!("  Related: {}\n", option.related.join(", ")));
            }
            output.push('\n');
        }
        output
    }

    fn format_syntaxes_human(&self, infos: &[SyntaxInfo<'_>]) -> String {
        let mut output = String::new();
        output.push_str(&format!("Supported Syntaxes\n{}\n\n", RULE));
        for info in infos {
            output.push_str(&format!("{:<11} {}\n", info.id.as_str(), info.name));
            output.push_str(&format!("  Extensions: {}\n", info.extensions.join(", ")));
            output.push_str(&format!("  Example:    {}\n\n", info.example));
        }
        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let symbol = match diagnostic.severity {
        Severity::Error => "\u{2717}",
        Severity::Warning => "\u{26A0}",
        Severity::Info => "\u{2139}",
    };
    format!("{} {} [{}] {}", symbol, diagnostic.severity, diagnostic.code, diagnostic.message)
}

/// First line of a raw value, shortened for one-line display
fn preview(raw: &str) -> String {
    let first = raw.lines().next().unwrap_or("");
    let multiline = raw.lines().nth(1).is_some();
    let shortened: String = first.chars().take(60).collect();
    if multiline || shortened.len() < first.len() {
        format!("{} \u{2026}", shortened)
    } else {
        shortened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::dictionary::OptionDictionary;
    use crate::extract::ConfigExtractor;
    use std::sync::Arc;

    const SNIPPET: &str = r#"Sentry.init({
  dsn: "https://key@o1.ingest.sentry.io/1",
  tracesSampleRate: 1.0,
  beforeSend(event) {
    return event;
  },
})"#;

    fn analysis() -> AnalysisResult {
        let extraction = ConfigExtractor::new().extract(SyntaxId::JavaScript, SNIPPET);
        let dictionary = Arc::new(OptionDictionary::with_defaults().unwrap());
        Analyzer::new(dictionary).analyze(&extraction, SyntaxId::JavaScript)
    }

    #[test]
    fn test_json_analysis() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_analysis(&analysis())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["syntax"], "javascript");
        assert!(value["score"].is_number());
        assert_eq!(value["options"][1]["option"]["key"], "tracesSampleRate");
    }

    #[test]
    fn test_yaml_extraction() {
        let extraction = ConfigExtractor::new().extract(SyntaxId::JavaScript, SNIPPET);
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_extraction(&extraction)
            .unwrap();
        assert!(output.contains("syntax: javascript"));
        assert!(output.contains("tracesSampleRate"));
    }

    #[test]
    fn test_human_analysis() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_analysis(&analysis())
            .unwrap();
        assert!(output.contains("Sentry Configuration (JavaScript)"));
        assert!(output.contains("Score:"));
        assert!(output.contains("[traces-quota]"));
        assert!(output.contains("beforeSend = beforeSend(event) { \u{2026}"));
        assert!(output.contains("Recommendations:"));
        assert!(output.contains("environment: \"production\","));
    }

    #[test]
    fn test_human_invalid_analysis() {
        let extraction = ConfigExtractor::new().extract(SyntaxId::Ruby, "puts 'hello'");
        let dictionary = Arc::new(OptionDictionary::with_defaults().unwrap());
        let result = Analyzer::new(dictionary).analyze(&extraction, SyntaxId::Ruby);
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_analysis(&result)
            .unwrap();
        assert!(output.starts_with("\u{2717}"));
        assert!(!output.contains("Score:"));
    }

    #[test]
    fn test_options_with_native_key() {
        let dictionary = OptionDictionary::with_defaults().unwrap();
        let option = dictionary.get("tracesSampleRate").unwrap();
        let entries = vec![OptionEntry {
            option,
            native_key: Some("traces_sample_rate".to_string()),
        }];

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_options(&entries)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["key"], "tracesSampleRate");
        assert_eq!(value[0]["native_key"], "traces_sample_rate");
        assert_eq!(value[0]["category"], "sampling");

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_options(&entries)
            .unwrap();
        assert!(human.contains("traces_sample_rate (number, Sampling)"));
    }

    #[test]
    fn test_syntax_listing() {
        let registry = SyntaxRegistry::with_defaults();
        let human = OutputFormatter::new(OutputFormat::Human)
            .format_syntaxes(&registry)
            .unwrap();
        assert!(human.contains("elixir"));
        let json = OutputFormatter::new(OutputFormat::Json)
            .format_syntaxes(&registry)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), registry.len());
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("0.5"), "0.5");
        assert_eq!(preview("a\nb"), "a \u{2026}");
        assert_eq!(preview(&"x".repeat(80)).chars().count(), 62);
    }
}
