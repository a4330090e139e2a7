use super::types::Diagnostic;
use crate::dictionary::{DictionaryOption, OptionType};
use crate::extract::{ExtractedOption, ExtractedValue, ValueType};
use crate::normalize::fold;
use crate::syntax::SyntaxId;
use regex::Regex;
use std::sync::LazyLock;

static DSN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9+.-]*://[^@/\s]+@[^/\s]+/(?:[^\s]*/)?\d+/?$").expect("valid DSN pattern")
});

/// A check applied to the value of one recognized option
pub trait ValueRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, syntax: SyntaxId) -> Vec<Diagnostic>;
}

pub fn default_rules() -> Vec<Box<dyn ValueRule>> {
    vec![
        Box::new(DsnRule),
        Box::new(SampleRateRangeRule),
        Box::new(TracesQuotaRule),
        Box::new(DebugEnabledRule),
        Box::new(PiiEnabledRule),
        Box::new(TypeMismatchRule),
    ]
}

pub struct DsnRule;

impl ValueRule for DsnRule {
    fn name(&self) -> &'static str {
        "Dsn"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if definition.key != "dsn" {
            return Vec::new();
        }
        // Values read from the environment are not checked
        let Some(dsn) = option.value.as_str() else {
            return Vec::new();
        };
        let dsn = dsn.trim();
        if dsn.is_empty() {
            return vec![Diagnostic::warning("dsn-format", "DSN is empty, so the SDK will not send any events")
                .for_option(&option.key)];
        }

        let mut diagnostics = Vec::new();
        match dsn.split_once("://") {
            Some((scheme, _)) if !scheme.eq_ignore_ascii_case("https") => {
                diagnostics.push(
                    Diagnostic::error(
                        "dsn-insecure",
                        format!("DSN uses the insecure '{}' scheme; use https:// so events are encrypted in transit", scheme),
                    )
                    .for_option(&option.key),
                );
            }
            _ => {}
        }
        if !DSN_SHAPE.is_match(&dsn.to_ascii_lowercase()) {
            diagnostics.push(
                Diagnostic::warning(
                    "dsn-format",
                    "DSN does not look like https://<public-key>@<host>/<project-id>",
                )
                .for_option(&option.key),
            );
        }
        diagnostics
    }
}

pub struct SampleRateRangeRule;

impl ValueRule for SampleRateRangeRule {
    fn name(&self) -> &'static str {
        "SampleRateRange"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if !fold(&definition.key).ends_with("samplerate") {
            return Vec::new();
        }
        match option.value.as_f64() {
            Some(rate) if !(0.0..=1.0).contains(&rate) => vec![Diagnostic::error(
                "sample-rate-range",
                format!("{} is {} but must be between 0.0 and 1.0", option.key, rate),
            )
            .for_option(&option.key)],
            _ => Vec::new(),
        }
    }
}

pub struct TracesQuotaRule;

impl ValueRule for TracesQuotaRule {
    fn name(&self) -> &'static str {
        "TracesQuota"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if definition.key != "tracesSampleRate" || option.value.as_f64() != Some(1.0) {
            return Vec::new();
        }
        vec![Diagnostic::warning(
            "traces-quota",
            format!(
                "{} of 1.0 sends 100% of transactions, which can exhaust your quota in production; consider 0.1 to 0.2",
                option.key
            ),
        )
        .for_option(&option.key)]
    }
}

pub struct DebugEnabledRule;

impl ValueRule for DebugEnabledRule {
    fn name(&self) -> &'static str {
        "DebugEnabled"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if definition.key != "debug" || option.value.as_bool() != Some(true) {
            return Vec::new();
        }
        vec![Diagnostic::warning(
            "debug-enabled",
            "Debug mode is on; disable it in production to avoid noisy SDK logging",
        )
        .for_option(&option.key)]
    }
}

pub struct PiiEnabledRule;

impl ValueRule for PiiEnabledRule {
    fn name(&self) -> &'static str {
        "PiiEnabled"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if definition.key != "sendDefaultPii" || option.value.as_bool() != Some(true) {
            return Vec::new();
        }
        vec![Diagnostic::warning(
            "pii-enabled",
            "Sending default PII attaches IP addresses, cookies and user data to events; make sure this is allowed by your privacy policy",
        )
        .for_option(&option.key)]
    }
}

/// Flags literals whose shape contradicts the option's declared type.
/// Expressions and nulls are never flagged since their type is unknown.
pub struct TypeMismatchRule;

impl TypeMismatchRule {
    fn accepts(expected: OptionType, actual: ValueType) -> bool {
        match actual {
            ValueType::Expression | ValueType::Null => true,
            ValueType::String => matches!(expected, OptionType::String | OptionType::Regex),
            ValueType::Number => expected == OptionType::Number,
            ValueType::Boolean => expected == OptionType::Boolean,
            ValueType::Array => expected == OptionType::Array,
            ValueType::Callback => matches!(expected, OptionType::Callback | OptionType::Object),
            ValueType::Regex => matches!(expected, OptionType::Regex | OptionType::String),
            ValueType::Object => matches!(expected, OptionType::Object | OptionType::Callback),
        }
    }
}

impl ValueRule for TypeMismatchRule {
    fn name(&self) -> &'static str {
        "TypeMismatch"
    }

    fn check(&self, option: &ExtractedOption, definition: &DictionaryOption, _syntax: SyntaxId) -> Vec<Diagnostic> {
        if Self::accepts(definition.option_type, option.value_type) {
            return Vec::new();
        }
        let shown = match &option.value {
            ExtractedValue::Raw(_) | ExtractedValue::Array(_) => option.raw.clone(),
            value => value.to_string(),
        };
        vec![Diagnostic::warning(
            "type-mismatch",
            format!(
                "{} expects a {} but is set to a {} ({})",
                option.key, definition.option_type, option.value_type, shown
            ),
        )
        .for_option(&option.key)]
    }
}
