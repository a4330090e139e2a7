use crate::syntax::SyntaxId;
use serde::Serialize;
use thiserror::Error;

crate::define_id_enum! {
    /// Functional area an option belongs to
    OptionCategory {
        Core => "core" : "Core",
        Sampling => "sampling" : "Sampling",
        Tracing => "tracing" : "Tracing",
        Profiling => "profiling" : "Profiling",
        Replay => "replay" : "Session Replay" | "replays",
        Privacy => "privacy" : "Privacy" | "pii",
        Hooks => "hooks" : "Hooks" | "callbacks",
        Filtering => "filtering" : "Filtering",
        Integrations => "integrations" : "Integrations",
        Transport => "transport" : "Transport",
        Debugging => "debugging" : "Debugging" | "debug",
        Sessions => "sessions" : "Sessions",
        Mobile => "mobile" : "Mobile",
    }
}

crate::define_id_enum! {
    /// Semantic type the SDK expects for an option
    OptionType {
        String => "string" : "string",
        Number => "number" : "number",
        Boolean => "boolean" : "boolean" | "bool",
        Array => "array" : "array" | "list",
        Callback => "callback" : "callback" | "function",
        Regex => "regex" : "regex",
        Object => "object" : "object",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryOption {
    /// Canonical camel-case key
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub option_type: OptionType,
    pub category: OptionCategory,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    /// Syntaxes the option exists in; `None` means every SDK
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntaxes: Option<Vec<SyntaxId>>,
    /// SDK-specific spellings that mean the same option
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl DictionaryOption {
    pub fn new(
        key: &str,
        display_name: &str,
        category: OptionCategory,
        option_type: OptionType,
        description: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            option_type,
            category,
            required: false,
            default_value: None,
            example: None,
            guidance: None,
            warnings: Vec::new(),
            related: Vec::new(),
            syntaxes: None,
            aliases: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn example(mut self, value: &str) -> Self {
        self.example = Some(value.to_string());
        self
    }

    pub fn guidance(mut self, text: &str) -> Self {
        self.guidance = Some(text.to_string());
        self
    }

    pub fn warning(mut self, text: &str) -> Self {
        self.warnings.push(text.to_string());
        self
    }

    pub fn related(mut self, keys: &[&str]) -> Self {
        self.related.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn only_for(mut self, syntaxes: &[SyntaxId]) -> Self {
        self.syntaxes = Some(syntaxes.to_vec());
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn applies_to(&self, syntax: SyntaxId) -> bool {
        self.syntaxes
            .as_ref()
            .map_or(true, |syntaxes| syntaxes.contains(&syntax))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("Duplicate dictionary key: {0}")]
    DuplicateKey(String),
    #[error("Alias '{alias}' collides with existing option '{existing}'")]
    AliasCollision { alias: String, existing: String },
}
