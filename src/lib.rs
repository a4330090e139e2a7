//! initscope - extraction and review of Sentry SDK initialization snippets
//!
//! Support engineers receive SDK setup code in every language Sentry ships an
//! SDK for. This library pulls the configured options out of such a snippet
//! without compiling or running it, and reviews them against a dictionary of
//! known options.
//!
//! # Core Concepts
//!
//! - **Syntax**: a host language surface grammar, described by a table of
//!   comment, quote, separator and anchor rules ([`syntax`])
//! - **Extraction**: one generic scanner driven by that table turns text into
//!   an ordered option map ([`extract`])
//! - **Dictionary**: the canonical option registry, shared by `Arc` ([`dictionary`])
//! - **Analysis**: diagnostics, recommendations and a 0-100 health score
//!   ([`analysis`])
//!
//! # Example Usage
//!
//! ```
//! use initscope::{Analyzer, ConfigExtractor, OptionDictionary, SyntaxId};
//! use std::sync::Arc;
//!
//! let snippet = r#"
//! sentry_sdk.init(
//!     dsn="https://key@o1.ingest.sentry.io/2",
//!     traces_sample_rate=1.5,
//! )
//! "#;
//!
//! let extraction = ConfigExtractor::new().extract(SyntaxId::Python, snippet);
//! assert!(extraction.valid);
//!
//! let dictionary = Arc::new(OptionDictionary::with_defaults().unwrap());
//! let analysis = Analyzer::new(dictionary).analyze(&extraction, SyntaxId::Python);
//! assert!(analysis.has_code("sample-rate-range"));
//! assert!(analysis.score.unwrap() < 100);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod extract;
pub mod id_enum_macro;
pub mod normalize;
pub mod syntax;
pub mod util;

pub use analysis::{AnalysisResult, Analyzer, Diagnostic, Priority, Recommendation, Severity, ValueRule};
pub use config::{ConfigError, InitscopeConfig};
pub use dictionary::{DictionaryError, DictionaryOption, OptionCategory, OptionDictionary, OptionType};
pub use extract::{
    ConfigExtractor, ExtractedOption, ExtractedValue, ExtractionError, ExtractionLimits, ExtractionResult,
    ValueType,
};
pub use syntax::{SyntaxDefinition, SyntaxId, SyntaxRegistry};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "initscope");
    }
}
