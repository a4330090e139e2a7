//! Snippet templates shared by the integration tests

#![allow(dead_code)]

use initscope::{SyntaxId, SyntaxRegistry};
use std::path::PathBuf;

/// Wrapping idiom for one syntax: `open`, assignments joined by `joiner`, `close`
pub struct Template {
    pub syntax: SyntaxId,
    pub open: &'static str,
    pub close: &'static str,
    pub joiner: &'static str,
    /// A well-formed initialization without any options
    pub empty: &'static str,
}

pub fn template(syntax: SyntaxId) -> Template {
    let (open, close, joiner, empty) = match syntax {
        SyntaxId::JavaScript => ("Sentry.init({\n", "\n});\n", "\n", "Sentry.init({});"),
        SyntaxId::Python => ("sentry_sdk.init(\n", "\n)\n", "\n", "sentry_sdk.init()"),
        SyntaxId::Ruby => (
            "Sentry.init do |config|\n",
            "\nend\n",
            "\n",
            "Sentry.init do |config|\nend\n",
        ),
        SyntaxId::Php => ("\\Sentry\\init([\n", "\n]);\n", "\n", "\\Sentry\\init([]);"),
        SyntaxId::Go => (
            "sentry.Init(sentry.ClientOptions{\n",
            "\n})\n",
            "\n",
            "err := sentry.Init(sentry.ClientOptions{})",
        ),
        SyntaxId::Java => (
            "Sentry.init(options -> {\n",
            "\n});\n",
            "\n",
            "Sentry.init(options -> {\n});",
        ),
        SyntaxId::Kotlin => (
            "SentryAndroid.init(this) { options ->\n",
            "\n}\n",
            "\n",
            "SentryAndroid.init(this) { options ->\n}",
        ),
        SyntaxId::DotNet => (
            "SentrySdk.Init(options =>\n{\n",
            "\n});\n",
            "\n",
            "SentrySdk.Init(options => { });",
        ),
        SyntaxId::Cocoa => (
            "SentrySDK.start { options in\n",
            "\n}\n",
            "\n",
            "SentrySDK.start { options in\n}",
        ),
        SyntaxId::Dart => (
            "await SentryFlutter.init((options) {\n",
            "\n}, appRunner: () => runApp(MyApp()));\n",
            "\n",
            "await SentryFlutter.init((options) {}, appRunner: () => runApp(MyApp()));",
        ),
        SyntaxId::Rust => (
            "let _guard = sentry::init(sentry::ClientOptions {\n",
            "\n    ..Default::default()\n});\n",
            "\n",
            "let _guard = sentry::init(sentry::ClientOptions {\n    ..Default::default()\n});",
        ),
        SyntaxId::Elixir => ("config :sentry,\n", "\n", ",\n", "config :sentry\n"),
    };
    Template {
        syntax,
        open,
        close,
        joiner,
        empty,
    }
}

impl Template {
    /// Builds a snippet assigning already-rendered literals to canonical keys
    pub fn render(&self, options: &[(&str, &str)]) -> String {
        let registry = SyntaxRegistry::with_defaults();
        let syntax = registry.get(self.syntax).expect("syntax is registered");
        let lines: Vec<String> = options
            .iter()
            .map(|(canonical, literal)| {
                let key = syntax.descriptor().native_key(canonical);
                format!("    {}", syntax.render_assignment(&key, literal))
            })
            .collect();
        format!("{}{}{}", self.open, lines.join(self.joiner), self.close)
    }

    /// Native spelling of a canonical key as the extractor reports it
    pub fn key(&self, canonical: &str) -> String {
        let registry = SyntaxRegistry::with_defaults();
        let syntax = registry.get(self.syntax).expect("syntax is registered");
        syntax.descriptor().native_key(canonical)
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("snippets")
        .join(name)
}

pub fn initscope_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_initscope"))
}
