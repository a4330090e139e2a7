//! Elixir (`config :sentry, dsn: ..., environment_name: ...`)

use super::{
    patterns, Anchor, BlockKeywords, BodyEnd, Fallback, NamingConvention, QuoteStyle,
    SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        line_comments: &["#"],
        block_comments: &[],
        quotes: vec![
            QuoteStyle::escaped("\"\"\"", "\"\"\"", true),
            QuoteStyle::escaped("'''", "'''", true),
            QuoteStyle::escaped("\"", "\"", true),
            QuoteStyle::escaped("'", "'", true),
        ],
        block_keywords: Some(BlockKeywords {
            openers: &["do", "fn"],
            line_openers: &[],
            closer: "end",
        }),
        anchor_keywords: &[":sentry"],
        anchors: vec![Anchor::new(
            r"(?m)^[ \t]*config\s+:sentry\b\s*,?",
            BodyEnd::Statement,
        )],
        fallback: Some(Fallback::Delimited(b'[', b']')),
        null_keywords: &["nil"],
        symbol_prefix: Some(b':'),
        callables: patterns(&[
            r"^fn\b",
            r"^&",
            r"^\{\s*[A-Z][\w.]*\s*,\s*:\w+\s*\}$",
        ]),
        naming: NamingConvention::Snake,
        key_overrides: &[("environment", "environment_name")],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct ElixirSyntax;

impl SyntaxDefinition for ElixirSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Elixir
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["ex", "exs"]
    }

    fn example(&self) -> &'static str {
        "config :sentry, dsn: \"...\""
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("{}: {}", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "{MyApp.Sentry, :before_send}".to_string()
    }
}
