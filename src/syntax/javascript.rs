//! JavaScript and TypeScript (`Sentry.init({ ... })`)

use super::{
    patterns, Anchor, AssignmentStyle, BodyEnd, QuoteStyle, SyntaxDefinition, SyntaxDescriptor,
    SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        quotes: vec![
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
            QuoteStyle::escaped("`", "`", true),
        ],
        regex_literals: true,
        assignments: &[AssignmentStyle::Token(":"), AssignmentStyle::MethodShorthand],
        anchor_keywords: &["Sentry.init"],
        anchors: vec![Anchor::new(
            r"\bSentry\.init\s*\(\s*\{",
            BodyEnd::Delimiter(b'}'),
        )],
        spread_markers: &["..."],
        null_keywords: &["null", "undefined"],
        callables: patterns(&[
            r"^(?:async\s+)?function\b",
            r"^(?:async\s+)?(?:\([^()]*\)|[A-Za-z_$][\w$]*)\s*=>",
        ]),
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct JavaScriptSyntax;

impl SyntaxDefinition for JavaScriptSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::JavaScript
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["js", "mjs", "cjs", "jsx", "ts", "mts", "tsx"]
    }

    fn example(&self) -> &'static str {
        "Sentry.init({ dsn: \"...\" })"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("{}: {},", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "(event, hint) => event".to_string()
    }
}
