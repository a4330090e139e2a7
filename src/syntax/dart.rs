//! Dart and Flutter (`SentryFlutter.init((options) { ... })`)

use super::{
    patterns, Anchor, ArrayShape, AssignmentStyle, BodyEnd, Fallback, QuoteStyle,
    SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        nested_block_comments: true,
        quotes: vec![
            QuoteStyle::raw("r'''", "'''"),
            QuoteStyle::raw("r\"\"\"", "\"\"\""),
            QuoteStyle::escaped("'''", "'''", true),
            QuoteStyle::escaped("\"\"\"", "\"\"\"", true),
            QuoteStyle::raw("r'", "'"),
            QuoteStyle::raw("r\"", "\""),
            QuoteStyle::escaped("'", "'", false),
            QuoteStyle::escaped("\"", "\"", false),
        ],
        generics: true,
        separators: b";",
        assignments: &[AssignmentStyle::Receiver],
        anchor_keywords: &["SentryFlutter.init", "Sentry.init"],
        anchors: vec![Anchor::new(
            r"\bSentry(?:Flutter)?\.init\s*\(\s*\(\s*(?P<recv>\w+)\s*\)\s*(?:async\s*)?\{",
            BodyEnd::Delimiter(b'}'),
        )],
        fallback: Some(Fallback::ReceiverStatements),
        callables: patterns(&[r"^\([^()]*\)\s*(?:async\s*)?(?:=>|\{)"]),
        arrays: vec![ArrayShape::new(r"^(?:const\s+)?(?:<[^>]*>\s*)?\[", b']')],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct DartSyntax;

impl SyntaxDefinition for DartSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Dart
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["dart"]
    }

    fn example(&self) -> &'static str {
        "SentryFlutter.init((options) { options.dsn = '...'; });"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("options.{} = {};", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "(event, hint) => event".to_string()
    }

    fn render_string(&self, value: &str) -> String {
        format!("'{}'", value)
    }
}
