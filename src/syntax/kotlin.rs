//! Kotlin (`SentryAndroid.init(context) { options -> ... }`)

use super::{
    number_pattern, patterns, Anchor, ArrayShape, AssignmentStyle, BodyEnd, Fallback, QuoteStyle,
    SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        nested_block_comments: true,
        quotes: vec![
            QuoteStyle::raw("\"\"\"", "\"\"\""),
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
        ],
        generics: true,
        separators: b"\n;",
        assignments: &[AssignmentStyle::Receiver, AssignmentStyle::Setter],
        default_receiver: "it",
        anchor_keywords: &["Sentry.init", "SentryAndroid.init"],
        anchors: vec![Anchor::new(
            r"\bSentry(?:Android)?\.init\s*(?:\([^(){}]*\))?\s*\{\s*(?:(?P<recv>\w+)\s*->)?",
            BodyEnd::Delimiter(b'}'),
        )],
        fallback: Some(Fallback::ReceiverStatements),
        number: number_pattern("f|F|L"),
        callables: patterns(&[
            r"^\{",
            r"^fun\b",
            r"^(?:[\w.]+)?::\w+$",
            r"^(?:SentryOptions\.)?\w+Callback\s*\{",
        ]),
        arrays: vec![ArrayShape::new(
            r"^(?:listOf|arrayOf|setOf|mutableListOf|mutableSetOf)(?:<[^>]*>)?\s*\(",
            b')',
        )],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct KotlinSyntax;

impl SyntaxDefinition for KotlinSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Kotlin
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["kt", "kts"]
    }

    fn example(&self) -> &'static str {
        "SentryAndroid.init(this) { options -> options.dsn = \"...\" }"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("options.{} = {}", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "SentryOptions.BeforeSendCallback { event, _ -> event }".to_string()
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("listOf({})", items.join(", "))
    }
}
