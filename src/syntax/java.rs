//! Java (`Sentry.init(options -> { ... })`, `SentryAndroid.init(ctx, options -> { ... })`)

use super::{
    number_pattern, patterns, Anchor, ArrayShape, AssignmentStyle, BodyEnd, Fallback, QuoteStyle,
    SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use crate::normalize;
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        quotes: vec![
            QuoteStyle::escaped("\"\"\"", "\"\"\"", true),
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
        ],
        generics: true,
        separators: b";",
        assignments: &[AssignmentStyle::Setter, AssignmentStyle::Receiver],
        anchor_keywords: &["Sentry.init", "SentryAndroid.init"],
        anchors: vec![Anchor::new(
            r"\bSentry(?:Android)?\.init\s*\((?:[^,(){};]*,)?\s*\(?\s*(?:[\w.]+\s+)?(?P<recv>\w+)\s*\)?\s*->\s*\{",
            BodyEnd::Delimiter(b'}'),
        )],
        fallback: Some(Fallback::ReceiverStatements),
        number: number_pattern("f|F|d|D|L|l"),
        callables: patterns(&[
            r"^\(?[\w\s,]*\)?\s*->",
            r"^[\w.]+::\w+$",
            r"^new\s+[\w.]+(?:<[^>]*>)?\s*\([^)]*\)\s*\{",
        ]),
        arrays: vec![
            ArrayShape::new(r"^(?:Arrays\.asList|List\.of|Set\.of)\s*\(", b')'),
            ArrayShape::new(r"^new\s+[\w.]+\s*\[\s*\]\s*\{", b'}'),
        ],
        key_overrides: &[("ignoreErrors", "ignoredErrors")],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct JavaSyntax;

impl SyntaxDefinition for JavaSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Java
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["java"]
    }

    fn example(&self) -> &'static str {
        "Sentry.init(options -> { options.setDsn(\"...\"); });"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!(
            "options.set{}({});",
            normalize::to_pascal_case(native_key),
            literal
        )
    }

    fn render_callback(&self) -> String {
        "(event, hint) -> event".to_string()
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("List.of({})", items.join(", "))
    }
}
