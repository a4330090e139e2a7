//! Go (`sentry.Init(sentry.ClientOptions{ ... })`)

use super::{
    patterns, Anchor, ArrayShape, BodyEnd, NamingConvention, QuoteStyle, SyntaxDefinition,
    SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        quotes: vec![
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
            QuoteStyle::raw("`", "`"),
        ],
        anchor_keywords: &["sentry.Init"],
        anchors: vec![
            Anchor::new(
                r"\bsentry\.Init\s*\(\s*(?:&\s*)?sentry\.ClientOptions\s*\{",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(r"\bsentry\.ClientOptions\s*\{", BodyEnd::Delimiter(b'}')),
        ],
        null_keywords: &["nil"],
        callables: patterns(&[r"^func\s*\("]),
        arrays: vec![ArrayShape::new(r"^\[\]\s*\*?[\w.]+\s*\{", b'}')],
        naming: NamingConvention::Pascal,
        key_overrides: &[("sendDefaultPii", "SendDefaultPII")],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct GoSyntax;

impl SyntaxDefinition for GoSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Go
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn example(&self) -> &'static str {
        "sentry.Init(sentry.ClientOptions{ Dsn: \"...\" })"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("{}: {},", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "func(event *sentry.Event, hint *sentry.EventHint) *sentry.Event { return event }"
            .to_string()
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("[]string{{{}}}", items.join(", "))
    }
}
