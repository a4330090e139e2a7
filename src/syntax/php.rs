//! PHP (`\Sentry\init([ ... ])`, including Laravel `config/sentry.php`)

use super::{
    patterns, Anchor, ArrayShape, AssignmentStyle, BodyEnd, Fallback, NamingConvention,
    QuoteStyle, SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        line_comments: &["//", "#"],
        quotes: vec![
            QuoteStyle::escaped("\"", "\"", true),
            QuoteStyle::escaped("'", "'", true),
        ],
        assignments: &[AssignmentStyle::Token("=>")],
        anchor_keywords: &["Sentry\\init"],
        anchors: vec![
            Anchor::new(r"\\?\bSentry\\init\s*\(\s*\[", BodyEnd::Delimiter(b']')),
            Anchor::new(
                r"\\?\bSentry\\init\s*\(\s*array\s*\(",
                BodyEnd::Delimiter(b')'),
            ),
            Anchor::new(r"(?m)^[ \t]*return\s*\[", BodyEnd::Delimiter(b']')),
        ],
        fallback: Some(Fallback::Delimited(b'[', b']')),
        spread_markers: &["..."],
        true_keywords: &["true", "TRUE"],
        false_keywords: &["false", "FALSE"],
        null_keywords: &["null", "NULL"],
        callables: patterns(&[r"^(?:static\s+)?function\b", r"^(?:static\s+)?fn\s*\("]),
        arrays: vec![
            ArrayShape::new(r"^\[", b']'),
            ArrayShape::new(r"^array\s*\(", b')'),
        ],
        naming: NamingConvention::Snake,
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct PhpSyntax;

impl SyntaxDefinition for PhpSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Php
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["php"]
    }

    fn example(&self) -> &'static str {
        "\\Sentry\\init(['dsn' => '...']);"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("'{}' => {},", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "function (\\Sentry\\Event $event, ?\\Sentry\\EventHint $hint): ?\\Sentry\\Event { return $event; }"
            .to_string()
    }

    fn render_string(&self, value: &str) -> String {
        format!("'{}'", value)
    }
}
