//! Python (`sentry_sdk.init(...)`)

use super::{
    patterns, Anchor, AssignmentStyle, BodyEnd, Fallback, NamingConvention, QuoteStyle,
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
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
        ],
        assignments: &[AssignmentStyle::Token("=")],
        anchor_keywords: &["sentry_sdk.init"],
        anchors: vec![
            Anchor::new(r"\bsentry_sdk\.init\s*\(", BodyEnd::Delimiter(b')')),
            Anchor::new(r"(?m)^[ \t]*init\s*\(", BodyEnd::Delimiter(b')')),
        ],
        fallback: Some(Fallback::Delimited(b'(', b')')),
        spread_markers: &["**", "*"],
        merge_continuations: true,
        positional_key: Some("dsn"),
        true_keywords: &["True"],
        false_keywords: &["False"],
        null_keywords: &["None"],
        string_prefixes: &["rb", "br", "rf", "fr", "r", "b", "f", "u"],
        callables: patterns(&[r"^lambda\b"]),
        naming: NamingConvention::Snake,
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct PythonSyntax;

impl SyntaxDefinition for PythonSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Python
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["py", "pyw"]
    }

    fn example(&self) -> &'static str {
        "sentry_sdk.init(dsn=\"...\")"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("{}={},", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "lambda event, hint: event".to_string()
    }
}
