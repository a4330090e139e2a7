//! Swift and Objective-C (`SentrySDK.start { options in ... }`)

use super::{
    patterns, Anchor, AssignmentStyle, BodyEnd, Fallback, QuoteStyle, SyntaxDefinition,
    SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        nested_block_comments: true,
        quotes: vec![
            QuoteStyle::escaped("\"\"\"", "\"\"\"", true),
            QuoteStyle::raw("#\"", "\"#"),
            QuoteStyle::escaped("@\"", "\"", false),
            QuoteStyle::escaped("\"", "\"", false),
        ],
        generics: true,
        separators: b"\n;",
        assignments: &[AssignmentStyle::Receiver],
        default_receiver: "$0",
        anchor_keywords: &["SentrySDK.start", "SentrySDK startWithConfigureOptions"],
        anchors: vec![
            Anchor::new(
                r"\bSentrySDK\.start\s*(?:\(\s*configureOptions\s*:\s*)?\{\s*(?P<recv>\w+)\s+in\b",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(
                r"startWithConfigureOptions\s*:\s*\^\s*\(\s*SentryOptions\s*\*\s*(?P<recv>\w+)\s*\)\s*\{",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(
                r"\bSentrySDK\.start\s*(?:\(\s*configureOptions\s*:\s*)?\{",
                BodyEnd::Delimiter(b'}'),
            ),
        ],
        fallback: Some(Fallback::ReceiverStatements),
        true_keywords: &["true", "YES"],
        false_keywords: &["false", "NO"],
        null_keywords: &["nil"],
        callables: patterns(&[r"^\{", r"^\^"]),
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct CocoaSyntax;

impl SyntaxDefinition for CocoaSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Cocoa
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["swift", "m", "mm"]
    }

    fn example(&self) -> &'static str {
        "SentrySDK.start { options in options.dsn = \"...\" }"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("options.{} = {}", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "{ event in event }".to_string()
    }
}
