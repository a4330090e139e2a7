//! C# (`SentrySdk.Init(o => { ... })`, `UseSentry(o => { ... })`, `new SentryOptions { ... }`)

use super::{
    number_pattern, patterns, Anchor, ArrayShape, AssignmentStyle, BodyEnd, Fallback,
    NamingConvention, QuoteStyle, SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        quotes: vec![
            QuoteStyle::raw("\"\"\"", "\"\"\""),
            QuoteStyle::verbatim("$@\"", "\""),
            QuoteStyle::verbatim("@$\"", "\""),
            QuoteStyle::verbatim("@\"", "\""),
            QuoteStyle::escaped("$\"", "\"", false),
            QuoteStyle::escaped("\"", "\"", false),
            QuoteStyle::escaped("'", "'", false),
        ],
        generics: true,
        separators: b";,",
        assignments: &[
            AssignmentStyle::Receiver,
            AssignmentStyle::Setter,
            AssignmentStyle::Token("="),
        ],
        anchor_keywords: &["SentrySdk.Init", "UseSentry"],
        anchors: vec![
            Anchor::new(
                r"\bSentrySdk\.Init\s*\(\s*\(?\s*(?P<recv>\w+)\s*\)?\s*=>\s*\{",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(
                r"\.UseSentry\s*\(\s*\(?\s*(?P<recv>\w+)\s*\)?\s*=>\s*\{",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(
                r"\bnew\s+SentryOptions\s*(?:\(\s*\))?\s*\{",
                BodyEnd::Delimiter(b'}'),
            ),
        ],
        fallback: Some(Fallback::ReceiverStatements),
        number: number_pattern("f|F|d|D|m|M"),
        callables: patterns(&[r"^\(?[\w\s,]*\)?\s*=>", r"^delegate\b"]),
        arrays: vec![
            ArrayShape::new(r"^new\s*(?:[\w.]+\s*)?\[\s*\]\s*\{", b'}'),
            ArrayShape::new(
                r"^new\s+(?:List|HashSet)<[^>]*>\s*(?:\(\s*\))?\s*\{",
                b'}',
            ),
        ],
        naming: NamingConvention::Pascal,
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct DotNetSyntax;

impl SyntaxDefinition for DotNetSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::DotNet
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["cs", "csx"]
    }

    fn example(&self) -> &'static str {
        "SentrySdk.Init(options => { options.Dsn = \"...\"; });"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("options.{} = {};", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "(sentryEvent, hint) => sentryEvent".to_string()
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("new[] {{ {} }}", items.join(", "))
    }
}
