//! Ruby (`Sentry.init do |config| ... end`)

use super::{
    patterns, Anchor, AssignmentStyle, BlockKeywords, BodyEnd, Fallback, NamingConvention,
    QuoteStyle, SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        line_comments: &["#"],
        block_comments: &[("=begin", "=end")],
        quotes: vec![
            QuoteStyle::escaped("\"", "\"", true),
            QuoteStyle::escaped("'", "'", true),
        ],
        block_keywords: Some(BlockKeywords {
            openers: &["do", "begin", "def", "class", "module", "case"],
            line_openers: &["if", "unless", "while", "until"],
            closer: "end",
        }),
        separators: b"\n;",
        assignments: &[AssignmentStyle::Receiver],
        default_receiver: "config",
        anchor_keywords: &["Sentry.init"],
        anchors: vec![
            Anchor::new(
                r"\bSentry\.init\s+do\s*\|\s*(?P<recv>\w+)\s*\|",
                BodyEnd::Keyword("end"),
            ),
            Anchor::new(
                r"\bSentry\.init\s*\{\s*\|\s*(?P<recv>\w+)\s*\|",
                BodyEnd::Delimiter(b'}'),
            ),
            Anchor::new(
                r"\bRaven\.configure\s+do\s*\|\s*(?P<recv>\w+)\s*\|",
                BodyEnd::Keyword("end"),
            ),
        ],
        fallback: Some(Fallback::ReceiverStatements),
        null_keywords: &["nil"],
        symbol_prefix: Some(b':'),
        callables: patterns(&[r"^(?:lambda|proc)\b", r"^->", r"^Proc\.new\b"]),
        naming: NamingConvention::Snake,
        key_overrides: &[("ignoreErrors", "excluded_exceptions")],
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct RubySyntax;

impl SyntaxDefinition for RubySyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Ruby
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["rb", "rake"]
    }

    fn example(&self) -> &'static str {
        "Sentry.init do |config| config.dsn = '...' end"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("config.{} = {}", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "lambda { |event, hint| event }".to_string()
    }

    fn render_string(&self, value: &str) -> String {
        format!("'{}'", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ExampleValue;

    #[test]
    fn test_render_example() {
        let syntax = RubySyntax;
        assert_eq!(
            syntax.render_example("environment", &ExampleValue::Str("production")),
            "config.environment = 'production'"
        );
        assert_eq!(
            syntax.render_example("ignoreErrors", &ExampleValue::StrList(&["ActiveRecord::RecordNotFound"])),
            "config.excluded_exceptions = ['ActiveRecord::RecordNotFound']"
        );
    }

    #[test]
    fn test_do_block_anchor_captures_receiver() {
        let anchor = &RubySyntax.descriptor().anchors[0];
        let caps = anchor.pattern.captures("Sentry.init do |c|").unwrap();
        assert_eq!(&caps["recv"], "c");
        assert_eq!(anchor.end, BodyEnd::Keyword("end"));
    }
}
