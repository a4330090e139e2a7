//! Rust (`sentry::ClientOptions { ... }`)

use super::{
    number_pattern, patterns, Anchor, ArrayShape, BodyEnd, ExampleValue, NamingConvention,
    QuoteStyle, SyntaxDefinition, SyntaxDescriptor, SyntaxId,
};
use std::sync::LazyLock;

static DESCRIPTOR: LazyLock<SyntaxDescriptor> = LazyLock::new(|| {
    SyntaxDescriptor {
        nested_block_comments: true,
        quotes: vec![
            QuoteStyle::raw("r##\"", "\"##"),
            QuoteStyle::raw("r#\"", "\"#"),
            QuoteStyle::raw("r\"", "\""),
            QuoteStyle::escaped("b\"", "\"", true),
            QuoteStyle::escaped("\"", "\"", true),
        ],
        generics: true,
        anchor_keywords: &["sentry::init", "ClientOptions"],
        anchors: vec![Anchor::new(
            r"\b(?:sentry::)?ClientOptions\s*\{",
            BodyEnd::Delimiter(b'}'),
        )],
        spread_markers: &[".."],
        null_keywords: &["None"],
        optional_wrapper: Some("Some"),
        number: number_pattern("_?(?:f32|f64|u8|u16|u32|u64|usize|i32|i64)"),
        string_suffixes: &[".into()", ".to_string()", ".to_owned()"],
        callables: patterns(&[
            r"^(?:move\s+)?\|",
            r"^(?:std::sync::)?(?:Arc|Box)::new\s*\(\s*(?:move\s+)?\|",
        ]),
        arrays: vec![
            ArrayShape::new(r"^vec!\s*\[", b']'),
            ArrayShape::new(r"^&?\s*\[", b']'),
        ],
        naming: NamingConvention::Snake,
        ..SyntaxDescriptor::c_family()
    }
    .finish()
});

pub struct RustSyntax;

impl SyntaxDefinition for RustSyntax {
    fn id(&self) -> SyntaxId {
        SyntaxId::Rust
    }

    fn descriptor(&self) -> &'static SyntaxDescriptor {
        &DESCRIPTOR
    }

    fn extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn example(&self) -> &'static str {
        "sentry::ClientOptions { release: sentry::release_name!(), ..Default::default() }"
    }

    fn render_assignment(&self, native_key: &str, literal: &str) -> String {
        format!("{}: {},", native_key, literal)
    }

    fn render_callback(&self) -> String {
        "Some(std::sync::Arc::new(|event| Some(event)))".to_string()
    }

    fn render_string(&self, value: &str) -> String {
        format!("\"{}\".into()", value)
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("vec![{}]", items.join(", "))
    }

    fn render_literal(&self, value: &ExampleValue) -> String {
        match value {
            ExampleValue::Str(s) => format!("Some({})", self.render_string(s)),
            ExampleValue::Number(n) => self.render_number(*n),
            ExampleValue::Bool(b) => b.to_string(),
            ExampleValue::StrList(items) => {
                let rendered: Vec<String> = items.iter().map(|s| self.render_string(s)).collect();
                self.render_list(&rendered)
            }
            ExampleValue::Callback => self.render_callback(),
        }
    }
}
