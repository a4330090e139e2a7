//! Literal-shape type inference
//!
//! Snippets are never evaluated. A value is classified by what its source
//! text looks like, and only plain literals are materialized: strings,
//! numbers, booleans, null and arrays of those. Anything computed stays raw.

use super::lexer::{self, SegmentKind};
use super::statements;
use super::types::{ExtractedValue, ValueType};
use crate::syntax::SyntaxDescriptor;
use regex::Regex;
use std::sync::LazyLock;

static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[A-Za-z_][\w]*[?!]?$").expect("valid symbol pattern"));

/// Inference state for one option value
pub struct Inference<'a> {
    pub syntax: &'a SyntaxDescriptor,
    pub max_depth: usize,
    /// Set when an array deeper than `max_depth` was left unexpanded
    pub depth_exceeded: bool,
}

impl<'a> Inference<'a> {
    pub fn new(syntax: &'a SyntaxDescriptor, max_depth: usize) -> Self {
        Self {
            syntax,
            max_depth,
            depth_exceeded: false,
        }
    }

    pub fn infer(&mut self, raw: &str) -> (ExtractedValue, ValueType) {
        self.infer_at(raw.trim(), 0)
    }

    fn infer_at(&mut self, text: &str, depth: usize) -> (ExtractedValue, ValueType) {
        let syntax = self.syntax;
        let text = unwrap_optional(text, syntax);

        if syntax.null_keywords.contains(&text) {
            return (ExtractedValue::Null, ValueType::Null);
        }
        if syntax.true_keywords.contains(&text) {
            return (ExtractedValue::Boolean(true), ValueType::Boolean);
        }
        if syntax.false_keywords.contains(&text) {
            return (ExtractedValue::Boolean(false), ValueType::Boolean);
        }
        if syntax.callables.iter().any(|re| re.is_match(text)) {
            return raw(text, ValueType::Callback);
        }
        if let Some(number) = parse_number(text, syntax) {
            return (ExtractedValue::Number(number), ValueType::Number);
        }
        if let Some(content) = string_literal(text, syntax) {
            return (ExtractedValue::String(content.to_string()), ValueType::String);
        }
        if syntax.symbol_prefix == Some(b':') && SYMBOL.is_match(text) {
            return (ExtractedValue::String(text[1..].to_string()), ValueType::String);
        }
        if let Some(interior) = array_interior(text, syntax) {
            if depth >= self.max_depth {
                self.depth_exceeded = true;
                return raw(text, ValueType::Array);
            }
            let items = statements::split(interior, 0, syntax, b",")
                .into_iter()
                .filter(|item| !statements::is_spread(item.text(interior), syntax))
                .map(|item| self.infer_at(item.text(interior), depth + 1).0)
                .collect();
            return (ExtractedValue::Array(items), ValueType::Array);
        }
        if is_regex_literal(text, syntax) {
            return raw(text, ValueType::Regex);
        }
        if text.starts_with('{') {
            return raw(text, ValueType::Object);
        }
        raw(text, ValueType::Expression)
    }
}

fn raw(text: &str, value_type: ValueType) -> (ExtractedValue, ValueType) {
    (ExtractedValue::Raw(text.to_string()), value_type)
}

/// `Some(x)` -> `x`
fn unwrap_optional<'t>(text: &'t str, syntax: &SyntaxDescriptor) -> &'t str {
    let Some(wrapper) = syntax.optional_wrapper else {
        return text;
    };
    let Some(rest) = text.strip_prefix(wrapper) else {
        return text;
    };
    let rest_trimmed = rest.trim_start();
    if !rest_trimmed.starts_with('(') {
        return text;
    }
    let open = text.len() - rest_trimmed.len();
    match lexer::matching_close(&text[open + 1..], syntax, b')') {
        Some(close) if open + 1 + close == text.len() - 1 => text[open + 1..text.len() - 1].trim(),
        _ => text,
    }
}

fn parse_number(text: &str, syntax: &SyntaxDescriptor) -> Option<f64> {
    let caps = syntax.number.captures(text)?;
    let digits: String = caps.name("num")?.as_str().chars().filter(|c| *c != '_').collect();
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Content of a single, closed string literal spanning the whole value
fn string_literal<'t>(text: &'t str, syntax: &SyntaxDescriptor) -> Option<&'t str> {
    let unprefixed = strip_string_prefix(text, syntax);
    let segments = lexer::segment(unprefixed, syntax);
    let first = segments.first()?;
    if first.kind != SegmentKind::Str || first.start != 0 || !first.is_closed() {
        return None;
    }
    let rest = unprefixed[first.end..].trim();
    (rest.is_empty() || syntax.string_suffixes.contains(&rest)).then(|| first.content(unprefixed))
}

fn strip_string_prefix<'t>(text: &'t str, syntax: &SyntaxDescriptor) -> &'t str {
    for prefix in syntax.string_prefixes {
        if text.len() > prefix.len()
            && text.is_char_boundary(prefix.len())
            && text[..prefix.len()].eq_ignore_ascii_case(prefix)
            && matches!(text.as_bytes()[prefix.len()], b'"' | b'\'')
        {
            return &text[prefix.len()..];
        }
    }
    text
}

fn array_interior<'t>(text: &'t str, syntax: &SyntaxDescriptor) -> Option<&'t str> {
    syntax.arrays.iter().find_map(|shape| {
        let open = shape.prefix.find(text)?;
        let interior = &text[open.end()..];
        let close = lexer::matching_close(interior, syntax, shape.close)?;
        (open.end() + close == text.len() - 1).then(|| &interior[..close])
    })
}

fn is_regex_literal(text: &str, syntax: &SyntaxDescriptor) -> bool {
    if !syntax.regex_literals {
        return false;
    }
    let segments = lexer::segment(text, syntax);
    segments.len() == 1 && segments[0].kind == SegmentKind::Regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxDefinition, SyntaxId, SyntaxRegistry};

    fn infer(id: SyntaxId, text: &str) -> (ExtractedValue, ValueType) {
        let registry = SyntaxRegistry::with_defaults();
        let syntax = registry.get(id).unwrap().descriptor();
        Inference::new(syntax, 32).infer(text)
    }

    fn string(s: &str) -> ExtractedValue {
        ExtractedValue::String(s.to_string())
    }

    #[test]
    fn test_keywords_per_syntax() {
        assert_eq!(infer(SyntaxId::Python, "True"), (ExtractedValue::Boolean(true), ValueType::Boolean));
        assert_eq!(infer(SyntaxId::Python, "None"), (ExtractedValue::Null, ValueType::Null));
        assert_eq!(infer(SyntaxId::Ruby, "nil"), (ExtractedValue::Null, ValueType::Null));
        assert_eq!(infer(SyntaxId::Cocoa, "YES"), (ExtractedValue::Boolean(true), ValueType::Boolean));
        assert_eq!(infer(SyntaxId::JavaScript, "undefined").1, ValueType::Null);
        // `True` is just an identifier outside Python
        assert_eq!(infer(SyntaxId::JavaScript, "True").1, ValueType::Expression);
    }

    #[test]
    fn test_numbers_with_suffixes_and_separators() {
        assert_eq!(infer(SyntaxId::JavaScript, "0.25").0, ExtractedValue::Number(0.25));
        assert_eq!(infer(SyntaxId::Java, "1.0f").0, ExtractedValue::Number(1.0));
        assert_eq!(infer(SyntaxId::Kotlin, "30_000L").0, ExtractedValue::Number(30000.0));
        assert_eq!(infer(SyntaxId::DotNet, "0.5m").0, ExtractedValue::Number(0.5));
        assert_eq!(infer(SyntaxId::Rust, "Some(0.2)").0, ExtractedValue::Number(0.2));
        assert_eq!(infer(SyntaxId::Rust, "1.0_f32").0, ExtractedValue::Number(1.0));
        assert_eq!(infer(SyntaxId::JavaScript, "1.0f").1, ValueType::Expression);
    }

    #[test]
    fn test_strings_are_kept_verbatim() {
        assert_eq!(infer(SyntaxId::JavaScript, r#""a\"b""#).0, string(r#"a\"b"#));
        assert_eq!(infer(SyntaxId::Python, "f'{env}-x'").0, string("{env}-x"));
        assert_eq!(infer(SyntaxId::Python, "R\"raw\"").0, string("raw"));
        assert_eq!(infer(SyntaxId::Rust, "Some(\"production\".into())").0, string("production"));
        assert_eq!(infer(SyntaxId::Rust, "r#\"a \"quoted\" b\"#").0, string("a \"quoted\" b"));
        assert_eq!(infer(SyntaxId::Go, "`raw\\n`").0, string("raw\\n"));
        assert_eq!(infer(SyntaxId::DotNet, "@\"C:\\logs\"").0, string("C:\\logs"));
    }

    #[test]
    fn test_concatenation_is_expression() {
        assert_eq!(infer(SyntaxId::JavaScript, "\"a\" + b").1, ValueType::Expression);
        assert_eq!(infer(SyntaxId::Python, "'a' 'b'").1, ValueType::Expression);
        assert_eq!(infer(SyntaxId::JavaScript, "process.env.SENTRY_DSN").1, ValueType::Expression);
    }

    #[test]
    fn test_symbols_become_strings() {
        assert_eq!(infer(SyntaxId::Elixir, ":prod").0, string("prod"));
        assert_eq!(infer(SyntaxId::Ruby, ":http_logger").0, string("http_logger"));
        assert_eq!(infer(SyntaxId::JavaScript, ":prod").1, ValueType::Expression);
    }

    #[test]
    fn test_arrays_are_materialized() {
        let expected = ExtractedValue::Array(vec![string("a"), ExtractedValue::Number(1.0)]);
        assert_eq!(infer(SyntaxId::JavaScript, "['a', 1]").0, expected);
        assert_eq!(infer(SyntaxId::Php, "array('a', 1)").0, expected);
        assert_eq!(infer(SyntaxId::Go, "[]string{\"a\", 1}").0, expected);
        assert_eq!(infer(SyntaxId::Java, "List.of(\"a\", 1)").0, expected);
        assert_eq!(infer(SyntaxId::Kotlin, "listOf<Any>(\"a\", 1)").0, expected);
        assert_eq!(infer(SyntaxId::DotNet, "new[] { \"a\", 1 }").0, expected);
        assert_eq!(infer(SyntaxId::Rust, "vec![\"a\".into(), 1]").0, expected);
        assert_eq!(infer(SyntaxId::Dart, "const <String>['a', 1]").0, expected);
        assert_eq!(infer(SyntaxId::JavaScript, "[]").0, ExtractedValue::Array(vec![]));
    }

    #[test]
    fn test_nested_arrays_stop_at_depth_cap() {
        let registry = SyntaxRegistry::with_defaults();
        let syntax = registry.get(SyntaxId::JavaScript).unwrap().descriptor();

        let mut inference = Inference::new(syntax, 2);
        let (value, value_type) = inference.infer("[[['deep']]]");
        assert_eq!(value_type, ValueType::Array);
        assert_eq!(
            value,
            ExtractedValue::Array(vec![ExtractedValue::Array(vec![ExtractedValue::Raw("['deep']".into())])])
        );
        assert!(inference.depth_exceeded);

        let mut inference = Inference::new(syntax, 32);
        inference.infer("[[['deep']]]");
        assert!(!inference.depth_exceeded);
    }

    #[test]
    fn test_callbacks_regexes_and_objects() {
        assert_eq!(infer(SyntaxId::JavaScript, "(event) => event").1, ValueType::Callback);
        assert_eq!(infer(SyntaxId::JavaScript, "/^Timeout/i").1, ValueType::Regex);
        assert_eq!(infer(SyntaxId::JavaScript, "{ a: 1 }").1, ValueType::Object);
        assert_eq!(infer(SyntaxId::Python, "lambda e, h: e").1, ValueType::Callback);
        assert_eq!(infer(SyntaxId::Kotlin, "{ event, _ -> event }").1, ValueType::Callback);
        assert_eq!(infer(SyntaxId::Rust, "Some(Arc::new(|event| Some(event)))").1, ValueType::Callback);
        assert_eq!(infer(SyntaxId::Elixir, "{MyApp.Sentry, :before_send}").1, ValueType::Callback);
        assert_eq!(infer(SyntaxId::Go, "func(e *sentry.Event) *sentry.Event { return e }").1, ValueType::Callback);
    }
}
