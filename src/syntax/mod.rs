//! Host syntax definitions for initialization snippet extraction
//!
//! Every supported host language is described by a static [`SyntaxDescriptor`]
//! table: comment markers, quoting rules, separators, assignment idioms, the
//! anchor patterns that introduce the configuration block, and the literal
//! shapes used for type inference. The extraction engine is a single generic
//! scanner driven by these tables.

mod cocoa;
mod dart;
mod dotnet;
mod elixir;
mod go;
mod java;
mod javascript;
mod kotlin;
mod php;
mod python;
mod registry;
mod ruby;
mod rust;
mod syntax_id;

pub use cocoa::CocoaSyntax;
pub use dart::DartSyntax;
pub use dotnet::DotNetSyntax;
pub use elixir::ElixirSyntax;
pub use go::GoSyntax;
pub use java::JavaSyntax;
pub use javascript::JavaScriptSyntax;
pub use kotlin::KotlinSyntax;
pub use php::PhpSyntax;
pub use python::PythonSyntax;
pub use registry::SyntaxRegistry;
pub use ruby::RubySyntax;
pub use rust::RustSyntax;
pub use syntax_id::SyntaxId;

use crate::normalize;
use regex::Regex;

/// How a quote style treats backslashes and repeated delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// An odd run of backslashes before the delimiter escapes it
    Backslash,
    /// The close delimiter written twice stands for itself (`@"a""b"`)
    Doubled,
    /// Raw string, nothing is escaped
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteStyle {
    pub open: &'static str,
    pub close: &'static str,
    pub escape: Escape,
    pub multiline: bool,
}

impl QuoteStyle {
    pub const fn escaped(open: &'static str, close: &'static str, multiline: bool) -> Self {
        Self {
            open,
            close,
            escape: Escape::Backslash,
            multiline,
        }
    }

    pub const fn raw(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            escape: Escape::None,
            multiline: true,
        }
    }

    pub const fn verbatim(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            escape: Escape::Doubled,
            multiline: true,
        }
    }
}

/// Where the configuration body introduced by an anchor ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEnd {
    /// Matching close delimiter at depth zero
    Delimiter(u8),
    /// Matching block keyword at depth zero (`end`)
    Keyword(&'static str),
    /// First depth-zero line break not preceded by a comma
    Statement,
}

/// A regex that matches an initialization idiom up to the start of its body.
/// An optional `recv` capture names the configured receiver (`|config|`).
#[derive(Debug, Clone)]
pub struct Anchor {
    pub pattern: Regex,
    pub end: BodyEnd,
}

impl Anchor {
    pub fn new(pattern: &str, end: BodyEnd) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid anchor pattern"),
            end,
        }
    }
}

/// Accepted shape when the snippet has no recognizable anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The whole input is one delimited literal
    Delimited(u8, u8),
    /// The whole input is a list of `receiver.` statements
    ReceiverStatements,
}

/// How a statement binds a key to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStyle {
    /// `key <token> value`
    Token(&'static str),
    /// `receiver.key = value`
    Receiver,
    /// `receiver.setKey(value)`
    Setter,
    /// `key(args) { body }`
    MethodShorthand,
}

/// Keywords that open and close nested blocks in keyword-delimited syntaxes
#[derive(Debug, Clone, Copy)]
pub struct BlockKeywords {
    pub openers: &'static [&'static str],
    /// Openers that only count when they start a line (`if` vs. modifier `if`)
    pub line_openers: &'static [&'static str],
    pub closer: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    Camel,
    Snake,
    Pascal,
}

impl NamingConvention {
    pub fn apply(&self, canonical: &str) -> String {
        match self {
            NamingConvention::Camel => canonical.to_string(),
            NamingConvention::Snake => normalize::to_snake_case(canonical),
            NamingConvention::Pascal => normalize::to_pascal_case(canonical),
        }
    }
}

/// A literal collection shape: `prefix` must match at the start of the value and
/// end right after the opening delimiter.
#[derive(Debug, Clone)]
pub struct ArrayShape {
    pub prefix: Regex,
    pub close: u8,
}

impl ArrayShape {
    pub fn new(prefix: &str, close: u8) -> Self {
        Self {
            prefix: Regex::new(prefix).expect("valid array pattern"),
            close,
        }
    }
}

/// Table that drives the generic scanner for one host syntax
#[derive(Debug, Clone)]
pub struct SyntaxDescriptor {
    pub line_comments: &'static [&'static str],
    pub block_comments: &'static [(&'static str, &'static str)],
    pub nested_block_comments: bool,
    /// Quote styles, longest opening delimiter first
    pub quotes: Vec<QuoteStyle>,
    pub regex_literals: bool,
    pub generics: bool,
    pub block_keywords: Option<BlockKeywords>,
    pub separators: &'static [u8],
    pub assignments: &'static [AssignmentStyle],
    pub default_receiver: &'static str,
    pub anchor_keywords: &'static [&'static str],
    pub anchors: Vec<Anchor>,
    pub fallback: Option<Fallback>,
    pub spread_markers: &'static [&'static str],
    pub merge_continuations: bool,
    pub positional_key: Option<&'static str>,
    pub true_keywords: &'static [&'static str],
    pub false_keywords: &'static [&'static str],
    pub null_keywords: &'static [&'static str],
    pub optional_wrapper: Option<&'static str>,
    pub number: Regex,
    pub string_prefixes: &'static [&'static str],
    pub string_suffixes: &'static [&'static str],
    pub symbol_prefix: Option<u8>,
    pub callables: Vec<Regex>,
    pub arrays: Vec<ArrayShape>,
    pub naming: NamingConvention,
    /// Canonical key -> native key where the SDK deviates from its naming convention
    pub key_overrides: &'static [(&'static str, &'static str)],
}

impl SyntaxDescriptor {
    /// Defaults shared by the brace-and-semicolon family; each syntax overrides
    /// what differs.
    pub fn c_family() -> Self {
        Self {
            line_comments: &["//"],
            block_comments: &[("/*", "*/")],
            nested_block_comments: false,
            quotes: vec![
                QuoteStyle::escaped("\"", "\"", false),
                QuoteStyle::escaped("'", "'", false),
            ],
            regex_literals: false,
            generics: false,
            block_keywords: None,
            separators: b",",
            assignments: &[AssignmentStyle::Token(":")],
            default_receiver: "options",
            anchor_keywords: &[],
            anchors: Vec::new(),
            fallback: Some(Fallback::Delimited(b'{', b'}')),
            spread_markers: &[],
            merge_continuations: false,
            positional_key: None,
            true_keywords: &["true"],
            false_keywords: &["false"],
            null_keywords: &["null"],
            optional_wrapper: None,
            number: number_pattern(""),
            string_prefixes: &[],
            string_suffixes: &[],
            symbol_prefix: None,
            callables: Vec::new(),
            arrays: vec![ArrayShape::new(r"^\[", b']')],
            naming: NamingConvention::Camel,
            key_overrides: &[],
        }
    }

    /// Sort quote styles so longer opening delimiters win (`"""` before `"`).
    pub fn finish(mut self) -> Self {
        self.quotes.sort_by(|a, b| b.open.len().cmp(&a.open.len()));
        self
    }

    pub fn native_key(&self, canonical: &str) -> String {
        self.key_overrides
            .iter()
            .find(|(key, _)| *key == canonical)
            .map(|(_, native)| native.to_string())
            .unwrap_or_else(|| self.naming.apply(canonical))
    }
}

/// Numeric literal pattern with an optional syntax-specific suffix group
pub fn number_pattern(suffixes: &str) -> Regex {
    let suffix = if suffixes.is_empty() {
        String::new()
    } else {
        format!("(?:{})?", suffixes)
    };
    Regex::new(&format!(
        r"^(?P<num>[+-]?(?:\d[\d_]*(?:\.[\d_]*)?|\.\d[\d_]*)(?:[eE][+-]?\d+)?){}$",
        suffix
    ))
    .expect("valid number pattern")
}

pub fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(source).expect("valid literal pattern"))
        .collect()
}

/// Literal used when rendering a recommendation example
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExampleValue {
    Str(&'static str),
    Number(f64),
    Bool(bool),
    StrList(&'static [&'static str]),
    /// A pass-through event hook written in the host syntax
    Callback,
}

/// Trait implemented by every supported host syntax
pub trait SyntaxDefinition: Send + Sync {
    fn id(&self) -> SyntaxId;

    fn descriptor(&self) -> &'static SyntaxDescriptor;

    /// File extensions used to guess the syntax of a snippet file
    fn extensions(&self) -> &[&str];

    /// Minimal initialization idiom, shown in errors and listings
    fn example(&self) -> &'static str;

    /// Renders `native_key` bound to an already-rendered literal
    fn render_assignment(&self, native_key: &str, literal: &str) -> String;

    /// Pass-through event hook in this syntax
    fn render_callback(&self) -> String;

    fn render_string(&self, value: &str) -> String {
        format!("\"{}\"", value)
    }

    fn render_list(&self, items: &[String]) -> String {
        format!("[{}]", items.join(", "))
    }

    fn render_number(&self, value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{:.1}", value)
        } else {
            value.to_string()
        }
    }

    fn render_literal(&self, value: &ExampleValue) -> String {
        let descriptor = self.descriptor();
        match value {
            ExampleValue::Str(s) => self.render_string(s),
            ExampleValue::Number(n) => self.render_number(*n),
            ExampleValue::Bool(true) => descriptor.true_keywords[0].to_string(),
            ExampleValue::Bool(false) => descriptor.false_keywords[0].to_string(),
            ExampleValue::StrList(items) => {
                let rendered: Vec<String> = items.iter().map(|s| self.render_string(s)).collect();
                self.render_list(&rendered)
            }
            ExampleValue::Callback => self.render_callback(),
        }
    }

    /// Example line setting `canonical` in this syntax's own spelling and style
    fn render_example(&self, canonical: &str, value: &ExampleValue) -> String {
        let key = self.descriptor().native_key(canonical);
        self.render_assignment(&key, &self.render_literal(value))
    }
}
