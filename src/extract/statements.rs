//! Splitting a body into statements and reading `key = value` bindings

use super::lexer;
use crate::syntax::{AssignmentStyle, NamingConvention, SyntaxDescriptor};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").expect("valid key pattern")
});

static QUOTED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w$.\-]+$").expect("valid quoted key pattern"));

static METHOD_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*\(").expect("valid method pattern")
});

/// A newline directly after one of these does not end a statement
const CONTINUATION: &[u8] = b",=+.&|\\";

/// Trimmed statement span, in offsets of the scanned source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub start: usize,
    pub end: usize,
}

impl Item {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: Range<usize>,
    /// Method shorthand binds the whole statement as a callback
    pub shorthand: bool,
}

/// Splits `text` at depth-zero separators. `base` is the offset of `text`
/// within the source the returned items refer to.
pub fn split(text: &str, base: usize, syntax: &SyntaxDescriptor, separators: &[u8]) -> Vec<Item> {
    let mut items = Vec::new();
    let mut start = 0;
    lexer::walk_code(text, syntax, |cb| {
        if cb.depth == 0 && separators.contains(&cb.byte) {
            let continued = cb.byte == b'\n' && cb.prev.is_some_and(|p| CONTINUATION.contains(&p));
            if !continued {
                push_trimmed(&mut items, text, base, start, cb.pos);
                start = cb.pos + 1;
            }
        }
        std::ops::ControlFlow::Continue(())
    });
    push_trimmed(&mut items, text, base, start, text.len());
    items
}

fn push_trimmed(items: &mut Vec<Item>, text: &str, base: usize, start: usize, end: usize) {
    let range = trimmed(text, start, end);
    if !range.is_empty() {
        items.push(Item {
            start: base + range.start,
            end: base + range.end,
        });
    }
}

fn trimmed(text: &str, start: usize, end: usize) -> Range<usize> {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let inner = slice.trim();
    start + lead..start + lead + inner.len()
}

pub fn is_spread(text: &str, syntax: &SyntaxDescriptor) -> bool {
    syntax.spread_markers.iter().any(|marker| text.starts_with(marker))
}

/// Folds statements without a binding into the statement before them, which
/// reassembles lambda parameter lists split at their commas. A lambda whose
/// parameter list has not reached its `:` also absorbs the next statement, so
/// default parameters (`h=None`) stay inside it.
pub fn merge_continuations(source: &str, items: Vec<Item>, syntax: &SyntaxDescriptor) -> Vec<Item> {
    let mut merged: Vec<Item> = Vec::with_capacity(items.len());
    for item in items {
        let binds = bound_value(item.text(source), syntax).is_some();
        match merged.last_mut() {
            Some(last) if !binds || awaits_lambda_body(last.text(source), syntax) => last.end = item.end,
            _ => merged.push(item),
        }
    }
    merged
}

/// Text after the first depth-zero assignment token
fn bound_value<'a>(text: &'a str, syntax: &SyntaxDescriptor) -> Option<&'a str> {
    syntax.assignments.iter().find_map(|style| match style {
        AssignmentStyle::Token(token) => find_token(text, syntax, token).map(|pos| &text[pos + token.len()..]),
        _ => None,
    })
}

fn awaits_lambda_body(text: &str, syntax: &SyntaxDescriptor) -> bool {
    let value = bound_value(text, syntax).unwrap_or(text).trim_start();
    syntax.callables.iter().any(|re| re.is_match(value)) && find_token(value, syntax, ":").is_none()
}

/// First depth-zero occurrence of an assignment token, skipping lookalike
/// operators (`::`, `==`, `<=`, `=>`).
pub fn find_token(text: &str, syntax: &SyntaxDescriptor, token: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let token_bytes = token.as_bytes();
    lexer::find_at_depth_zero(text, syntax, |cb| {
        if !bytes[cb.pos..].starts_with(token_bytes) {
            return false;
        }
        let before = cb.pos.checked_sub(1).map(|p| bytes[p]);
        let after = bytes.get(cb.pos + token_bytes.len()).copied();
        match token {
            "=" => {
                !matches!(before, Some(b'=') | Some(b'!') | Some(b'<') | Some(b'>'))
                    && !matches!(after, Some(b'=') | Some(b'>') | Some(b'~'))
            }
            ":" => before != Some(b':') && after != Some(b':'),
            "=>" => before != Some(b'='),
            _ => true,
        }
    })
}

fn clean_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    let bytes = key.as_bytes();
    if bytes.len() >= 2 && matches!(bytes[0], b'"' | b'\'' | b'`') && bytes[bytes.len() - 1] == bytes[0] {
        let inner = &key[1..key.len() - 1];
        return QUOTED_KEY.is_match(inner).then(|| inner.to_string());
    }
    KEY.is_match(key).then(|| key.to_string())
}

/// Offset just past `receiver.` at the start of `text`
fn strip_receiver(text: &str, receiver: &str) -> Option<usize> {
    let rest = text.strip_prefix(receiver)?;
    rest.starts_with('.').then_some(receiver.len() + 1)
}

fn absolute(item: &Item, range: Range<usize>) -> Range<usize> {
    item.start + range.start..item.start + range.end
}

pub fn parse_assignment(
    source: &str,
    item: &Item,
    syntax: &SyntaxDescriptor,
    receiver: &str,
    style: AssignmentStyle,
) -> Option<Assignment> {
    let text = item.text(source);
    match style {
        AssignmentStyle::Token(token) => {
            let pos = find_token(text, syntax, token)?;
            let key = clean_key(&text[..pos])?;
            Some(Assignment {
                key,
                value: absolute(item, trimmed(text, pos + token.len(), text.len())),
                shorthand: false,
            })
        }
        AssignmentStyle::Receiver => {
            let offset = strip_receiver(text, receiver)?;
            let rest = &text[offset..];
            let pos = find_token(rest, syntax, "=")?;
            let key = rest[..pos]
                .trim_end()
                .trim_end_matches(['+', '-', '*', '|', '&', '?'])
                .trim_end();
            if !KEY.is_match(key) {
                return None;
            }
            Some(Assignment {
                key: key.to_string(),
                value: absolute(item, trimmed(text, offset + pos + 1, text.len())),
                shorthand: false,
            })
        }
        AssignmentStyle::Setter => parse_setter(text, item, syntax, receiver),
        AssignmentStyle::MethodShorthand => {
            let caps = METHOD_SHORTHAND.captures(text)?;
            let name = caps.name("name")?.as_str();
            if name == "function" || !text.ends_with('}') {
                return None;
            }
            Some(Assignment {
                key: name.to_string(),
                value: item.start..item.end,
                shorthand: true,
            })
        }
    }
}

fn parse_setter(text: &str, item: &Item, syntax: &SyntaxDescriptor, receiver: &str) -> Option<Assignment> {
    let offset = strip_receiver(text, receiver)?;
    let rest = &text[offset..];
    let name_len = rest.bytes().take_while(|b| lexer::is_ident_byte(*b)).count();
    let name = &rest[..name_len];
    let property = name.strip_prefix("set").or_else(|| name.strip_prefix("Set"))?;
    if !property.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }

    let after = &rest[name_len..];
    let open = offset + name_len + (after.len() - after.trim_start().len());
    let (close_byte, include_delimiters) = match text.as_bytes().get(open) {
        Some(b'(') => (b')', false),
        Some(b'{') => (b'}', true),
        _ => return None,
    };
    let close = open + 1 + lexer::matching_close(&text[open + 1..], syntax, close_byte)?;
    if !text[close + 1..].trim().is_empty() {
        return None;
    }
    let value = if include_delimiters {
        open..close + 1
    } else {
        trimmed(text, open + 1, close)
    };

    let key = match syntax.naming {
        NamingConvention::Pascal => property.to_string(),
        _ => {
            let mut chars = property.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => return None,
            }
        }
    };
    Some(Assignment {
        key,
        value: absolute(item, value),
        shorthand: false,
    })
}

/// Tries each of the syntax's assignment idioms in order
pub fn parse_any(source: &str, item: &Item, syntax: &SyntaxDescriptor, receiver: &str) -> Option<Assignment> {
    syntax
        .assignments
        .iter()
        .find_map(|style| parse_assignment(source, item, syntax, receiver, *style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxId, SyntaxRegistry};

    fn descriptor(id: SyntaxId) -> &'static SyntaxDescriptor {
        SyntaxRegistry::with_defaults().get(id).unwrap().descriptor()
    }

    fn texts(source: &str, items: &[Item]) -> Vec<String> {
        items.iter().map(|i| i.text(source).to_string()).collect()
    }

    fn first_assignment(id: SyntaxId, text: &str, receiver: &str) -> Option<(String, String)> {
        let syntax = descriptor(id);
        let item = split(text, 0, syntax, syntax.separators).into_iter().next()?;
        parse_any(text, &item, syntax, receiver).map(|a| (a.key, text[a.value].to_string()))
    }

    #[test]
    fn test_split_skips_nested_separators_and_empty_items() {
        let text = " a: 1, b: { c: 2, d: [3, 4] }, e: f(5, 6),, ";
        let syntax = descriptor(SyntaxId::JavaScript);
        let items = split(text, 0, syntax, b",");
        assert_eq!(texts(text, &items), vec!["a: 1", "b: { c: 2, d: [3, 4] }", "e: f(5, 6)"]);
    }

    #[test]
    fn test_split_respects_base_offset() {
        let source = "XXa: 1, b: 2";
        let syntax = descriptor(SyntaxId::JavaScript);
        let items = split(&source[2..], 2, syntax, b",");
        assert_eq!(texts(source, &items), vec!["a: 1", "b: 2"]);
    }

    #[test]
    fn test_newline_split_honors_continuations() {
        let text = "config.a = [1,\n  2]\nconfig.b = 'x' +\n  'y'\nconfig.c = 3";
        let syntax = descriptor(SyntaxId::Ruby);
        let items = split(text, 0, syntax, syntax.separators);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].text(text), "config.b = 'x' +\n  'y'");
    }

    #[test]
    fn test_merge_continuations_rebuilds_lambdas() {
        let text = "\"https://k@o.ingest.sentry.io/1\", before_send=lambda event, hint: event, debug=True";
        let syntax = descriptor(SyntaxId::Python);
        let items = merge_continuations(text, split(text, 0, syntax, b","), syntax);
        assert_eq!(
            texts(text, &items),
            vec!["\"https://k@o.ingest.sentry.io/1\"", "before_send=lambda event, hint: event", "debug=True"]
        );
    }

    #[test]
    fn test_merge_continuations_keeps_lambda_defaults() {
        let text = "dsn='x', before_send=lambda e, h=None: e, debug=True";
        let syntax = descriptor(SyntaxId::Python);
        let items = merge_continuations(text, split(text, 0, syntax, b","), syntax);
        assert_eq!(texts(text, &items), vec!["dsn='x'", "before_send=lambda e, h=None: e", "debug=True"]);

        let text = "before_send=lambda: None, traces_sampler=lambda ctx, rate=0.5, floor=0: rate, debug=True";
        let items = merge_continuations(text, split(text, 0, syntax, b","), syntax);
        assert_eq!(
            texts(text, &items),
            vec!["before_send=lambda: None", "traces_sampler=lambda ctx, rate=0.5, floor=0: rate", "debug=True"]
        );
    }

    #[test]
    fn test_find_token_skips_lookalikes() {
        let python = descriptor(SyntaxId::Python);
        assert_eq!(find_token("a == b", python, "="), None);
        assert_eq!(find_token("a <= b", python, "="), None);
        assert_eq!(find_token("key=a == b", python, "="), Some(3));

        let rust = descriptor(SyntaxId::Rust);
        assert_eq!(find_token("sentry::release_name!()", rust, ":"), None);
        assert_eq!(find_token("release: sentry::release_name!()", rust, ":"), Some(7));

        let php = descriptor(SyntaxId::Php);
        assert_eq!(find_token("'dsn' => 'x'", php, "=>"), Some(6));
    }

    #[test]
    fn test_token_keys_are_unquoted() {
        assert_eq!(
            first_assignment(SyntaxId::Php, "'traces_sample_rate' => 0.5", ""),
            Some(("traces_sample_rate".to_string(), "0.5".to_string()))
        );
        assert_eq!(
            first_assignment(SyntaxId::JavaScript, "\"dsn\": \"x\"", ""),
            Some(("dsn".to_string(), "\"x\"".to_string()))
        );
        assert_eq!(first_assignment(SyntaxId::JavaScript, "a b: 1", ""), None);
    }

    #[test]
    fn test_receiver_assignment() {
        assert_eq!(
            first_assignment(SyntaxId::Ruby, "config.traces_sample_rate = 0.5", "config"),
            Some(("traces_sample_rate".to_string(), "0.5".to_string()))
        );
        assert_eq!(
            first_assignment(SyntaxId::Ruby, "config.enabled_environments ||= %w[prod]", "config"),
            Some(("enabled_environments".to_string(), "%w[prod]".to_string()))
        );
        assert_eq!(first_assignment(SyntaxId::Ruby, "other.dsn = 'x'", "config"), None);
        assert_eq!(first_assignment(SyntaxId::Ruby, "config.debug == true", "config"), None);
    }

    #[test]
    fn test_setter_assignment() {
        assert_eq!(
            first_assignment(SyntaxId::Java, "options.setTracesSampleRate(1.0)", "options"),
            Some(("tracesSampleRate".to_string(), "1.0".to_string()))
        );
        assert_eq!(
            first_assignment(SyntaxId::DotNet, "o.SetBeforeSend((e, h) => e)", "o"),
            Some(("BeforeSend".to_string(), "(e, h) => e".to_string()))
        );
        assert_eq!(
            first_assignment(SyntaxId::Kotlin, "options.setBeforeSend { event, _ -> event }", "options"),
            Some(("beforeSend".to_string(), "{ event, _ -> event }".to_string()))
        );
        assert_eq!(first_assignment(SyntaxId::Java, "options.settle(1)", "options"), None);
        assert_eq!(first_assignment(SyntaxId::Java, "options.setDsn(a).foo()", "options"), None);
    }

    #[test]
    fn test_method_shorthand() {
        let syntax = descriptor(SyntaxId::JavaScript);
        let text = "beforeSend(event, hint) { return event; }";
        let item = Item { start: 0, end: text.len() };
        let assignment = parse_any(text, &item, syntax, "").unwrap();
        assert_eq!(assignment.key, "beforeSend");
        assert!(assignment.shorthand);
        assert_eq!(assignment.value, 0..text.len());
    }

    #[test]
    fn test_spread_detection() {
        assert!(is_spread("..Default::default()", descriptor(SyntaxId::Rust)));
        assert!(is_spread("...shared", descriptor(SyntaxId::JavaScript)));
        assert!(is_spread("**kwargs", descriptor(SyntaxId::Python)));
        assert!(!is_spread("dsn: x", descriptor(SyntaxId::JavaScript)));
    }
}
