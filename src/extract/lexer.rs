//! Segmenting lexer shared by every syntax
//!
//! The lexer only knows about comments, quoted literals and (for JavaScript)
//! regex literals. Everything else is code. Offsets are byte offsets into the
//! scanned text and segments always start and end on ASCII delimiters, so the
//! caller can slice the text at any segment boundary.

use crate::syntax::{Escape, QuoteStyle, SyntaxDescriptor};
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    Str,
    Regex,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
    pub open_len: usize,
    /// Zero when the literal runs off the end of its line or the input
    pub close_len: usize,
}

impl Segment {
    fn code(start: usize, end: usize) -> Self {
        Self {
            kind: SegmentKind::Code,
            start,
            end,
            open_len: 0,
            close_len: 0,
        }
    }

    /// Literal content between the delimiters
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + self.open_len..self.end - self.close_len]
    }

    pub fn is_closed(&self) -> bool {
        self.close_len > 0
    }
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

pub fn segment(text: &str, syntax: &SyntaxDescriptor) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < len {
        let rest = &bytes[i..];

        if syntax
            .line_comments
            .iter()
            .any(|marker| rest.starts_with(marker.as_bytes()))
        {
            flush(&mut segments, code_start, i);
            let end = memchr_newline(bytes, i).unwrap_or(len);
            segments.push(Segment {
                kind: SegmentKind::Comment,
                start: i,
                end,
                open_len: 0,
                close_len: 0,
            });
            i = end;
            code_start = i;
            continue;
        }

        if let Some((open, close)) = syntax
            .block_comments
            .iter()
            .find(|(open, _)| rest.starts_with(open.as_bytes()))
        {
            flush(&mut segments, code_start, i);
            let end = block_comment_end(bytes, i + open.len(), open, close, syntax.nested_block_comments);
            segments.push(Segment {
                kind: SegmentKind::Comment,
                start: i,
                end,
                open_len: open.len(),
                close_len: 0,
            });
            i = end;
            code_start = i;
            continue;
        }

        if let Some(style) = quote_at(bytes, i, syntax) {
            flush(&mut segments, code_start, i);
            let content_start = i + style.open.len();
            let (end, closed) = string_end(bytes, content_start, style);
            segments.push(Segment {
                kind: SegmentKind::Str,
                start: i,
                end,
                open_len: style.open.len(),
                close_len: if closed { style.close.len() } else { 0 },
            });
            i = end;
            code_start = i;
            continue;
        }

        if syntax.regex_literals && bytes[i] == b'/' && regex_allowed(bytes, code_start, i, &segments) {
            if let Some(end) = regex_end(bytes, i) {
                flush(&mut segments, code_start, i);
                segments.push(Segment {
                    kind: SegmentKind::Regex,
                    start: i,
                    end,
                    open_len: 1,
                    close_len: 0,
                });
                i = end;
                code_start = i;
                continue;
            }
        }

        i += 1;
    }

    flush(&mut segments, code_start, len);
    segments
}

fn flush(segments: &mut Vec<Segment>, from: usize, to: usize) {
    if to > from {
        segments.push(Segment::code(from, to));
    }
}

fn memchr_newline(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..].iter().position(|b| *b == b'\n').map(|p| from + p)
}

fn block_comment_end(bytes: &[u8], from: usize, open: &str, close: &str, nested: bool) -> usize {
    let (open, close) = (open.as_bytes(), close.as_bytes());
    let mut depth = 1;
    let mut j = from;
    while j < bytes.len() {
        if bytes[j..].starts_with(close) {
            depth -= 1;
            j += close.len();
            if depth == 0 {
                return j;
            }
            continue;
        }
        if nested && bytes[j..].starts_with(open) {
            depth += 1;
            j += open.len();
            continue;
        }
        j += 1;
    }
    bytes.len()
}

fn quote_at<'a>(bytes: &[u8], i: usize, syntax: &'a SyntaxDescriptor) -> Option<&'a QuoteStyle> {
    syntax.quotes.iter().find(|style| {
        let open = style.open.as_bytes();
        if !bytes[i..].starts_with(open) {
            return false;
        }
        // Prefixed openers (`r"`, `b"`, `@"`) must not continue an identifier.
        if !matches!(open[0], b'"' | b'\'' | b'`') && i > 0 && is_ident_byte(bytes[i - 1]) {
            return false;
        }
        true
    })
}

/// Odd run of backslashes directly before `pos`, not reaching before `floor`
pub fn is_escaped(bytes: &[u8], pos: usize, floor: usize) -> bool {
    let mut count = 0;
    let mut j = pos;
    while j > floor && bytes[j - 1] == b'\\' {
        count += 1;
        j -= 1;
    }
    count % 2 == 1
}

fn string_end(bytes: &[u8], content_start: usize, style: &QuoteStyle) -> (usize, bool) {
    let close = style.close.as_bytes();
    let mut j = content_start;
    while j < bytes.len() {
        if bytes[j..].starts_with(close) {
            match style.escape {
                Escape::Backslash if is_escaped(bytes, j, content_start) => {}
                Escape::Doubled if bytes[j + close.len()..].starts_with(close) => {
                    j += close.len() * 2;
                    continue;
                }
                _ => return (j + close.len(), true),
            }
        }
        if !style.multiline && bytes[j] == b'\n' {
            return (j, false);
        }
        j += 1;
    }
    (bytes.len(), false)
}

fn regex_allowed(bytes: &[u8], code_start: usize, i: usize, segments: &[Segment]) -> bool {
    let previous = bytes[code_start..i]
        .iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        .copied();
    match previous {
        Some(b) => b"(,=:[!&|?{};+-*%<>~^".contains(&b),
        None => match segments.last() {
            // A literal right before the slash means division.
            Some(seg) if seg.kind == SegmentKind::Str || seg.kind == SegmentKind::Regex => false,
            _ => true,
        },
    }
}

fn regex_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    let mut in_class = false;
    while j < bytes.len() {
        match bytes[j] {
            b'\n' => return None,
            b'\\' => {
                j += 2;
                continue;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                if j == start + 1 {
                    return None;
                }
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_alphabetic() {
                    j += 1;
                }
                return Some(j);
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Replaces every comment byte with a space, keeping newlines so that byte
/// offsets, lines and columns stay identical to the input.
pub fn strip_comments(text: &str, syntax: &SyntaxDescriptor) -> String {
    let mut out = String::with_capacity(text.len());
    for seg in segment(text, syntax) {
        let slice = &text[seg.start..seg.end];
        if seg.kind == SegmentKind::Comment {
            for c in slice.chars() {
                if c == '\n' {
                    out.push('\n');
                } else {
                    out.extend(std::iter::repeat(' ').take(c.len_utf8()));
                }
            }
        } else {
            out.push_str(slice);
        }
    }
    out
}

/// One code byte seen by [`walk_code`]
#[derive(Debug, Clone, Copy)]
pub struct CodeByte {
    pub pos: usize,
    pub byte: u8,
    /// Nesting depth before this byte
    pub depth: usize,
    /// Last non-whitespace byte before this one; literals count as their closing quote
    pub prev: Option<u8>,
    /// Span of the identifier starting at this byte, tracked for keyword-delimited syntaxes
    pub word: Option<(usize, usize)>,
}

#[derive(Debug, Default)]
struct Depth {
    brackets: usize,
    keywords: usize,
    angles: usize,
    saved_angles: Vec<usize>,
}

impl Depth {
    fn total(&self) -> usize {
        self.brackets + self.keywords + self.angles
    }

    fn open_bracket(&mut self) {
        self.brackets += 1;
        self.saved_angles.push(self.angles);
        self.angles = 0;
    }

    fn close_bracket(&mut self) {
        self.brackets = self.brackets.saturating_sub(1);
        self.angles = self.saved_angles.pop().unwrap_or(0);
    }
}

fn generic_open(bytes: &[u8], i: usize) -> bool {
    let before = i.checked_sub(1).map(|p| bytes[p]);
    let after = bytes.get(i + 1).copied();
    matches!(before, Some(b) if is_ident_byte(b))
        && matches!(after, Some(b) if b.is_ascii_alphabetic() || b == b'?' || b == b'>' || b == b'_' || b == b'[' || b == b'&')
}

fn keyword_delta(
    syntax: &SyntaxDescriptor,
    bytes: &[u8],
    word: &str,
    start: usize,
    end: usize,
    line_has_code: bool,
) -> isize {
    let Some(keywords) = &syntax.block_keywords else {
        return 0;
    };
    if start > 0 && matches!(bytes[start - 1], b'.' | b':' | b'@' | b'$') {
        return 0;
    }
    match bytes.get(end) {
        Some(b':') if bytes.get(end + 1) != Some(&b':') => return 0,
        Some(b'?') | Some(b'!') => return 0,
        _ => {}
    }
    if keywords.openers.contains(&word) {
        1
    } else if keywords.line_openers.contains(&word) && !line_has_code {
        1
    } else if word == keywords.closer {
        -1
    } else {
        0
    }
}

/// Visits every code byte of `text` with its nesting depth. Strings, regex
/// literals and comments are skipped, though literals update `prev`.
pub fn walk_code<F>(text: &str, syntax: &SyntaxDescriptor, mut visit: F)
where
    F: FnMut(CodeByte) -> ControlFlow<()>,
{
    let bytes = text.as_bytes();
    let mut depth = Depth::default();
    let mut prev: Option<u8> = None;
    let mut line_has_code = false;

    for seg in segment(text, syntax) {
        match seg.kind {
            SegmentKind::Code => {
                let mut i = seg.start;
                while i < seg.end {
                    let b = bytes[i];
                    let word_start = syntax.block_keywords.is_some()
                        && (b.is_ascii_alphabetic() || b == b'_')
                        && (i == 0 || !is_ident_byte(bytes[i - 1]));

                    if word_start {
                        let mut end = i;
                        while end < seg.end && is_ident_byte(bytes[end]) {
                            end += 1;
                        }
                        let word = &text[i..end];
                        let before = depth.total();
                        match keyword_delta(syntax, bytes, word, i, end, line_has_code) {
                            1 => depth.keywords += 1,
                            -1 => depth.keywords = depth.keywords.saturating_sub(1),
                            _ => {}
                        }
                        for pos in i..end {
                            let flow = visit(CodeByte {
                                pos,
                                byte: bytes[pos],
                                depth: before,
                                prev,
                                word: (pos == i).then_some((i, end)),
                            });
                            if flow.is_break() {
                                return;
                            }
                            prev = Some(bytes[pos]);
                        }
                        line_has_code = true;
                        i = end;
                        continue;
                    }

                    let before = depth.total();
                    match b {
                        b'(' | b'[' | b'{' => depth.open_bracket(),
                        b')' | b']' | b'}' => depth.close_bracket(),
                        b'<' if syntax.generics && generic_open(bytes, i) => depth.angles += 1,
                        b'>' if syntax.generics && depth.angles > 0 => {
                            if !matches!(i.checked_sub(1).map(|p| bytes[p]), Some(b'-') | Some(b'=')) {
                                depth.angles -= 1;
                            }
                        }
                        b';' => depth.angles = 0,
                        _ => {}
                    }
                    let flow = visit(CodeByte {
                        pos: i,
                        byte: b,
                        depth: before,
                        prev,
                        word: None,
                    });
                    if flow.is_break() {
                        return;
                    }
                    if b == b'\n' {
                        line_has_code = false;
                    } else if !b.is_ascii_whitespace() {
                        line_has_code = true;
                    }
                    if !b.is_ascii_whitespace() {
                        prev = Some(b);
                    }
                    i += 1;
                }
            }
            SegmentKind::Str | SegmentKind::Regex => {
                prev = Some(bytes[seg.end - 1]);
                line_has_code = true;
            }
            SegmentKind::Comment => {
                if text[seg.start..seg.end].contains('\n') {
                    line_has_code = false;
                }
            }
        }
    }
}

/// Position of the first code byte at depth zero for which `stop` holds
pub fn find_at_depth_zero<F>(text: &str, syntax: &SyntaxDescriptor, mut stop: F) -> Option<usize>
where
    F: FnMut(&CodeByte) -> bool,
{
    let mut found = None;
    walk_code(text, syntax, |cb| {
        if cb.depth == 0 && stop(&cb) {
            found = Some(cb.pos);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    found
}

/// Position of the close delimiter matching an opener that sits just before
/// `text`, or `None` when a different closer or the end of input comes first.
pub fn matching_close(text: &str, syntax: &SyntaxDescriptor, close: u8) -> Option<usize> {
    let mut result = None;
    walk_code(text, syntax, |cb| {
        if cb.depth == 0 && matches!(cb.byte, b')' | b']' | b'}') {
            if cb.byte == close {
                result = Some(cb.pos);
            }
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxId, SyntaxRegistry};

    fn descriptor(id: SyntaxId) -> &'static SyntaxDescriptor {
        SyntaxRegistry::with_defaults().get(id).unwrap().descriptor()
    }

    fn kinds(text: &str, id: SyntaxId) -> Vec<(SegmentKind, String)> {
        segment(text, descriptor(id))
            .into_iter()
            .map(|s| (s.kind, text[s.start..s.end].to_string()))
            .collect()
    }

    #[test]
    fn test_comment_markers_inside_strings_are_not_comments() {
        let text = r#"a: "see // and /* here", b"#;
        let segments = kinds(text, SyntaxId::JavaScript);
        assert!(segments.iter().all(|(k, _)| *k != SegmentKind::Comment));
        assert_eq!(segments[1], (SegmentKind::Str, "\"see // and /* here\"".to_string()));
    }

    #[test]
    fn test_escaped_backslash_before_quote_closes_string() {
        let text = r#"x = "C:\\temp\\", y = 1"#;
        let segments = segment(text, descriptor(SyntaxId::Python));
        let string = segments.iter().find(|s| s.kind == SegmentKind::Str).unwrap();
        assert_eq!(string.content(text), r"C:\\temp\\");
        assert!(string.is_closed());
        assert_eq!(&text[string.end..], ", y = 1");
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let text = r#""say \"hi\"" rest"#;
        let segments = segment(text, descriptor(SyntaxId::JavaScript));
        assert_eq!(segments[0].content(text), r#"say \"hi\""#);
    }

    #[test]
    fn test_verbatim_string_doubled_quotes() {
        let text = r#"@"a ""quoted"" path\" + x"#;
        let segments = segment(text, descriptor(SyntaxId::DotNet));
        assert_eq!(segments[0].kind, SegmentKind::Str);
        assert_eq!(segments[0].content(text), r#"a ""quoted"" path\"#);
    }

    #[test]
    fn test_nested_block_comments() {
        let text = "a /* outer /* inner */ still comment */ b";
        let stripped = strip_comments(text, descriptor(SyntaxId::Rust));
        assert_eq!(stripped.len(), text.len());
        assert!(stripped.starts_with("a "));
        assert!(stripped.ends_with(" b"));
        assert!(!stripped.contains("still"));
    }

    #[test]
    fn test_strip_comments_preserves_offsets_and_newlines() {
        let text = "dsn = 'x'  # trailing ü\nrelease = 'y'";
        let stripped = strip_comments(text, descriptor(SyntaxId::Python));
        assert_eq!(stripped.len(), text.len());
        assert_eq!(stripped.find('\n'), text.find('\n'));
        assert!(!stripped.contains('#'));
    }

    #[test]
    fn test_regex_literal_versus_division() {
        let regex = kinds("ignoreErrors: [/^Network \\/ error/i]", SyntaxId::JavaScript);
        assert!(regex.iter().any(|(k, s)| *k == SegmentKind::Regex && s == "/^Network \\/ error/i"));

        let division = kinds("rate: total / 2", SyntaxId::JavaScript);
        assert!(division.iter().all(|(k, _)| *k == SegmentKind::Code));
    }

    #[test]
    fn test_raw_string_prefix_requires_word_boundary() {
        let text = r#"for"x""#;
        let segments = segment(text, descriptor(SyntaxId::Rust));
        // `r"` here continues the identifier, the plain quote opens the string
        assert_eq!(segments[1].content(text), "x");
    }

    #[test]
    fn test_walk_code_tracks_depth_and_generics() {
        let text = "Map<String, List<Integer>> m; f(a, b)";
        let mut commas = Vec::new();
        walk_code(text, descriptor(SyntaxId::Java), |cb| {
            if cb.byte == b',' {
                commas.push(cb.depth);
            }
            ControlFlow::Continue(())
        });
        assert_eq!(commas, vec![1, 1]);
    }

    #[test]
    fn test_walk_code_counts_block_keywords() {
        let text = "x = lambda do |e|\n  e if e\nend\ny = 1";
        let end = find_at_depth_zero(text, descriptor(SyntaxId::Ruby), |cb| {
            cb.word.is_some_and(|(s, e)| &text[s..e] == "end")
        });
        assert_eq!(end, None);

        let newlines: Vec<usize> = {
            let mut v = Vec::new();
            walk_code(text, descriptor(SyntaxId::Ruby), |cb| {
                if cb.byte == b'\n' {
                    v.push(cb.depth);
                }
                ControlFlow::Continue(())
            });
            v
        };
        assert_eq!(newlines, vec![1, 1, 0]);
    }

    #[test]
    fn test_keyword_list_do_is_not_a_block() {
        let text = "if x, do: 1, else: 2\nnext";
        let mut depths = Vec::new();
        walk_code(text, descriptor(SyntaxId::Elixir), |cb| {
            if cb.byte == b'\n' {
                depths.push(cb.depth);
            }
            ControlFlow::Continue(())
        });
        assert_eq!(depths, vec![0]);
    }

    #[test]
    fn test_matching_close() {
        let js = descriptor(SyntaxId::JavaScript);
        assert_eq!(matching_close(" a: { b: 1 } }) rest", js, b'}'), Some(13));
        assert_eq!(matching_close(" a: 1 ) }", js, b'}'), None);
        assert_eq!(matching_close(" a: 1", js, b'}'), None);
    }
}
