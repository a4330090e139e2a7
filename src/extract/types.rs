use crate::syntax::SyntaxId;
use indexmap::IndexMap;
use serde::Serialize;
use std::cell::Cell;
use std::fmt;

/// Value materialized from a literal; anything that is not a plain literal
/// keeps its source text in [`ExtractedValue::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ExtractedValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Array(Vec<ExtractedValue>),
    Raw(String),
}

impl ExtractedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtractedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExtractedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtractedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedValue::String(s) => write!(f, "\"{}\"", s),
            ExtractedValue::Number(n) => write!(f, "{}", n),
            ExtractedValue::Boolean(b) => write!(f, "{}", b),
            ExtractedValue::Null => write!(f, "null"),
            ExtractedValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ExtractedValue::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// Shape-based classification of a value's source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    Callback,
    Regex,
    Expression,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Callback => "callback",
            ValueType::Regex => "regex",
            ValueType::Expression => "expression",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedOption {
    /// Key in the snippet's own spelling
    pub key: String,
    pub value: ExtractedValue,
    pub raw: String,
    pub value_type: ValueType,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// 1-based line and column (in characters) of a byte offset
    pub fn of(text: &str, offset: usize) -> Self {
        LineIndex::new(text).position(offset)
    }
}

/// Line starts of a text, built once and shared by every position lookup
/// made during one extraction.
///
/// Lines are found by binary search. Columns are counted from the previous
/// lookup when it sits earlier on the same line, so ascending lookups walk
/// each line once.
#[derive(Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
    last: Cell<Option<(usize, usize)>>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(pos, _)| pos + 1))
            .collect();
        Self {
            text,
            line_starts,
            last: Cell::new(None),
        }
    }

    pub fn line(&self, offset: usize) -> usize {
        let offset = self.clamp(offset);
        self.line_starts.partition_point(|&start| start <= offset)
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = self.clamp(offset);
        let line = self.line(offset);
        let line_start = self.line_starts[line - 1];
        let (from, counted) = match self.last.get() {
            Some((prev, column)) if prev >= line_start && prev <= offset => (prev, column - 1),
            _ => (line_start, 0),
        };
        let column = counted + self.text.get(from..offset).map_or(0, |s| s.chars().count()) + 1;
        self.last.set(Some((offset, column)));
        Position { line, column }
    }

    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ExtractionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, text: &str, offset: usize) -> Self {
        Self::located(message, Position::of(text, offset))
    }

    pub fn located(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{} ({})", self.message, position),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub syntax: SyntaxId,
    pub valid: bool,
    pub options: IndexMap<String, ExtractedOption>,
    pub source: String,
    pub errors: Vec<ExtractionError>,
    pub warnings: Vec<ExtractionError>,
}

impl ExtractionResult {
    pub fn failed(syntax: SyntaxId, source: &str, error: ExtractionError) -> Self {
        Self {
            syntax,
            valid: false,
            options: IndexMap::new(),
            source: source.to_string(),
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ExtractedOption> {
        self.options.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
