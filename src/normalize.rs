//! Conversions between option naming conventions
//!
//! The dictionary spells every option in camel case (`tracesSampleRate`).
//! Snippets use whatever their SDK uses: `traces_sample_rate`,
//! `TracesSampleRate`, or acronym spellings such as `SendDefaultPII`.

use crate::extract::ExtractionResult;

/// `traces_sample_rate` / `TracesSampleRate` -> `tracesSampleRate`
pub fn to_canonical(key: &str) -> String {
    if !key.contains('_') {
        let mut chars = key.chars();
        return match chars.next() {
            Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
            _ => key.to_string(),
        };
    }

    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.peek() {
                Some(next) if next.is_alphabetic() && !out.is_empty() => {
                    let upper = next.to_ascii_uppercase();
                    chars.next();
                    out.push(upper);
                }
                Some(next) if next.is_alphabetic() => {
                    // Leading underscore before a letter, nothing to capitalize onto
                    let lower = next.to_ascii_lowercase();
                    chars.next();
                    out.push(lower);
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `tracesSampleRate` -> `traces_sample_rate`
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `tracesSampleRate` -> `TracesSampleRate`
pub fn to_pascal_case(key: &str) -> String {
    let canonical = to_canonical(key);
    let mut chars = canonical.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convention-blind comparison key: lower case, no underscores
pub fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// True when the extracted options contain `canonical` in any spelling
pub fn has_logical_option(result: &ExtractionResult, canonical: &str) -> bool {
    if result.contains_key(canonical)
        || result.contains_key(&to_snake_case(canonical))
        || result.contains_key(&to_pascal_case(canonical))
    {
        return true;
    }
    let folded = fold(canonical);
    result.keys().any(|key| fold(key) == folded)
}
