//! Pattern string compiler
//!
//! Turns a pattern such as `%d{%H:%M:%S} [%p] %m%n` into the ordered list of
//! [`FormatItem`]s a [`Formatter`](super::formatter::Formatter) renders.
//!
//! Syntax:
//!
//! - `%` followed by a run of ASCII letters is a directive; the recognized
//!   keys are `m p r c t F d f l n T`.
//! - A directive may carry an argument in braces: `%d{%Y-%m-%d}`.
//! - `%%` is a literal percent sign.
//! - A `%` that is not followed by a letter is kept verbatim.
//!
//! Compilation never fails. Unknown keys compile to an
//! `<<error_format %KEY>>` marker and an unterminated brace compiles to
//! `<<pattern_error>>`, so a bad pattern shows up in the output itself.

use super::formatter::FormatItem;

/// Marker emitted when a directive argument is never closed
pub const PATTERN_ERROR: &str = "<<pattern_error>>";

/// Compile `pattern` into its format items, left to right.
pub fn compile(pattern: &str) -> Vec<FormatItem> {
    let bytes = pattern.as_bytes();
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            let end = pattern[i..]
                .find('%')
                .map_or(bytes.len(), |offset| i + offset);
            literal.push_str(&pattern[i..end]);
            i = end;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'%') {
            literal.push('%');
            i += 2;
            continue;
        }

        let key_start = i + 1;
        let mut n = key_start;
        while n < bytes.len() && bytes[n].is_ascii_alphabetic() {
            n += 1;
        }
        let key = &pattern[key_start..n];

        let mut argument = "";
        if bytes.get(n) == Some(&b'{') {
            match pattern[n + 1..].find('}') {
                Some(offset) => {
                    argument = &pattern[n + 1..n + 1 + offset];
                    n += offset + 2;
                }
                None => {
                    eprintln!(
                        "[LOGGER ERROR] pattern parse error: {} - {}",
                        pattern,
                        &pattern[i..]
                    );
                    flush_literal(&mut literal, &mut items);
                    items.push(FormatItem::ErrorPlaceholder(PATTERN_ERROR.to_string()));
                    return items;
                }
            }
        }

        if key.is_empty() {
            literal.push_str(&pattern[i..n]);
        } else {
            flush_literal(&mut literal, &mut items);
            items.push(FormatItem::from_directive(key, argument));
        }
        i = n;
    }

    flush_literal(&mut literal, &mut items);
    items
}

fn flush_literal(literal: &mut String, items: &mut Vec<FormatItem>) {
    if !literal.is_empty() {
        items.push(FormatItem::Literal(std::mem::take(literal)));
    }
}
