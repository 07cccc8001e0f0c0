//! Text transforms applied to library source before embedding.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static LITERAL_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z$_][a-zA-Z0-9$_]*):").expect("valid literal key pattern"));

/// Remove `@` from block comments so the whole-program compiler does not
/// try to interpret the library's jsdoc tags.
///
/// An unterminated block comment is left untouched; it is the library's
/// problem, not ours.
pub fn strip_annotations(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);
        match tail.find("*/") {
            Some(end) => {
                let comment = &tail[..end + 2];
                out.push_str(&comment.replace('@', ""));
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape source for inclusion inside a double-quoted literal. Backslashes
/// first, or the quote escapes would themselves get doubled.
pub fn escape_source(source: &str) -> String {
    source.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Every identifier appearing as an object literal key (`name:`), in first
/// occurrence order.
pub fn literal_keys(source: &str) -> Vec<String> {
    let mut keys = IndexSet::new();
    for caps in LITERAL_KEY.captures_iter(source) {
        keys.insert(caps[1].to_string());
    }
    keys.into_iter().collect()
}

/// Keys that look like DOM event handler props (`onClick`, `onDragEnd`).
pub fn event_names<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter()
        .map(AsRef::as_ref)
        .filter(|key| {
            key.strip_prefix("on")
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
        .map(str::to_string)
        .collect()
}
