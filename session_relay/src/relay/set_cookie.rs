//! Tokenizer for `Set-Cookie` header lines.
//!
//! The auth cookie is HTTP-only, so the only place its value is visible to us
//! is the backend's `Set-Cookie` response header. Each entry is
//! `name=value; Attr; Attr=val; ...`. A single line may also hold several
//! entries folded with commas; `Expires=` dates contain commas too, so a comma
//! only starts a new entry when a `name=` follows before the next `;`.

use http::HeaderValue;

/// Split a possibly comma-folded `Set-Cookie` line into individual entries.
pub(crate) fn split_folded(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut entries = Vec::new();
    let mut start = 0;

    for (i, b) in bytes.iter().enumerate() {
        if *b != b',' {
            continue;
        }
        let rest = &line[i + 1..];
        let next_token_end = rest.find([';', ',']).unwrap_or(rest.len());
        if rest[..next_token_end].contains('=') {
            let entry = line[start..i].trim();
            if !entry.is_empty() {
                entries.push(entry);
            }
            start = i + 1;
        }
    }

    let last = line[start..].trim();
    if !last.is_empty() {
        entries.push(last);
    }
    entries
}

/// The `name=value` pair at the head of a single cookie entry.
///
/// The value runs up to the first `;` and may itself contain `=`.
pub(crate) fn cookie_pair(entry: &str) -> Option<(&str, &str)> {
    let head = entry.split(';').next()?;
    let (name, value) = head.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Value of the first entry named `cookie_name` across all `Set-Cookie` values.
///
/// Non-UTF-8 header values are skipped; an empty value counts as no match.
pub fn extract_cookie_value(set_cookie: &[HeaderValue], cookie_name: &str) -> Option<String> {
    set_cookie
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(split_folded)
        .filter_map(cookie_pair)
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
