//! URL encoding helpers for provider parameters and degraded-result links

/// Percent-encode a string for use in URL query parameters
///
/// Encodes all characters except unreserved characters (`A-Z`, `a-z`, `0-9`,
/// `-`, `_`, `.`, `~`). Spaces are encoded as `+`.
pub fn encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for c in input.chars() {
        match c {
            ' ' => result.push('+'),
            _ => push_unreserved_or_escaped(&mut result, c),
        }
    }
    result
}

/// Turn free text into an article-style path segment
///
/// Whitespace runs collapse to `_` and everything outside the unreserved
/// set is percent-encoded, so `"rust  async book"` becomes `rust_async_book`.
pub fn slugify(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for (i, word) in input.split_whitespace().enumerate() {
        if i > 0 {
            result.push('_');
        }
        for c in word.chars() {
            push_unreserved_or_escaped(&mut result, c);
        }
    }
    result
}

fn push_unreserved_or_escaped(out: &mut String, c: char) {
    use std::fmt::Write;

    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
        _ => {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).as_bytes() {
                let _ = write!(out, "%{b:02X}");
            }
        },
    }
}
