//! Query-string extraction for the `QA_URL` column.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Parses the parameters after the first `?` of `url`.
///
/// Any undecodable key or value makes the whole result empty, as does a URL
/// without a query part.
pub fn query_params(url: &str) -> HashMap<String, String> {
    let Some((_, query)) = url.split_once('?') else {
        return HashMap::new();
    };
    parse_pairs(query).unwrap_or_default()
}

fn parse_pairs(query: &str) -> Option<HashMap<String, String>> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        let mut parts = pair.split('=');
        let key = decode(parts.next().unwrap_or_default())?;
        let value = decode(parts.next().unwrap_or_default())?.replace('+', " ");
        params.insert(key, value);
    }
    Some(params)
}

// Strict: a stray `%` or invalid UTF-8 is a failure, not passed through.
fn decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}
