//! Percent-decoding and query strings.

use std::collections::HashMap;
use std::fmt;

use crate::constants::{MAX_QUERY_PARAMS, MAX_URL_DECODED_LEN};

/// Failure of [`url_decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The decoded text would pass [`MAX_URL_DECODED_LEN`] bytes.
    TooLong,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong => write!(f, "decoded text longer than {MAX_URL_DECODED_LEN} bytes"),
        }
    }
}

impl std::error::Error for DecodeError {}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes and `+` (as a space), one level deep.
///
/// An escape that is not followed by two hex digits stays as a literal `%`.
/// Invalid UTF-8 becomes U+FFFD.
///
/// ```
/// use trivia_api::url_decode;
///
/// assert_eq!(url_decode("what+is").unwrap(), "what is");
/// assert_eq!(url_decode("100%25").unwrap(), "100%");
/// assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
/// ```
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let mut rest = s.as_bytes();
    let mut out = Vec::with_capacity(rest.len());

    while let Some((&first, tail)) = rest.split_first() {
        if out.len() >= MAX_URL_DECODED_LEN {
            return Err(DecodeError::TooLong);
        }
        rest = tail;
        match first {
            b'+' => out.push(b' '),
            b'%' => {
                let escape = match tail {
                    [hi, lo, after @ ..] => hex_value(*hi).zip(hex_value(*lo)).map(|pair| (pair, after)),
                    _ => None,
                };
                if let Some(((hi, lo), after)) = escape {
                    out.push((hi << 4) | lo);
                    rest = after;
                } else {
                    out.push(b'%');
                }
            },
            other => out.push(other),
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Query parameters plus how many pairs were ignored.
pub(super) struct ParsedQuery {
    pub(super) params: HashMap<String, String>,
    pub(super) dropped: usize,
}

/// Split `a=1&b=2` into decoded pairs. The first value of a repeated key is
/// kept; a key without `=` maps to `""`. Undecodable pairs and keys past
/// [`MAX_QUERY_PARAMS`] count as dropped.
pub(super) fn parse_query_string(query: &str) -> ParsedQuery {
    let mut params = HashMap::new();
    let mut dropped = 0;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Ok(key), Ok(value)) = (url_decode(key), url_decode(value)) else {
            dropped += 1;
            continue;
        };
        if params.contains_key(&key) {
            continue;
        }
        if params.len() >= MAX_QUERY_PARAMS {
            dropped += 1;
            continue;
        }
        params.insert(key, value);
    }

    ParsedQuery { params, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("world%20cup").unwrap(), "world cup");
        assert_eq!(url_decode("a%2fb").unwrap(), "a/b");
        assert_eq!(url_decode("title").unwrap(), "title");
        assert_eq!(url_decode("%E6%97%A5%E6%9C%AC").unwrap(), "日本");
        assert_eq!(url_decode("%FF").unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_url_decode_is_single_level() {
        assert_eq!(url_decode("%2541").unwrap(), "%41");
    }

    #[test]
    fn test_url_decode_keeps_bad_escapes() {
        assert_eq!(url_decode("%").unwrap(), "%");
        assert_eq!(url_decode("%4").unwrap(), "%4");
        assert_eq!(url_decode("%zz1").unwrap(), "%zz1");
        // The character after a lone % is still decoded normally
        assert_eq!(url_decode("%%41").unwrap(), "%A");
        assert_eq!(url_decode("%+").unwrap(), "% ");
    }

    #[test]
    fn test_url_decode_limit() {
        assert!(url_decode(&"q".repeat(MAX_URL_DECODED_LEN)).is_ok());
        let long = "q".repeat(MAX_URL_DECODED_LEN + 1);
        assert_eq!(url_decode(&long), Err(DecodeError::TooLong));
    }

    #[test]
    fn test_parse_query_string() {
        let parsed = parse_query_string("page=2&term=a&term=b&flag&&=x&q=world%20cup");
        assert_eq!(parsed.params["page"], "2");
        assert_eq!(parsed.params["term"], "a");
        assert_eq!(parsed.params["flag"], "");
        assert_eq!(parsed.params[""], "x");
        assert_eq!(parsed.params["q"], "world cup");
        assert_eq!(parsed.dropped, 0);
    }

    #[test]
    fn test_parse_query_string_caps_keys() {
        let pairs: Vec<String> = (0..MAX_QUERY_PARAMS + 3).map(|i| format!("k{i}=1")).collect();
        let parsed = parse_query_string(&pairs.join("&"));
        assert_eq!(parsed.params.len(), MAX_QUERY_PARAMS);
        assert_eq!(parsed.dropped, 3);
    }
}
