//! HTML Character Reference Decoding
//!
//! Handles decoding of:
//! - The XML built-ins: &lt; &gt; &amp; &quot; &apos;
//! - A table of common HTML named references (&nbsp; &copy; &mdash; ...)
//! - Numeric character references: &#123; &#x7B;
//!
//! Unknown or malformed references are kept literally.
//! Uses Cow for zero-copy when no references are present.

use memchr::memchr;
use std::borrow::Cow;

/// Longest name we bother looking up, including the '#' of numeric forms
const MAX_REFERENCE_LEN: usize = 32;

/// Decode text content, handling character references
///
/// Returns Borrowed if no references present (zero-copy),
/// returns Owned if anything was decoded.
#[inline]
pub fn decode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if there are any references using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_references(input))
}

/// Decode every character reference in the input
pub fn decode_references(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp_offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + amp_offset;
        result.push_str(&input[pos..amp]);

        let window_end = (amp + 1 + MAX_REFERENCE_LEN).min(bytes.len());
        let decoded = memchr(b';', &bytes[amp + 1..window_end]).and_then(|semi| {
            let name = &input[amp + 1..amp + 1 + semi];
            decode_reference(name).map(|c| (c, semi))
        });

        match decoded {
            Some((decoded, semi)) => {
                result.push_str(&decoded);
                pos = amp + semi + 2;
            }
            None => {
                // Unknown reference, keep as-is
                result.push('&');
                pos = amp + 1;
            }
        }
    }
    result.push_str(&input[pos..]);
    result
}

/// Decode a single reference body (the text between '&' and ';')
fn decode_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(numeric) = name.strip_prefix('#') {
        return decode_numeric(numeric).map(|c| Cow::Owned(c.to_string()));
    }
    named_reference(name).map(Cow::Borrowed)
}

/// Decode a numeric reference body (after '#').
///
/// Out-of-range values, surrogates and NUL decode to U+FFFD.
fn decode_numeric(body: &str) -> Option<char> {
    let (digits, radix) = match body.as_bytes().first()? {
        b'x' | b'X' => (&body[1..], 16),
        _ => (body, 10),
    };
    if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    match value {
        0 => Some(char::REPLACEMENT_CHARACTER),
        v => Some(char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

fn named_reference(name: &str) -> Option<&'static str> {
    Some(match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "hellip" => "\u{2026}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "minus" => "\u{2212}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "curren" => "\u{a4}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "shy" => "\u{ad}",
        "micro" => "\u{b5}",
        "frac12" => "\u{bd}",
        "frac14" => "\u{bc}",
        "frac34" => "\u{be}",
        "sup1" => "\u{b9}",
        "sup2" => "\u{b2}",
        "sup3" => "\u{b3}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "hearts" => "\u{2665}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_references_borrows() {
        assert!(matches!(decode_text("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_builtin_references() {
        assert_eq!(decode_text("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
        assert_eq!(decode_text("&quot;x&apos;"), "\"x'");
    }

    #[test]
    fn test_html_named_references() {
        assert_eq!(decode_text("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(decode_text("&copy; 2024 &mdash; all"), "\u{a9} 2024 \u{2014} all");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_text("&#0;"), "\u{fffd}");
        assert_eq!(decode_text("&#xD800;"), "\u{fffd}");
        assert_eq!(decode_text("&#99999999999;"), "\u{fffd}");
    }

    #[test]
    fn test_unknown_references_kept() {
        assert_eq!(decode_text("&bogus; & &#xZZ; &amp"), "&bogus; & &#xZZ; &amp");
    }

    #[test]
    fn test_semicolon_far_away_is_not_a_reference() {
        let input = format!("&{};", "a".repeat(64));
        assert_eq!(decode_text(&input), input);
    }
}
