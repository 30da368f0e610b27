//! SIMD-accelerated markup scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::{memchr, memchr2, memmem};

/// Byte cursor over the markup input
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Total input length
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advance by n bytes, clamped to the end of input
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skip HTML whitespace (space, tab, newline, form feed, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && is_whitespace(self.input[self.pos]) {
            self.pos += 1;
        }
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside quotes
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut quote: Option<u8> = None;

        while pos < self.input.len() {
            // Jump straight to the next interesting byte
            let rest = &self.input[pos..];
            let hit = match quote {
                Some(q) => memchr(q, rest),
                None => {
                    let next_gt = memchr(b'>', rest);
                    let next_quote = memchr2(b'"', b'\'', rest);
                    match (next_gt, next_quote) {
                        (Some(gt), Some(q)) if q < gt => Some(q),
                        (Some(gt), _) => Some(gt),
                        (None, q) => q,
                    }
                }
            }?;
            pos += hit;
            match (quote, self.input[pos]) {
                (Some(q), b) if b == q => quote = None,
                (None, b'>') => return Some(pos),
                (None, b @ (b'"' | b'\'')) => {
                    // A quote only opens a value right after '=' (ignoring whitespace)
                    if preceded_by_equals(&self.input[self.pos..pos]) {
                        quote = Some(b);
                    }
                }
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence
    #[inline]
    pub fn find_bytes(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find `</name` (ASCII case-insensitive) followed by a tag-name terminator.
    /// Used to find the end of raw text elements like `<script>`.
    pub fn find_end_tag(&self, name: &[u8]) -> Option<usize> {
        let mut pos = self.pos;
        while let Some(i) = memmem::find(&self.input[pos..], b"</") {
            let start = pos + i;
            let name_start = start + 2;
            let name_end = name_start + name.len();
            if name_end <= self.input.len()
                && self.input[name_start..name_end].eq_ignore_ascii_case(name)
                && self
                    .input
                    .get(name_end)
                    .is_none_or(|&b| is_whitespace(b) || b == b'>' || b == b'/')
            {
                return Some(start);
            }
            pos = start + 2;
        }
        None
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Case-insensitive (ASCII) variant of `starts_with`
    #[inline]
    pub fn starts_with_ignore_case(&self, needle: &[u8]) -> bool {
        let rest = &self.input[self.pos..];
        rest.len() >= needle.len() && rest[..needle.len()].eq_ignore_ascii_case(needle)
    }

    /// Read a tag name: everything up to whitespace, '/', or '>'
    pub fn read_tag_name(&mut self) -> &'a [u8] {
        let start = self.pos;
        while self.pos < self.input.len() {
            let b = self.input[self.pos];
            if is_whitespace(b) || b == b'/' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }
}

/// HTML whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Check if byte can start a tag name
#[inline]
pub fn is_tag_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn preceded_by_equals(before: &[u8]) -> bool {
    before
        .iter()
        .rev()
        .find(|&&b| !is_whitespace(b))
        .is_some_and(|&b| b == b'=')
}
