//! Line splitting with SIMD-accelerated newline scanning.
//!
//! Every extractor that works line by line (metadata, steps, line comments)
//! walks the input through [`Lexer`], which borrows each line from the input
//! and numbers it from 1 for error reporting.

use memchr::memchr;

/// A single line from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text, without the trailing `\n` or `\r\n`.
    pub text: &'a str,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// The line text with leading and trailing whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Iterator over the lines of a document.
///
/// A trailing newline does not produce an extra empty line.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    number: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            number: 0,
        }
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };
        self.number += 1;

        Some(Line {
            // `\n` and `\r` are ASCII, so both offsets sit on char boundaries.
            text: &self.input[start..text_end],
            number: self.number,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.read_line()
    }
}

/// 1-based line number of a byte offset in `input`.
#[inline]
pub fn line_number_at(input: &str, offset: usize) -> usize {
    let end = offset.min(input.len());
    memchr::memchr_iter(b'\n', &input.as_bytes()[..end]).count() + 1
}
