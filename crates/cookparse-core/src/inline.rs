//! Annotation scanner for step text.
//!
//! Splits a line into plain text and the four annotation kinds:
//!
//! | Sigil | Forms |
//! |---|---|
//! | `@` | `@name{details}`, `@name` |
//! | `#` | `#name with spaces{}`, `#name` |
//! | `~` | `~timer name{duration}`, `~{duration}` |
//! | `+` | `+note text{}` |
//!
//! Scanning is greedy and left-to-right with no backtracking. At each sigil
//! the forms are tried in the order listed; a sigil that starts no form is
//! plain text. A `~` whose name runs into a `{` with no closing `}`, or a
//! word-initial `~` followed by punctuation, is a fatal error.

use log::debug;
use memchr::{memchr, memchr3};

use crate::ast::{Ingredient, StepToken, Timer};
use crate::error::{ParseError, ParseResult};
use crate::quantity::parse_quantity_unit;
use crate::span::Span;

/// Split one line into step tokens.
///
/// `line` is the 1-based line number reported in errors.
///
/// ```rust
/// use cookparse_core::{scan_line, StepToken};
///
/// let tokens = scan_line("Boil in a #pot for ~{10%minutes}.", 1).unwrap();
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens[1], StepToken::Cookware("pot".into()));
/// ```
pub fn scan_line(text: &str, line: usize) -> ParseResult<Vec<StepToken>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    StepScanner::new(text, line).scan()
}

/// Classify a single annotation span such as `@flour{200g}`.
///
/// Text that matches no annotation comes back as [`StepToken::Text`]. A span
/// starting with `~` must be a well-formed timer; anything else is
/// [`crate::ParseErrorKind::InvalidTimerSyntax`], reported on line 1.
pub fn parse_annotation(span: &str) -> ParseResult<StepToken> {
    if span.is_empty() {
        return Ok(StepToken::Text(String::new()));
    }
    if span.starts_with('~') {
        return match_timer(span, 0)
            .map(|annotation| annotation.token)
            .ok_or_else(|| ParseError::invalid_timer(span, 1));
    }

    Ok(match_annotation(span, 0, 1)?
        .map(|annotation| annotation.token)
        .unwrap_or_else(|| StepToken::Text(span.to_string())))
}

/// A matched annotation and the bytes it covers.
#[derive(Debug)]
struct Annotation {
    span: Span,
    token: StepToken,
}

struct StepScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> StepScanner<'a> {
    #[inline]
    fn new(text: &'a str, line: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line,
        }
    }

    fn scan(&mut self) -> ParseResult<Vec<StepToken>> {
        let mut tokens = Vec::with_capacity(8);
        let mut text_start = 0;

        while self.pos < self.bytes.len() {
            let next = self.find_next_sigil();
            if next >= self.bytes.len() {
                break;
            }
            self.pos = next;

            match match_annotation(self.text, self.pos, self.line)? {
                Some(annotation) => {
                    self.flush_text(&mut tokens, text_start, annotation.span.start);
                    tokens.push(annotation.token);
                    self.pos = annotation.span.end;
                    text_start = self.pos;
                }
                None => self.pos += 1,
            }
        }

        self.flush_text(&mut tokens, text_start, self.bytes.len());
        Ok(tokens)
    }

    #[inline(always)]
    fn find_next_sigil(&self) -> usize {
        let remaining = &self.bytes[self.pos..];

        let common = memchr3(b'@', b'#', b'~', remaining);
        let note = memchr(b'+', remaining);

        match (common, note) {
            (Some(a), Some(b)) => self.pos + a.min(b),
            (Some(a), None) => self.pos + a,
            (None, Some(b)) => self.pos + b,
            (None, None) => self.bytes.len(),
        }
    }

    #[inline(always)]
    fn flush_text(&self, tokens: &mut Vec<StepToken>, start: usize, end: usize) {
        let text = self.text[start..end].trim();
        if !text.is_empty() {
            tokens.push(StepToken::Text(text.to_string()));
        }
    }
}

/// Try every annotation form at the sigil at byte `start`.
fn match_annotation(
    text: &str,
    start: usize,
    line: usize,
) -> ParseResult<Option<Annotation>> {
    let annotation = match text.as_bytes()[start] {
        b'@' => ingredient_at(text, start)
            .or_else(|| bare_ingredient_at(text, start))
            .map(|(span, ingredient)| Annotation {
                span,
                token: StepToken::Ingredient(ingredient),
            }),
        b'#' => cookware_at(text, start)
            .or_else(|| bare_cookware_at(text, start))
            .map(|(span, name)| Annotation {
                span,
                token: StepToken::Cookware(name),
            }),
        b'~' => match match_timer(text, start) {
            Some(timer) => Some(timer),
            None if is_dangling_timer(text, start) => {
                let from = timer_name_end(text, start);
                let end = scan_while(text, from, |c| !c.is_whitespace());
                debug!("malformed timer '{}' on line {}", &text[start..end], line);
                return Err(ParseError::invalid_timer(&text[start..end], line));
            }
            None => None,
        },
        b'+' => match_note(text, start),
        _ => None,
    };
    Ok(annotation)
}

// ============================================================================
// Character classes
// ============================================================================

#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
pub(crate) fn is_ingredient_char(c: char) -> bool {
    is_word_char(c) || is_inline_space(c) || c == '&' || c == '-'
}

#[inline]
pub(crate) fn is_bare_ingredient_char(c: char) -> bool {
    is_word_char(c) || c == '&' || c == '-'
}

#[inline]
fn is_cookware_char(c: char) -> bool {
    is_word_char(c) || is_inline_space(c) || c == '-'
}

#[inline]
fn is_timer_name_char(c: char) -> bool {
    is_word_char(c) || is_inline_space(c) || matches!(c, '-' | '°')
}

#[inline]
fn is_note_char(c: char) -> bool {
    is_word_char(c) || is_inline_space(c) || c == '&' || c == '-'
}

/// End offset of the run of chars matching `pred` that starts at `from`.
#[inline]
pub(crate) fn scan_while(text: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    text[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| from + i)
}

/// A name run usable as an annotation name: non-empty, no leading whitespace.
#[inline]
fn is_valid_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Body of a `{...}` group opening at `open`, and the offset just past `}`.
#[inline]
pub(crate) fn brace_body(text: &str, open: usize) -> Option<(&str, usize)> {
    let rest = text[open..].strip_prefix('{')?;
    let close = memchr(b'}', rest.as_bytes())?;
    Some((&rest[..close], open + close + 2))
}

/// Whether the char before `pos` is a word char.
#[inline]
fn follows_word_char(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().is_some_and(is_word_char)
}

// ============================================================================
// Annotation forms
// ============================================================================

/// `@name{details}`
pub(crate) fn ingredient_at(text: &str, start: usize) -> Option<(Span, Ingredient)> {
    let name_end = scan_while(text, start + 1, is_ingredient_char);
    let name = &text[start + 1..name_end];
    if !is_valid_name(name) {
        return None;
    }

    let (details, end) = brace_body(text, name_end)?;
    let (quantity, unit) = parse_quantity_unit(details);
    Some((
        Span::new(start, end),
        Ingredient::new(name.trim_end(), quantity, unit),
    ))
}

/// `@name` with no braces. The `@` must not follow a word char, so
/// addresses like `chef@example.com` stay text.
pub(crate) fn bare_ingredient_at(text: &str, start: usize) -> Option<(Span, Ingredient)> {
    if follows_word_char(text, start) {
        return None;
    }

    let end = scan_while(text, start + 1, is_bare_ingredient_char);
    if end == start + 1 {
        return None;
    }

    Some((
        Span::new(start, end),
        Ingredient::named(&text[start + 1..end]),
    ))
}

/// `#name with spaces{}`
///
/// The name is at least two chars and the braces follow it directly, so
/// `#a{}` and `#pan {}` fall through to the bare form.
pub(crate) fn cookware_at(text: &str, start: usize) -> Option<(Span, String)> {
    let name_end = scan_while(text, start + 1, is_cookware_char);
    let name = &text[start + 1..name_end];
    if !is_valid_name(name)
        || name.ends_with(char::is_whitespace)
        || name.chars().nth(1).is_none()
        || !text[name_end..].starts_with("{}")
    {
        return None;
    }

    Some((Span::new(start, name_end + 2), name.to_string()))
}

/// `#name`, a single word.
pub(crate) fn bare_cookware_at(text: &str, start: usize) -> Option<(Span, String)> {
    let end = scan_while(text, start + 1, is_word_char);
    if end == start + 1 {
        return None;
    }

    Some((Span::new(start, end), text[start + 1..end].to_string()))
}

#[inline]
fn timer_name_end(text: &str, start: usize) -> usize {
    scan_while(text, start + 1, is_timer_name_char)
}

/// `~name{duration}` or `~{duration}`. Whitespace around the name is dropped.
fn match_timer(text: &str, start: usize) -> Option<Annotation> {
    let name_end = timer_name_end(text, start);
    let (duration, end) = brace_body(text, name_end)?;

    Some(Annotation {
        span: Span::new(start, end),
        token: StepToken::Timer(Timer::new(
            text[start + 1..name_end].trim(),
            duration.trim(),
        )),
    })
}

/// A `~` that failed to match as a timer but cannot be plain text either.
///
/// A name that runs into `{` opened a duration that never closes on this
/// line. Otherwise `~` followed by whitespace, the end of the line, or
/// something name-like (`~3%minutes`) is a literal tilde, as is a `~`
/// inside a word such as a URL path. A word-initial `~` followed by
/// punctuation is not.
fn is_dangling_timer(text: &str, start: usize) -> bool {
    if text[timer_name_end(text, start)..].starts_with('{') {
        return true;
    }

    let word_initial = text[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let unreadable = text[start + 1..]
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace() && !is_timer_name_char(c));
    word_initial && unreadable
}

/// `+note text{}`
fn match_note(text: &str, start: usize) -> Option<Annotation> {
    let name_end = scan_while(text, start + 1, is_note_char);
    let name = &text[start + 1..name_end];
    if !is_valid_name(name) || !text[name_end..].starts_with("{}") {
        return None;
    }

    Some(Annotation {
        span: Span::new(start, name_end + 2),
        token: StepToken::Note(name.trim_end().to_string()),
    })
}
