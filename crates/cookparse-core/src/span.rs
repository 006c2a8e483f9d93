//! Byte ranges inside a single source line.
//!
//! The annotation scanner reports every match as a `Span` relative to the
//! text it scanned, so the step builder can slice out the plain text that
//! sits between annotations.

/// A byte range in scanned text.
///
/// Offsets are bytes, not characters, and the range is half-open: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use cookparse_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(&"Add @salt{1g}"[span.start..span.end], "@salt{");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
