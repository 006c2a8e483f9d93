//! Line (`-- text`) and block (`[- text -]`) comments.
//!
//! Comments are extracted from the raw input before anything else runs,
//! then stripped so no other extractor sees them.

use log::trace;
use memchr::memmem;

use crate::ast::{Comment, CommentKind};
use crate::lexer::Lexer;

const BLOCK_OPEN: &[u8] = b"[-";
const BLOCK_CLOSE: &[u8] = b"-]";

/// Collect comments in order: every line comment, then every block comment.
///
/// Comments whose body is empty after trimming are skipped.
///
/// ```rust
/// use cookparse_core::extract_comments;
///
/// let comments = extract_comments("Mix [- gently -] well\n-- family recipe");
/// let names: Vec<_> = comments.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["family recipe", "gently"]);
/// ```
pub fn extract_comments(text: &str) -> Vec<Comment> {
    let mut comments: Vec<Comment> = Lexer::new(text)
        .filter_map(|line| line_comment_body(line.text))
        .filter(|body| !body.is_empty())
        .map(|body| Comment {
            kind: CommentKind::Line,
            name: body.to_string(),
        })
        .collect();

    comments.extend(
        BlockComments::new(text)
            .map(|(_, body)| body.trim())
            .filter(|body| !body.is_empty())
            .map(|body| Comment {
                kind: CommentKind::Block,
                name: body.to_string(),
            }),
    );

    comments
}

/// Strip all comments from `text`.
///
/// Line comments are blanked (their line stays, empty) and block comments
/// are cut out, possibly joining text across lines. The two passes repeat
/// until nothing changes, so the result never contains a removable comment.
///
/// ```rust
/// use cookparse_core::remove_comments;
///
/// assert_eq!(remove_comments("Mix [- gently -]well\n-- note\nServe"), "Mix well\n\nServe");
/// ```
pub fn remove_comments(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        trace!("comment removal exposed new comments, stripping again");
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    strip_block_comments(&strip_line_comments(text))
}

/// Body of a `--` line comment, trimmed.
#[inline]
fn line_comment_body(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("--").map(str::trim)
}

fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in Lexer::new(text).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line_comment_body(line.text).is_none() {
            out.push_str(line.text);
        }
    }
    out
}

fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for ((start, end), _) in BlockComments::new(text) {
        out.push_str(&text[copied..start]);
        copied = end;
    }
    out.push_str(&text[copied..]);
    out
}

/// Iterator over closed `[- ... -]` blocks as `((start, end), body)`.
///
/// Each block ends at the first `-]` after its opener. An opener with no
/// closer ends the scan and stays in the text.
struct BlockComments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> BlockComments<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for BlockComments<'a> {
    type Item = ((usize, usize), &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        let start = self.pos + memmem::find(&bytes[self.pos..], BLOCK_OPEN)?;
        let body_start = start + BLOCK_OPEN.len();
        let Some(close) = memmem::find(&bytes[body_start..], BLOCK_CLOSE) else {
            trace!("unterminated block comment at byte {}", start);
            self.pos = bytes.len();
            return None;
        };
        let body_end = body_start + close;
        let end = body_end + BLOCK_CLOSE.len();
        self.pos = end;
        Some(((start, end), &self.text[body_start..body_end]))
    }
}
