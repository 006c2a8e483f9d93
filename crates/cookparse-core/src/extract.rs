//! Document-level extractors.
//!
//! Each extractor scans the whole (comment-free) text independently; the
//! parser simply runs them all. They are public so callers can pull a
//! single category out of a recipe without a full parse.

use std::collections::HashSet;

use log::{debug, trace};
use memchr::{memchr, memmem};

use crate::ast::{Condition, Image, Ingredient, Metadata, Step, Substitution, Timer};
use crate::error::ParseResult;
use crate::inline::{
    bare_cookware_at, bare_ingredient_at, brace_body, cookware_at, ingredient_at,
    is_bare_ingredient_char, is_ingredient_char, is_word_char, scan_line, scan_while,
};
use crate::lexer::{line_number_at, Lexer};
use crate::quantity::parse_quantity_unit;
use crate::span::Span;

/// Run `matcher` at every `sigil` byte, left to right, skipping over
/// each match so matches never overlap.
fn find_all<T>(
    text: &str,
    sigil: u8,
    mut matcher: impl FnMut(&str, usize) -> Option<(Span, T)>,
) -> Vec<T> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(offset) = memchr(sigil, &bytes[pos..]) {
        let start = pos + offset;
        match matcher(text, start) {
            Some((span, item)) => {
                found.push(item);
                pos = span.end.max(start + 1);
            }
            None => pos = start + 1,
        }
    }
    found
}

// ============================================================================
// Metadata
// ============================================================================

/// Collect `>> key: value` lines.
///
/// Keys are lowercased; a repeated key keeps its first position and its
/// last value. Lines whose key is not a single word are ignored.
///
/// ```rust
/// use cookparse_core::extract_metadata;
///
/// let meta = extract_metadata(">> Servings: 4\n>> source: https://example.com");
/// assert_eq!(meta.get("servings"), Some("4"));
/// assert_eq!(meta.get("source"), Some("https://example.com"));
/// ```
pub fn extract_metadata(text: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for line in Lexer::new(text) {
        if let Some((key, value)) = metadata_entry(line.trimmed()) {
            if let Some(old) = metadata.insert(key.to_lowercase(), value) {
                trace!("metadata key '{}' redefined on line {} (was '{}')", key, line.number, old);
            }
        }
    }
    metadata
}

fn metadata_entry(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(">>")?.trim_start();
    let key_end = scan_while(rest, 0, is_word_char);
    if key_end == 0 {
        return None;
    }
    let value = rest[key_end..].trim_start().strip_prefix(':')?;
    Some((&rest[..key_end], value.trim()))
}

// ============================================================================
// Ingredients
// ============================================================================

/// Collect ingredient mentions, sorted by name.
///
/// Every distinct `@name{details}` triple is kept, so the same ingredient
/// may appear with different quantities. Bare `@name` mentions are added
/// only for names never seen in detailed form.
///
/// ```rust
/// use cookparse_core::extract_ingredients;
///
/// let ingredients = extract_ingredients("Add @salt{1%tsp}, @pepper and more @salt.");
/// let names: Vec<_> = ingredients.iter().map(|i| i.name.as_str()).collect();
/// assert_eq!(names, ["pepper", "salt"]);
/// ```
pub fn extract_ingredients(text: &str) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();
    let mut seen: HashSet<Ingredient> = HashSet::new();

    for ingredient in find_all(text, b'@', ingredient_at) {
        if seen.insert(ingredient.clone()) {
            ingredients.push(ingredient);
        }
    }

    let detailed: HashSet<String> = ingredients.iter().map(|i| i.name.clone()).collect();

    // Detailed matches are consumed here too so a bare match never starts
    // inside one.
    let bare = find_all(text, b'@', |text, start| {
        if let Some((span, _)) = ingredient_at(text, start) {
            return Some((span, None));
        }
        bare_ingredient_at(text, start).map(|(span, ingredient)| (span, Some(ingredient)))
    });

    for ingredient in bare.into_iter().flatten() {
        if detailed.contains(&ingredient.name) {
            trace!("bare @{} already listed with details", ingredient.name);
            continue;
        }
        if seen.insert(ingredient.clone()) {
            ingredients.push(ingredient);
        }
    }

    ingredients.sort_by(|a, b| a.name.cmp(&b.name));
    ingredients
}

// ============================================================================
// Cookware
// ============================================================================

/// Collect unique cookware names, sorted.
///
/// ```rust
/// use cookparse_core::extract_cookware;
///
/// let cookware = extract_cookware("Use a #pan, #2-quart pot{}, and #12-inch skillet{}");
/// assert_eq!(cookware, ["12-inch skillet", "2-quart pot", "pan"]);
/// ```
pub fn extract_cookware(text: &str) -> Vec<String> {
    let multi_word = find_all(text, b'#', cookware_at);

    // A word that opens a `{}` form belongs to the multi-word pass.
    let single_word = find_all(text, b'#', |text, start| {
        if cookware_at(text, start).is_some() {
            return None;
        }
        bare_cookware_at(text, start)
    });

    let mut seen = HashSet::new();
    let mut cookware: Vec<String> = multi_word
        .into_iter()
        .chain(single_word)
        .filter(|name| seen.insert(name.clone()))
        .collect();
    cookware.sort();
    cookware
}

// ============================================================================
// Steps
// ============================================================================

/// Split every instruction line into tokens.
///
/// Blank lines and `>>` metadata lines produce no step.
///
/// # Errors
///
/// [`crate::ParseErrorKind::InvalidTimerSyntax`] for a malformed `~` timer.
pub fn extract_steps(text: &str) -> ParseResult<Vec<Step>> {
    let mut steps = Vec::new();
    for line in Lexer::new(text) {
        let content = line.trimmed();
        if content.is_empty() || content.starts_with(">>") {
            continue;
        }
        steps.push(Step {
            tokens: scan_line(content, line.number)?,
        });
    }
    debug!("extracted {} steps", steps.len());
    Ok(steps)
}

// ============================================================================
// Timers
// ============================================================================

/// Collect timers whose duration is numeric: `~name{<digits>[%]<words>}`.
///
/// Names are returned exactly as written, untrimmed, and may contain `@`
/// or `#`. Durations such as `~{ten minutes}` are not timers here.
///
/// ```rust
/// use cookparse_core::{extract_timers, Timer};
///
/// let timers = extract_timers("Boil ~eggs{3%minutes}, rest ~{ten minutes}.");
/// assert_eq!(timers, [Timer::new("eggs", "3%minutes")]);
/// ```
pub fn extract_timers(text: &str) -> Vec<Timer> {
    find_all(text, b'~', match_flat_timer)
}

fn match_flat_timer(text: &str, start: usize) -> Option<(Span, Timer)> {
    let name_end = scan_while(text, start + 1, |c| {
        is_word_char(c) || c.is_whitespace() || matches!(c, '@' | '#' | '-')
    });
    let (duration, end) = brace_body(text, name_end)?;
    if !is_numeric_duration(duration) {
        return None;
    }
    Some((
        Span::new(start, end),
        Timer::new(&text[start + 1..name_end], duration),
    ))
}

/// `<digits>[%]<letters and whitespace>`, both runs non-empty.
fn is_numeric_duration(duration: &str) -> bool {
    let digits = duration.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    let rest = &duration[digits..];
    let rest = rest.strip_prefix('%').unwrap_or(rest);
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

// ============================================================================
// Conditions
// ============================================================================

const CONDITION_OPEN: &[u8] = b"If @";

/// Collect `If @ingredient{} is <condition>, <action>.` clauses.
///
/// The action ends at the first `.`; a clause that runs to the end of its
/// line only counts when nothing but whitespace follows in the document.
/// With the `@name{}` form the period is dropped, with a bare `@name` it is
/// kept. Annotations inside the action are flattened to plain words.
///
/// ```rust
/// use cookparse_core::extract_conditions;
///
/// let conditions = extract_conditions("If @egg{} is cooked, serve on a #plate{}.").unwrap();
/// assert_eq!(conditions[0].ingredient, "egg");
/// assert_eq!(conditions[0].condition, "cooked");
/// assert_eq!(conditions[0].action, "serve on a plate");
/// ```
///
/// # Errors
///
/// [`crate::ParseErrorKind::InvalidTimerSyntax`] for a malformed timer
/// inside an action.
pub fn extract_conditions(text: &str) -> ParseResult<Vec<Condition>> {
    let bytes = text.as_bytes();
    let mut conditions = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memmem::find(&bytes[pos..], CONDITION_OPEN) {
        let start = pos + offset;
        match match_condition(text, start)? {
            Some((end, condition)) => {
                conditions.push(condition);
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    Ok(conditions)
}

fn match_condition(text: &str, start: usize) -> ParseResult<Option<(usize, Condition)>> {
    // Position of the `@`.
    let at = start + CONDITION_OPEN.len() - 1;

    let name_end = scan_while(text, at + 1, is_ingredient_char);
    let name = text[at + 1..name_end].trim();
    let (ingredient, mut pos, braced) =
        if !name.is_empty() && text[name_end..].starts_with("{}") {
            (name, name_end + 2, true)
        } else {
            let bare_end = scan_while(text, at + 1, is_bare_ingredient_char);
            if bare_end == at + 1 {
                return Ok(None);
            }
            (&text[at + 1..bare_end], bare_end, false)
        };

    let Some(rest) = text[pos..].strip_prefix(" is ") else {
        return Ok(None);
    };
    pos = text.len() - rest.len();

    let condition_end = scan_while(text, pos, |c| {
        is_word_char(c) || c == ' ' || c == '\t' || c == '-'
    });
    let condition = text[pos..condition_end].trim();
    if condition.is_empty() || !text[condition_end..].starts_with(", ") {
        return Ok(None);
    }
    let action_start = condition_end + 2;

    let line_rest = &text[action_start..];
    let line_len = memchr(b'\n', line_rest.as_bytes()).unwrap_or(line_rest.len());
    let (action_end, end) = match memchr(b'.', &line_rest.as_bytes()[..line_len]) {
        Some(dot) if braced => (action_start + dot, action_start + dot + 1),
        Some(dot) => (action_start + dot + 1, action_start + dot + 1),
        None if text[action_start + line_len..].trim().is_empty() => {
            (action_start + line_len, action_start + line_len)
        }
        None => return Ok(None),
    };

    let line = line_number_at(text, start);
    let action = flatten_action(&text[action_start..action_end], line)?;

    Ok(Some((
        end,
        Condition {
            ingredient: ingredient.to_string(),
            condition: condition.to_string(),
            action,
        },
    )))
}

fn flatten_action(action: &str, line: usize) -> ParseResult<String> {
    let words: Vec<_> = scan_line(action, line)?
        .iter()
        .map(|token| token.display_text().trim().to_string())
        .filter(|word| !word.is_empty())
        .collect();
    Ok(words.join(" "))
}

// ============================================================================
// Substitutions
// ============================================================================

const ALTERNATIVE_OPEN: &str = " (or @";

/// Collect `@primary{qty} (or @substitute{qty})` pairs.
///
/// Both quantities must start with a digit.
///
/// ```rust
/// use cookparse_core::extract_substitutions;
///
/// let subs = extract_substitutions("Use @butter{100g} (or @margarine{100g}).");
/// assert_eq!(subs[0].primary.name, "butter");
/// assert_eq!(subs[0].substitute.name, "margarine");
/// assert_eq!(subs[0].substitute.unit.as_deref(), Some("g"));
/// ```
pub fn extract_substitutions(text: &str) -> Vec<Substitution> {
    find_all(text, b'@', match_substitution)
}

fn match_substitution(text: &str, start: usize) -> Option<(Span, Substitution)> {
    let (primary, primary_end) = quantified_ingredient(text, start)?;
    let rest = text[primary_end..].strip_prefix(ALTERNATIVE_OPEN)?;
    let at = text.len() - rest.len() - 1;
    let (substitute, substitute_end) = quantified_ingredient(text, at)?;
    if !text[substitute_end..].starts_with(')') {
        return None;
    }
    Some((
        Span::new(start, substitute_end + 1),
        Substitution {
            primary,
            substitute,
        },
    ))
}

/// `@name{<digit>...}` at `start`.
fn quantified_ingredient(text: &str, start: usize) -> Option<(Ingredient, usize)> {
    let name_end = scan_while(text, start + 1, is_ingredient_char);
    let name = text[start + 1..name_end].trim();
    if name.is_empty() {
        return None;
    }
    let (details, end) = brace_body(text, name_end)?;
    let details = details.trim();
    if !details.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let (quantity, unit) = parse_quantity_unit(details);
    Some((Ingredient::new(name, quantity, unit), end))
}

// ============================================================================
// Images
// ============================================================================

/// Collect `![description](path)` references, both parts trimmed.
///
/// ```rust
/// use cookparse_core::extract_images;
///
/// let images = extract_images("![ Final dish ](images/final dish.jpg)");
/// assert_eq!(images[0].description, "Final dish");
/// assert_eq!(images[0].path, "images/final dish.jpg");
/// ```
pub fn extract_images(text: &str) -> Vec<Image> {
    find_all(text, b'!', match_image)
}

fn match_image(text: &str, start: usize) -> Option<(Span, Image)> {
    let body_start = start + 2;
    if !text[start..].starts_with("![") {
        return None;
    }
    let line_end = memchr(b'\n', &text.as_bytes()[body_start..])
        .map_or(text.len(), |offset| body_start + offset);
    let line = &text[body_start..line_end];

    let split = memmem::find(line.as_bytes(), b"](")?;
    let path_start = split + 2;
    let close = memchr(b')', &line.as_bytes()[path_start..])?;

    Some((
        Span::new(start, body_start + path_start + close + 1),
        Image {
            description: line[..split].trim().to_string(),
            path: line[path_start..path_start + close].trim().to_string(),
        },
    ))
}
