//! Data model for parsed recipes.
//!
//! A [`Recipe`] bundles the results of every document-level extractor.
//! All nine collections are always present, possibly empty.

use std::borrow::Cow;

/// A parsed Cooklang recipe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    /// `>> key: value` lines, in first-seen key order.
    pub metadata: Metadata,
    /// Ingredient mentions, sorted by name.
    pub ingredients: Vec<Ingredient>,
    /// Unique cookware names, sorted.
    pub cookware: Vec<String>,
    /// One entry per non-empty, non-metadata line.
    pub steps: Vec<Step>,
    /// Timers with a numeric duration, from the document-wide scan.
    pub timers: Vec<Timer>,
    pub conditions: Vec<Condition>,
    pub substitutions: Vec<Substitution>,
    /// Line comments first, then block comments.
    pub comments: Vec<Comment>,
    pub images: Vec<Image>,
}

impl Recipe {
    /// Timers as they appear inside steps.
    ///
    /// Unlike [`Recipe::timers`], these include anonymous timers and
    /// durations that are not numeric (`~{ten minutes}`).
    pub fn step_timers(&self) -> impl Iterator<Item = &Timer> {
        self.steps.iter().flat_map(|step| {
            step.tokens.iter().filter_map(|token| match token {
                StepToken::Timer(timer) => Some(timer),
                _ => None,
            })
        })
    }
}

/// Recipe metadata: ordered key-value pairs with unique keys.
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An ingredient mention.
///
/// Bare mentions (`@salt`) carry neither quantity nor unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: Option<String>,
        unit: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
        }
    }

    /// An ingredient with no quantity or unit.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, None)
    }
}

/// A timer annotation. Anonymous timers have an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timer {
    pub name: String,
    pub duration: String,
}

impl Timer {
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
        }
    }
}

/// One line of recipe instructions, split into text and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    pub tokens: Vec<StepToken>,
}

/// A piece of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepToken {
    /// Plain text between annotations, trimmed and never empty.
    Text(String),
    Ingredient(Ingredient),
    Cookware(String),
    Timer(Timer),
    Note(String),
}

impl StepToken {
    /// The text this token reads as in running prose.
    ///
    /// Annotations flatten to their name, timers to their duration with
    /// `%` read as a space (`3%minutes` becomes `3 minutes`).
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            StepToken::Text(value) => Cow::Borrowed(value),
            StepToken::Ingredient(ingredient) => Cow::Borrowed(&ingredient.name),
            StepToken::Cookware(name) | StepToken::Note(name) => Cow::Borrowed(name),
            StepToken::Timer(timer) => Cow::Owned(timer.duration.replace('%', " ")),
        }
    }

    /// Lowercase tag used by serializers (`text`, `ingredient`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            StepToken::Text(_) => "text",
            StepToken::Ingredient(_) => "ingredient",
            StepToken::Cookware(_) => "cookware",
            StepToken::Timer(_) => "timer",
            StepToken::Note(_) => "note",
        }
    }
}

/// `If @ingredient{} is <condition>, <action>.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub ingredient: String,
    pub condition: String,
    /// The action with its annotations flattened to plain words.
    pub action: String,
}

/// `@primary{qty} (or @substitute{qty})`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub primary: Ingredient,
    pub substitute: Ingredient,
}

/// Whether a comment came from a `--` line or a `[- ... -]` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Comment body, trimmed.
    pub name: String,
}

/// `![description](path)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub description: String,
    pub path: String,
}
