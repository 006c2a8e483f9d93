//! Recipe assembly.
//!
//! Comments are pulled from the raw input first, then stripped; every other
//! extractor runs on the comment-free text.

use std::str::FromStr;

use log::debug;

use crate::ast::Recipe;
use crate::comment::{extract_comments, remove_comments};
use crate::error::{ParseError, ParseResult};
use crate::extract::{
    extract_conditions, extract_cookware, extract_images, extract_ingredients, extract_metadata,
    extract_steps, extract_substitutions, extract_timers,
};

/// Parse a complete recipe.
///
/// # Errors
///
/// Fails only with [`crate::ParseErrorKind::InvalidTimerSyntax`], when a
/// step or condition action holds a `~` that is not a valid timer.
///
/// ```rust
/// let recipe = cookparse_core::parse(">> servings: 2\nCrack @eggs{2} into a #bowl.").unwrap();
/// assert_eq!(recipe.metadata.get("servings"), Some("2"));
/// assert_eq!(recipe.ingredients[0].name, "eggs");
/// assert_eq!(recipe.cookware, ["bowl"]);
/// assert_eq!(recipe.steps.len(), 1);
/// ```
pub fn parse(input: &str) -> ParseResult<Recipe> {
    let comments = extract_comments(input);
    let text = remove_comments(input);

    let recipe = Recipe {
        metadata: extract_metadata(&text),
        ingredients: extract_ingredients(&text),
        cookware: extract_cookware(&text),
        steps: extract_steps(&text)?,
        timers: extract_timers(&text),
        conditions: extract_conditions(&text)?,
        substitutions: extract_substitutions(&text),
        comments,
        images: extract_images(&text),
    };

    debug!(
        "parsed recipe: {} ingredients, {} cookware, {} steps, {} timers, {} comments",
        recipe.ingredients.len(),
        recipe.cookware.len(),
        recipe.steps.len(),
        recipe.timers.len(),
        recipe.comments.len(),
    );

    Ok(recipe)
}

impl FromStr for Recipe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
