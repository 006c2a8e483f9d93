//! # cookparse core
//!
//! A parser for the Cooklang recipe markup language.
//!
//! Recipes are plain text in which ingredients (`@flour{200g}`), cookware
//! (`#pan`, `#frying pan{}`), timers (`~{10%minutes}`) and notes
//! (`+gently{}`) are annotated inline. [`parse`] turns a recipe into a
//! [`Recipe`] holding metadata, ingredients, cookware, steps, timers,
//! conditions, substitutions, comments and images.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookparse_core::{parse, StepToken};
//!
//! let input = ">> servings: 4\nMix @flour{200g} with water in a #bowl for ~{2%minutes}.";
//! let recipe = parse(input).unwrap();
//!
//! assert_eq!(recipe.ingredients[0].quantity.as_deref(), Some("200"));
//! assert_eq!(recipe.ingredients[0].unit.as_deref(), Some("g"));
//! assert!(matches!(recipe.steps[0].tokens[0], StepToken::Text(_)));
//! ```
//!
//! ## Errors
//!
//! Malformed annotations are read as plain text, with one exception: a
//! `~` that opens a word but cannot start a timer name or duration.
//!
//! ```rust
//! use cookparse_core::{parse, ParseErrorKind};
//!
//! let err = parse("Wait ~{10 minutes").unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::InvalidTimerSyntax);
//! assert_eq!(err.to_string(), "invalid timer syntax '~{10' on line 1");
//! ```
//!
//! ## Extractors
//!
//! Each category can also be extracted on its own: [`extract_metadata`],
//! [`extract_ingredients`], [`extract_cookware`], [`extract_steps`],
//! [`extract_timers`], [`extract_conditions`], [`extract_substitutions`],
//! [`extract_images`] and [`extract_comments`]. Apart from
//! [`extract_comments`] they expect text already passed through
//! [`remove_comments`].

pub mod ast;
pub mod comment;
pub mod error;
pub mod extract;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod quantity;
pub mod span;

pub use ast::{
    Comment, CommentKind, Condition, Image, Ingredient, Metadata, Recipe, Step, StepToken,
    Substitution, Timer,
};
pub use comment::{extract_comments, remove_comments};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use extract::{
    extract_conditions, extract_cookware, extract_images, extract_ingredients, extract_metadata,
    extract_steps, extract_substitutions, extract_timers,
};
pub use inline::{parse_annotation, scan_line};
pub use parser::parse;
pub use quantity::{parse_quantity_unit, Fraction};
