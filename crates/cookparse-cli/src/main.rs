//! cookparse CLI - Parse, validate, and inspect Cooklang recipes
//!
//! Usage:
//!   cookparse [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   parse     Parse and display the recipe (default)
//!   validate  Check the recipe for errors
//!   stats     Show recipe statistics

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cookparse_core::{
    parse, Comment, Condition, Image, Ingredient, Metadata, Recipe, StepToken, Substitution,
};
use log::debug;
use serde::{Serialize, Serializer};

#[derive(Parser, Debug)]
#[command(
    name = "cookparse",
    version,
    about = "Cooklang recipe parser and validator",
    after_help = "EXAMPLES:\n    cookparse recipe.cook           Parse a recipe\n    cookparse -v recipe.cook        Parse with token-level output\n    cookparse -j recipe.cook        Output the recipe as JSON\n    cookparse validate recipe.cook  Validate without output\n    cookparse stats recipe.cook     Show recipe statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Recipe file to parse when no command is given
    file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Show every step token and enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and display the recipe (default)
    Parse { file: PathBuf },
    /// Check the recipe for errors without printing it
    Validate { file: PathBuf },
    /// Show recipe statistics
    Stats { file: PathBuf },
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match (cli.command, cli.file) {
        (Some(Command::Parse { file }), _) | (None, Some(file)) => {
            cmd_parse(&file, format, cli.verbose)
        }
        (Some(Command::Validate { file }), _) => cmd_validate(&file, format),
        (Some(Command::Stats { file }), _) => cmd_stats(&file),
        (None, None) => bail!("no input file specified (see --help)"),
    }
}

fn read_input(path: &Path) -> Result<String> {
    debug!("reading {}", path.display());
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(path: &Path, format: OutputFormat, verbose: bool) -> Result<()> {
    let input = read_input(path)?;
    let recipe = parse(&input).with_context(|| format!("failed to parse '{}'", path.display()))?;

    match format {
        OutputFormat::Json => print_json(&recipe)?,
        OutputFormat::Text => {
            if verbose {
                print_recipe_verbose(&recipe);
            } else {
                print_recipe_summary(&recipe);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(path: &Path, format: OutputFormat) -> Result<()> {
    let input = read_input(path)?;

    match parse(&input) {
        Ok(_) => {
            match format {
                OutputFormat::Json => println!(r#"{{"valid": true, "errors": []}}"#),
                OutputFormat::Text => println!("Valid: no errors found"),
            }
            Ok(())
        }
        Err(err) => {
            match format {
                OutputFormat::Json => {
                    let report = serde_json::json!({
                        "valid": false,
                        "errors": [{
                            "kind": format!("{:?}", err.kind()),
                            "message": err.to_string(),
                            "text": err.text,
                            "line": err.line,
                        }],
                    });
                    println!("{}", report);
                }
                OutputFormat::Text => {
                    eprintln!("Invalid: 1 error found");
                    eprintln!("  - {}", err);
                }
            }
            bail!("'{}' is not a valid recipe", path.display())
        }
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(path: &Path) -> Result<()> {
    let input = read_input(path)?;
    let recipe = parse(&input).with_context(|| format!("failed to parse '{}'", path.display()))?;
    let stats = RecipeStats::from_recipe(&recipe, &input);

    println!("Recipe Statistics");
    println!("-----------------");
    println!("Metadata:       {}", recipe.metadata.len());
    println!();
    println!("Content:");
    println!("  Steps:          {}", stats.steps);
    println!("  Ingredients:    {}", recipe.ingredients.len());
    println!("  Cookware:       {}", recipe.cookware.len());
    println!("  Timers:         {}", recipe.timers.len());
    println!("  Step timers:    {}", stats.step_timers);
    println!("  Notes:          {}", stats.notes);
    println!("  Conditions:     {}", recipe.conditions.len());
    println!("  Substitutions:  {}", recipe.substitutions.len());
    println!("  Comments:       {}", recipe.comments.len());
    println!("  Images:         {}", recipe.images.len());
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

struct RecipeStats {
    steps: usize,
    step_timers: usize,
    notes: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl RecipeStats {
    fn from_recipe(recipe: &Recipe, input: &str) -> Self {
        let notes = recipe
            .steps
            .iter()
            .flat_map(|step| &step.tokens)
            .filter(|token| matches!(token, StepToken::Note(_)))
            .count();

        Self {
            steps: recipe.steps.len(),
            step_timers: recipe.step_timers().count(),
            notes,
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonRecipe<'a> {
    metadata: JsonMetadata<'a>,
    ingredients: Vec<JsonIngredient<'a>>,
    cookware: &'a [String],
    steps: Vec<Vec<JsonToken<'a>>>,
    timers: Vec<(&'a str, &'a str)>,
    conditions: Vec<JsonCondition<'a>>,
    substitutions: Vec<JsonSubstitution<'a>>,
    comments: Vec<JsonComment<'a>>,
    images: Vec<JsonImage<'a>>,
}

/// Metadata as a JSON object in insertion order.
struct JsonMetadata<'a>(&'a Metadata);

impl Serialize for JsonMetadata<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

#[derive(Serialize)]
struct JsonIngredient<'a> {
    name: &'a str,
    quantity: Option<&'a str>,
    unit: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonToken<'a> {
    Text {
        value: &'a str,
    },
    Ingredient {
        name: &'a str,
        quantity: Option<&'a str>,
        unit: Option<&'a str>,
    },
    Cookware {
        name: &'a str,
    },
    Timer {
        name: &'a str,
        duration: &'a str,
    },
    Note {
        name: &'a str,
    },
}

#[derive(Serialize)]
struct JsonCondition<'a> {
    ingredient: &'a str,
    condition: &'a str,
    action: &'a str,
}

#[derive(Serialize)]
struct JsonSubstitution<'a> {
    primary: JsonIngredient<'a>,
    substitute: JsonIngredient<'a>,
}

#[derive(Serialize)]
struct JsonComment<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Serialize)]
struct JsonImage<'a> {
    description: &'a str,
    path: &'a str,
}

fn print_json(recipe: &Recipe) -> Result<()> {
    let json = serde_json::to_string_pretty(&convert_recipe(recipe))
        .context("failed to serialize recipe")?;
    println!("{}", json);
    Ok(())
}

fn convert_recipe(recipe: &Recipe) -> JsonRecipe<'_> {
    JsonRecipe {
        metadata: JsonMetadata(&recipe.metadata),
        ingredients: recipe.ingredients.iter().map(convert_ingredient).collect(),
        cookware: &recipe.cookware,
        steps: recipe
            .steps
            .iter()
            .map(|step| step.tokens.iter().map(convert_token).collect())
            .collect(),
        timers: recipe
            .timers
            .iter()
            .map(|t| (t.name.as_str(), t.duration.as_str()))
            .collect(),
        conditions: recipe.conditions.iter().map(convert_condition).collect(),
        substitutions: recipe
            .substitutions
            .iter()
            .map(convert_substitution)
            .collect(),
        comments: recipe.comments.iter().map(convert_comment).collect(),
        images: recipe.images.iter().map(convert_image).collect(),
    }
}

fn convert_ingredient(ingredient: &Ingredient) -> JsonIngredient<'_> {
    JsonIngredient {
        name: &ingredient.name,
        quantity: ingredient.quantity.as_deref(),
        unit: ingredient.unit.as_deref(),
    }
}

fn convert_token(token: &StepToken) -> JsonToken<'_> {
    match token {
        StepToken::Text(value) => JsonToken::Text { value },
        StepToken::Ingredient(i) => JsonToken::Ingredient {
            name: &i.name,
            quantity: i.quantity.as_deref(),
            unit: i.unit.as_deref(),
        },
        StepToken::Cookware(name) => JsonToken::Cookware { name },
        StepToken::Timer(t) => JsonToken::Timer {
            name: &t.name,
            duration: &t.duration,
        },
        StepToken::Note(name) => JsonToken::Note { name },
    }
}

fn convert_condition(condition: &Condition) -> JsonCondition<'_> {
    JsonCondition {
        ingredient: &condition.ingredient,
        condition: &condition.condition,
        action: &condition.action,
    }
}

fn convert_substitution(substitution: &Substitution) -> JsonSubstitution<'_> {
    JsonSubstitution {
        primary: convert_ingredient(&substitution.primary),
        substitute: convert_ingredient(&substitution.substitute),
    }
}

fn convert_comment(comment: &Comment) -> JsonComment<'_> {
    JsonComment {
        kind: "comment",
        name: &comment.name,
    }
}

fn convert_image(image: &Image) -> JsonImage<'_> {
    JsonImage {
        description: &image.description,
        path: &image.path,
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_recipe_summary(recipe: &Recipe) {
    if !recipe.metadata.is_empty() {
        println!("Metadata: {} entries", recipe.metadata.len());
        for (key, value) in recipe.metadata.iter() {
            println!("  {}: {}", key, value);
        }
    }

    println!("Ingredients: {}", recipe.ingredients.len());
    for ingredient in &recipe.ingredients {
        println!("  - {}", format_ingredient(ingredient));
    }

    if !recipe.cookware.is_empty() {
        println!("Cookware: {}", recipe.cookware.join(", "));
    }

    println!("Steps: {}", recipe.steps.len());
    for (i, step) in recipe.steps.iter().enumerate() {
        let words: Vec<_> = step.tokens.iter().map(|t| t.display_text()).collect();
        println!("  [{}] {}", i + 1, words.join(" "));
    }

    if !recipe.timers.is_empty() {
        println!("Timers: {}", recipe.timers.len());
        for timer in &recipe.timers {
            println!("  - {} ({})", display_name(&timer.name), timer.duration);
        }
    }

    for condition in &recipe.conditions {
        println!(
            "If {} is {}: {}",
            condition.ingredient, condition.condition, condition.action
        );
    }

    for substitution in &recipe.substitutions {
        println!(
            "Substitute {} with {}",
            format_ingredient(&substitution.primary),
            format_ingredient(&substitution.substitute)
        );
    }

    for image in &recipe.images {
        println!("Image: {} ({})", image.path, image.description);
    }

    if !recipe.comments.is_empty() {
        println!("Comments: {}", recipe.comments.len());
    }
}

fn print_recipe_verbose(recipe: &Recipe) {
    println!("=== Cooklang Recipe ===");
    println!();

    if !recipe.metadata.is_empty() {
        println!("--- Metadata ---");
        for (key, value) in recipe.metadata.iter() {
            println!("  {}: {}", key, value);
        }
        println!();
    }

    println!("--- Steps ---");
    for (i, step) in recipe.steps.iter().enumerate() {
        println!();
        println!("[{}] {} tokens", i + 1, step.tokens.len());
        for token in &step.tokens {
            println!("  {}", describe_token(token));
        }
    }

    if !recipe.comments.is_empty() {
        println!();
        println!("--- Comments ---");
        for comment in &recipe.comments {
            println!("  {:?}: {}", comment.kind, comment.name.replace('\n', "\\n"));
        }
    }
}

fn describe_token(token: &StepToken) -> String {
    match token {
        StepToken::Text(value) => format!("Text {:?}", value),
        StepToken::Ingredient(i) => format!("Ingredient {}", format_ingredient(i)),
        StepToken::Cookware(name) => format!("Cookware {}", name),
        StepToken::Timer(t) => format!("Timer {} ({})", display_name(&t.name), t.duration),
        StepToken::Note(name) => format!("Note {}", name),
    }
}

fn format_ingredient(ingredient: &Ingredient) -> String {
    match (&ingredient.quantity, &ingredient.unit) {
        (Some(q), Some(u)) => format!("{} ({} {})", ingredient.name, q, u),
        (Some(q), None) => format!("{} ({})", ingredient.name, q),
        (None, Some(u)) => format!("{} ({})", ingredient.name, u),
        (None, None) => ingredient.name.clone(),
    }
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "(anonymous)"
    } else {
        name
    }
}
