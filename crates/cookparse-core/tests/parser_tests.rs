//! Integration tests for full recipe parsing

use cookparse_core::{
    parse, CommentKind, Ingredient, ParseErrorKind, Recipe, StepToken, Timer,
};

const BREAKFAST: &str = "
    -- This is a hearty breakfast recipe
    >> source: https://example.com
    >> time required: 1.5 hours
    Poke holes in @potatoes{2} with a fork.
    Place @bacon strips{500%g} on a baking sheet and glaze with @maple syrup{1/2%tbsp}.
    Slowly add @milk{1%litre}, keep mixing until smooth.
    Place the potatoes into a #pot and bring to a boil.
    If @Egg{} is Cooked, skip the next step.
    Boil @eggs{2} for ~3%minutes.
";

const BOLOGNESE: &str = "
    >> title: Spaghetti Bolognese
    >> servings: 4
    @spaghetti{200g}
    @ground beef{300g}
    #pan
    ~{10%minutes}
    This is a test recipe with an image ![A delicious dish](images/dish.jpg)
    Cook @spaghetti{200g} in boiling water for ~{10%minutes}.
    If @spaghetti{} is cooked, drain the water.
    Use @butter{50g} (or @margarine{50g}) for frying.
";

fn text(value: &str) -> StepToken {
    StepToken::Text(value.to_string())
}

fn ingredient(name: &str, quantity: Option<&str>, unit: Option<&str>) -> Ingredient {
    Ingredient::new(name, quantity.map(String::from), unit.map(String::from))
}

// ============================================================================
// Full Recipes
// ============================================================================

#[test]
fn test_breakfast_metadata_and_comments() {
    let recipe = parse(BREAKFAST).unwrap();
    assert_eq!(recipe.metadata.len(), 1);
    assert_eq!(recipe.metadata.get("source"), Some("https://example.com"));
    assert_eq!(recipe.comments.len(), 1);
    assert_eq!(recipe.comments[0].kind, CommentKind::Line);
    assert_eq!(recipe.comments[0].name, "This is a hearty breakfast recipe");
}

#[test]
fn test_breakfast_ingredients() {
    let recipe = parse(BREAKFAST).unwrap();
    assert_eq!(
        recipe.ingredients,
        vec![
            ingredient("Egg", None, None),
            ingredient("bacon strips", Some("500"), Some("g")),
            ingredient("eggs", Some("2"), None),
            ingredient("maple syrup", Some("1/2"), Some("tbsp")),
            ingredient("milk", Some("1"), Some("litre")),
            ingredient("potatoes", Some("2"), None),
        ]
    );
    assert_eq!(recipe.cookware, vec!["pot"]);
}

#[test]
fn test_breakfast_steps() {
    let recipe = parse(BREAKFAST).unwrap();
    assert_eq!(recipe.steps.len(), 6);
    assert_eq!(
        recipe.steps[2].tokens,
        vec![
            text("Slowly add"),
            StepToken::Ingredient(ingredient("milk", Some("1"), Some("litre"))),
            text(", keep mixing until smooth."),
        ]
    );
    assert_eq!(
        recipe.steps[4].tokens,
        vec![
            text("If"),
            StepToken::Ingredient(ingredient("Egg", None, None)),
            text("is Cooked, skip the next step."),
        ]
    );
    assert_eq!(
        recipe.steps[5].tokens,
        vec![
            text("Boil"),
            StepToken::Ingredient(ingredient("eggs", Some("2"), None)),
            text("for ~3%minutes."),
        ]
    );
}

#[test]
fn test_breakfast_conditions_and_timers() {
    let recipe = parse(BREAKFAST).unwrap();
    assert_eq!(recipe.conditions.len(), 1);
    assert_eq!(recipe.conditions[0].ingredient, "Egg");
    assert_eq!(recipe.conditions[0].condition, "Cooked");
    assert_eq!(recipe.conditions[0].action, "skip the next step");
    assert!(recipe.timers.is_empty());
    assert!(recipe.substitutions.is_empty());
    assert!(recipe.images.is_empty());
}

#[test]
fn test_bolognese() {
    let recipe = parse(BOLOGNESE).unwrap();

    let meta: Vec<_> = recipe.metadata.iter().collect();
    assert_eq!(meta, vec![("title", "Spaghetti Bolognese"), ("servings", "4")]);

    assert_eq!(
        recipe.ingredients,
        vec![
            ingredient("butter", Some("50"), Some("g")),
            ingredient("ground beef", Some("300"), Some("g")),
            ingredient("margarine", Some("50"), Some("g")),
            ingredient("spaghetti", Some("200"), Some("g")),
            ingredient("spaghetti", None, None),
        ]
    );
    assert_eq!(recipe.cookware, vec!["pan"]);
    assert_eq!(recipe.steps.len(), 8);
    assert_eq!(
        recipe.timers,
        vec![Timer::new("", "10%minutes"), Timer::new("", "10%minutes")]
    );

    assert_eq!(recipe.conditions.len(), 1);
    assert_eq!(recipe.conditions[0].action, "drain the water");

    assert_eq!(recipe.substitutions.len(), 1);
    assert_eq!(recipe.substitutions[0].primary.name, "butter");
    assert_eq!(recipe.substitutions[0].substitute.name, "margarine");

    assert_eq!(recipe.images.len(), 1);
    assert_eq!(recipe.images[0].description, "A delicious dish");
    assert_eq!(recipe.images[0].path, "images/dish.jpg");
    assert!(recipe.comments.is_empty());
}

#[test]
fn test_block_comment_removed_from_steps() {
    let input = "-- This is a comment\nSlowly add @milk{4%cup} [- TODO change units to litres -], keep mixing\nBoil @eggs{2} for ~eggs{3%minutes}.";
    let recipe = parse(input).unwrap();

    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[0].tokens.last(), Some(&text(", keep mixing")));
    assert_eq!(recipe.timers, vec![Timer::new("eggs", "3%minutes")]);

    let comments: Vec<_> = recipe.comments.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(comments, vec!["This is a comment", "TODO change units to litres"]);
}

#[test]
fn test_step_timers_include_anonymous_word_durations() {
    let recipe = parse("Rest ~{ten minutes}, then bake ~oven{20%minutes}.").unwrap();
    assert_eq!(recipe.timers, vec![Timer::new("oven", "20%minutes")]);
    let step_timers: Vec<_> = recipe.step_timers().cloned().collect();
    assert_eq!(
        step_timers,
        vec![Timer::new("", "ten minutes"), Timer::new("oven", "20%minutes")]
    );
}

#[test]
fn test_step_timer_with_spaced_name_matches_flat_timer() {
    let recipe = parse("Chill @dough{1} for ~ rest time {60%minutes}").unwrap();
    assert_eq!(recipe.timers, vec![Timer::new(" rest time ", "60%minutes")]);
    let step_timers: Vec<_> = recipe.step_timers().cloned().collect();
    assert_eq!(step_timers, vec![Timer::new("rest time", "60%minutes")]);
}

#[test]
fn test_ingredient_after_unbraced_tilde_stays_in_step() {
    let recipe = parse("Set a ~timer and add @salt{1%tsp}").unwrap();
    assert_eq!(recipe.ingredients, vec![ingredient("salt", Some("1"), Some("tsp"))]);
    assert_eq!(
        recipe.steps[0].tokens,
        vec![
            text("Set a ~timer and add"),
            StepToken::Ingredient(ingredient("salt", Some("1"), Some("tsp"))),
        ]
    );
    assert_eq!(recipe.step_timers().count(), 0);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_empty_input() {
    let recipe = parse("").unwrap();
    assert_eq!(recipe, Recipe::default());
}

#[test]
fn test_whitespace_only_input() {
    let recipe = parse("  \n\t\n   ").unwrap();
    assert!(recipe.steps.is_empty());
    assert!(recipe.metadata.is_empty());
}

#[test]
fn test_comment_only_input() {
    let recipe = parse("-- just a note\n[- and a block -]").unwrap();
    assert!(recipe.steps.is_empty());
    assert_eq!(recipe.comments.len(), 2);
}

#[test]
fn test_comment_markers_never_reach_steps() {
    let recipe = parse("Stir [- a\nb -] well\n  -- aside\nServe.").unwrap();
    for step in &recipe.steps {
        for token in &step.tokens {
            if let StepToken::Text(value) = token {
                assert!(!value.contains("[-"), "{value}");
                assert!(!value.trim_start().starts_with("--"), "{value}");
            }
        }
    }
}

#[test]
fn test_fatal_timer_aborts_parse() {
    let err = parse(">> servings: 2\nMix @flour{1%cup}.\nWait ~??? and serve.").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::InvalidTimerSyntax);
    assert_eq!(err.text, "~???");
    assert_eq!(err.line, 3);
}

#[test]
fn test_from_str() {
    let recipe: Recipe = "Chop @onion{1}.".parse().unwrap();
    assert_eq!(recipe.ingredients[0].name, "onion");
}

#[test]
fn test_unicode_recipe() {
    let recipe = parse("Ajouter @crème fraîche{200g} dans la #casserole.").unwrap();
    assert_eq!(recipe.ingredients[0].name, "crème fraîche");
    assert_eq!(recipe.cookware, vec!["casserole"]);
}
