//! Python bindings for the cookparse Cooklang parser.
//!
//! Results are plain Python dicts and lists, so they compare and serialize
//! like any other Python data.

use cookparse_core::{
    Comment, Condition, Image, Ingredient, Metadata, ParseError, Recipe, Step, StepToken,
    Substitution, Timer,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

fn to_py_err(err: ParseError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ============================================================================
// Conversions
// ============================================================================

fn metadata_dict<'py>(py: Python<'py>, metadata: &Metadata) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (key, value) in metadata.iter() {
        dict.set_item(key, value)?;
    }
    Ok(dict)
}

fn ingredient_dict<'py>(py: Python<'py>, ingredient: &Ingredient) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("name", &ingredient.name)?;
    dict.set_item("quantity", ingredient.quantity.as_deref())?;
    dict.set_item("unit", ingredient.unit.as_deref())?;
    Ok(dict)
}

fn ingredient_list<'py>(py: Python<'py>, ingredients: &[Ingredient]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for ingredient in ingredients {
        list.append(ingredient_dict(py, ingredient)?)?;
    }
    Ok(list)
}

fn token_dict<'py>(py: Python<'py>, token: &StepToken) -> PyResult<Bound<'py, PyDict>> {
    let dict = match token {
        StepToken::Ingredient(ingredient) => ingredient_dict(py, ingredient)?,
        _ => PyDict::new(py),
    };
    dict.set_item("type", token.type_name())?;
    match token {
        StepToken::Text(value) => dict.set_item("value", value)?,
        StepToken::Ingredient(_) => {}
        StepToken::Cookware(name) | StepToken::Note(name) => dict.set_item("name", name)?,
        StepToken::Timer(timer) => {
            dict.set_item("name", &timer.name)?;
            dict.set_item("duration", &timer.duration)?;
        }
    }
    Ok(dict)
}

fn step_list<'py>(py: Python<'py>, steps: &[Step]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for step in steps {
        let tokens = PyList::empty(py);
        for token in &step.tokens {
            tokens.append(token_dict(py, token)?)?;
        }
        list.append(tokens)?;
    }
    Ok(list)
}

fn timer_list<'py>(py: Python<'py>, timers: &[Timer]) -> PyResult<Bound<'py, PyList>> {
    PyList::new(
        py,
        timers
            .iter()
            .map(|timer| (timer.name.as_str(), timer.duration.as_str())),
    )
}

fn condition_list<'py>(py: Python<'py>, conditions: &[Condition]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for condition in conditions {
        let dict = PyDict::new(py);
        dict.set_item("ingredient", &condition.ingredient)?;
        dict.set_item("condition", &condition.condition)?;
        dict.set_item("action", &condition.action)?;
        list.append(dict)?;
    }
    Ok(list)
}

fn substitution_list<'py>(
    py: Python<'py>,
    substitutions: &[Substitution],
) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for substitution in substitutions {
        let dict = PyDict::new(py);
        dict.set_item("primary", ingredient_dict(py, &substitution.primary)?)?;
        dict.set_item("substitute", ingredient_dict(py, &substitution.substitute)?)?;
        list.append(dict)?;
    }
    Ok(list)
}

fn comment_list<'py>(py: Python<'py>, comments: &[Comment]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for comment in comments {
        let dict = PyDict::new(py);
        dict.set_item("type", "comment")?;
        dict.set_item("name", &comment.name)?;
        list.append(dict)?;
    }
    Ok(list)
}

fn image_list<'py>(py: Python<'py>, images: &[Image]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for image in images {
        let dict = PyDict::new(py);
        dict.set_item("description", &image.description)?;
        dict.set_item("path", &image.path)?;
        list.append(dict)?;
    }
    Ok(list)
}

fn recipe_dict<'py>(py: Python<'py>, recipe: &Recipe) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("metadata", metadata_dict(py, &recipe.metadata)?)?;
    dict.set_item("ingredients", ingredient_list(py, &recipe.ingredients)?)?;
    dict.set_item("cookware", PyList::new(py, &recipe.cookware)?)?;
    dict.set_item("steps", step_list(py, &recipe.steps)?)?;
    dict.set_item("timers", timer_list(py, &recipe.timers)?)?;
    dict.set_item("conditions", condition_list(py, &recipe.conditions)?)?;
    dict.set_item("substitutions", substitution_list(py, &recipe.substitutions)?)?;
    dict.set_item("comments", comment_list(py, &recipe.comments)?)?;
    dict.set_item("images", image_list(py, &recipe.images)?)?;
    Ok(dict)
}

// ============================================================================
// Parser
// ============================================================================

/// Cooklang recipe parser.
///
/// Every method takes recipe text and returns plain dicts and lists.
/// Methods that scan steps raise ValueError on malformed timer syntax.
#[pyclass(name = "CooklangParser")]
#[derive(Default)]
pub struct PyCooklangParser {}

#[pymethods]
impl PyCooklangParser {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Parse a full recipe into a dict with all nine categories.
    #[pyo3(text_signature = "(self, recipe_text)")]
    fn parse_recipe<'py>(&self, py: Python<'py>, recipe_text: &str) -> PyResult<Bound<'py, PyDict>> {
        let recipe = cookparse_core::parse(recipe_text).map_err(to_py_err)?;
        recipe_dict(py, &recipe)
    }

    fn remove_comments(&self, text: &str) -> String {
        cookparse_core::remove_comments(text)
    }

    fn extract_comments<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        comment_list(py, &cookparse_core::extract_comments(text))
    }

    fn extract_metadata<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyDict>> {
        metadata_dict(py, &cookparse_core::extract_metadata(text))
    }

    fn extract_ingredients<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        ingredient_list(py, &cookparse_core::extract_ingredients(text))
    }

    fn extract_cookware(&self, text: &str) -> Vec<String> {
        cookparse_core::extract_cookware(text)
    }

    fn extract_steps<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        let steps = cookparse_core::extract_steps(text).map_err(to_py_err)?;
        step_list(py, &steps)
    }

    fn extract_timers<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        timer_list(py, &cookparse_core::extract_timers(text))
    }

    fn extract_conditions<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        let conditions = cookparse_core::extract_conditions(text).map_err(to_py_err)?;
        condition_list(py, &conditions)
    }

    fn extract_ingredient_substitutions<'py>(
        &self,
        py: Python<'py>,
        text: &str,
    ) -> PyResult<Bound<'py, PyList>> {
        substitution_list(py, &cookparse_core::extract_substitutions(text))
    }

    fn extract_images<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        image_list(py, &cookparse_core::extract_images(text))
    }

    fn __repr__(&self) -> String {
        "CooklangParser()".to_string()
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Parse a full recipe.
///
/// Args:
///     recipe_text: Cooklang source
///
/// Returns:
///     dict: metadata, ingredients, cookware, steps, timers, conditions,
///     substitutions, comments and images
///
/// Raises:
///     ValueError: On malformed timer syntax
#[pyfunction]
#[pyo3(text_signature = "(recipe_text)")]
fn parse_recipe<'py>(py: Python<'py>, recipe_text: &str) -> PyResult<Bound<'py, PyDict>> {
    PyCooklangParser::new().parse_recipe(py, recipe_text)
}

/// Split ingredient details such as "200g" into (quantity, unit).
#[pyfunction]
#[pyo3(text_signature = "(details)")]
fn parse_quantity_unit(details: &str) -> (Option<String>, Option<String>) {
    cookparse_core::parse_quantity_unit(details)
}

// ============================================================================
// Module
// ============================================================================

/// Cooklang recipe parser.
#[pymodule]
fn cooklang_parser(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyCooklangParser>()?;
    m.add_function(wrap_pyfunction!(parse_recipe, m)?)?;
    m.add_function(wrap_pyfunction!(parse_quantity_unit, m)?)?;
    Ok(())
}
