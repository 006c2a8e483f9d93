//! Tests for quantity and unit normalization

use cookparse_core::quantity::{is_unit, FractionError, UNITS};
use cookparse_core::{parse_quantity_unit, Fraction};

fn split(details: &str) -> (Option<String>, Option<String>) {
    parse_quantity_unit(details)
}

fn qu(quantity: Option<&str>, unit: Option<&str>) -> (Option<String>, Option<String>) {
    (quantity.map(String::from), unit.map(String::from))
}

// ============================================================================
// Numeric Quantities
// ============================================================================

#[test]
fn test_integer_with_unit() {
    assert_eq!(split("200g"), qu(Some("200"), Some("g")));
}

#[test]
fn test_integer_without_unit() {
    assert_eq!(split("3"), qu(Some("3"), None));
}

#[test]
fn test_percent_separator() {
    assert_eq!(split("3%cups"), qu(Some("3"), Some("cups")));
    assert_eq!(split("1%tsp"), qu(Some("1"), Some("tsp")));
}

#[test]
fn test_space_separator() {
    assert_eq!(split("2 tbsp"), qu(Some("2"), Some("tbsp")));
}

#[test]
fn test_fraction_is_reduced() {
    assert_eq!(split("2/4 cup"), qu(Some("1/2"), Some("cup")));
    assert_eq!(split("1/2"), qu(Some("1/2"), None));
}

#[test]
fn test_fraction_with_attached_unit() {
    assert_eq!(split("2/4g"), qu(Some("1/2"), Some("g")));
}

#[test]
fn test_fraction_reducing_to_integer() {
    assert_eq!(split("4/2"), qu(Some("2"), None));
    assert_eq!(split("6/3kg"), qu(Some("2"), Some("kg")));
}

#[test]
fn test_zero_numerator() {
    assert_eq!(split("0/5"), qu(Some("0"), None));
}

#[test]
fn test_zero_denominator_kept_as_written() {
    assert_eq!(split("1/0"), qu(Some("1/0"), None));
}

#[test]
fn test_huge_number_kept_as_written() {
    let digits = "123456789012345678901234567890";
    assert_eq!(split(digits), qu(Some(digits), None));
}

#[test]
fn test_dangling_slash_is_ignored() {
    assert_eq!(split("1/"), qu(Some("1"), None));
}

#[test]
fn test_details_are_trimmed() {
    assert_eq!(split("  2  "), qu(Some("2"), None));
}

// ============================================================================
// Units
// ============================================================================

#[test]
fn test_unknown_unit_is_dropped() {
    assert_eq!(split("2 pinches"), qu(Some("2"), None));
    assert_eq!(split("5cloves"), qu(Some("5"), None));
    assert_eq!(split("3unknown"), qu(Some("3"), None));
}

#[test]
fn test_unit_matching_ignores_case() {
    assert_eq!(split("2 Cups"), qu(Some("2"), Some("Cups")));
    assert!(is_unit("TBSP"));
}

#[test]
fn test_bare_unit() {
    assert_eq!(split("cup"), qu(None, Some("cup")));
}

#[test]
fn test_every_listed_unit_is_recognized() {
    for unit in UNITS {
        assert_eq!(split(&format!("1{unit}")).1.as_deref(), Some(*unit), "unit {unit}");
    }
}

#[test]
fn test_british_spellings() {
    assert!(is_unit("litre"));
    assert!(is_unit("millilitres"));
}

// ============================================================================
// Non-numeric Details
// ============================================================================

#[test]
fn test_empty_details() {
    assert_eq!(split(""), qu(None, None));
    assert_eq!(split("   "), qu(None, None));
}

#[test]
fn test_free_text_is_kept_verbatim() {
    assert_eq!(split("to taste"), qu(Some("to taste"), None));
    assert_eq!(split("a handful"), qu(Some("a handful"), None));
}

// ============================================================================
// Fraction
// ============================================================================

#[test]
fn test_fraction_parse_and_display() {
    let fraction: Fraction = "10/4".parse().unwrap();
    assert_eq!(fraction.numer(), 5);
    assert_eq!(fraction.denom(), 2);
    assert_eq!(fraction.to_string(), "5/2");
    assert!(!fraction.is_integer());
}

#[test]
fn test_fraction_new_rejects_zero_denominator() {
    assert_eq!(Fraction::new(1, 0), None);
    assert_eq!(Fraction::new(3, 9), Fraction::new(1, 3));
}

#[test]
fn test_fraction_errors() {
    assert_eq!("1/0".parse::<Fraction>(), Err(FractionError::ZeroDenominator));
    assert_eq!("abc".parse::<Fraction>(), Err(FractionError::Malformed));
    assert_eq!("1/".parse::<Fraction>(), Err(FractionError::Malformed));
    assert_eq!(
        "99999999999999999999999".parse::<Fraction>(),
        Err(FractionError::Overflow)
    );
}
