//! Quantity and unit normalization for ingredient details.
//!
//! The text inside an ingredient's braces (`@flour{200g}`) is split into a
//! canonical quantity and an allow-listed unit. Numeric quantities are
//! reduced as exact fractions, so `2/4` becomes `1/2` and `4/2` becomes `2`.
//! Anything that does not start with digits is kept verbatim (`to taste`).

use std::fmt;
use std::str::FromStr;

use log::trace;
use thiserror::Error;

/// Units recognized in ingredient details, matched case-insensitively.
pub const UNITS: &[&str] = &[
    "g",
    "gram",
    "grams",
    "kg",
    "kilogram",
    "kilograms",
    "mg",
    "milligram",
    "milligrams",
    "lb",
    "pound",
    "pounds",
    "oz",
    "ounce",
    "ounces",
    "cup",
    "cups",
    "tbsp",
    "tablespoon",
    "tablespoons",
    "tsp",
    "teaspoon",
    "teaspoons",
    "ml",
    "milliliter",
    "milliliters",
    "millilitre",
    "millilitres",
    "l",
    "liter",
    "liters",
    "litre",
    "litres",
];

/// Check whether `token` is a recognized unit.
#[inline]
pub fn is_unit(token: &str) -> bool {
    UNITS.iter().any(|unit| unit.eq_ignore_ascii_case(token))
}

/// An exact non-negative rational number, always stored in lowest terms.
///
/// # Example
///
/// ```rust
/// use cookparse_core::quantity::Fraction;
///
/// let half: Fraction = "2/4".parse().unwrap();
/// assert_eq!(half.to_string(), "1/2");
/// assert_eq!("4/2".parse::<Fraction>().unwrap().to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: u64,
    denom: u64,
}

impl Fraction {
    /// Build a reduced fraction. Returns `None` for a zero denominator.
    pub fn new(numer: u64, denom: u64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let divisor = gcd(numer, denom);
        Some(Self {
            numer: numer / divisor,
            denom: denom / divisor,
        })
    }

    #[inline]
    pub fn numer(&self) -> u64 {
        self.numer
    }

    #[inline]
    pub fn denom(&self) -> u64 {
        self.denom
    }

    /// Whether the fraction reduces to a whole number.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Why a string could not be read as a [`Fraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FractionError {
    #[error("expected digits or digits/digits")]
    Malformed,
    #[error("number too large")]
    Overflow,
    #[error("zero denominator")]
    ZeroDenominator,
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numer, denom) = match s.split_once('/') {
            Some((numer, denom)) => (parse_digits(numer)?, parse_digits(denom)?),
            None => (parse_digits(s)?, 1),
        };
        Fraction::new(numer, denom).ok_or(FractionError::ZeroDenominator)
    }
}

fn parse_digits(s: &str) -> Result<u64, FractionError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FractionError::Malformed);
    }
    s.parse().map_err(|_| FractionError::Overflow)
}

/// Byte length of the ASCII digit run starting at `from`.
#[inline]
fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Split ingredient details into `(quantity, unit)`.
///
/// - `""` gives `(None, None)`.
/// - A numeric prefix (`3`, `1/2`) is reduced to canonical form; an
///   optional `%` or whitespace may separate it from a unit word, which is
///   kept only when it is in [`UNITS`].
/// - Details that are exactly a unit give `(None, Some(unit))`.
/// - Anything else is returned verbatim as the quantity.
///
/// ```rust
/// use cookparse_core::parse_quantity_unit;
///
/// assert_eq!(parse_quantity_unit("200g"), (Some("200".into()), Some("g".into())));
/// assert_eq!(parse_quantity_unit("3%cups"), (Some("3".into()), Some("cups".into())));
/// assert_eq!(parse_quantity_unit("2 pinches"), (Some("2".into()), None));
/// assert_eq!(parse_quantity_unit("to taste"), (Some("to taste".into()), None));
/// assert_eq!(parse_quantity_unit(""), (None, None));
/// ```
pub fn parse_quantity_unit(details: &str) -> (Option<String>, Option<String>) {
    let details = details.trim();
    if details.is_empty() {
        return (None, None);
    }

    let bytes = details.as_bytes();
    let mut end = digit_run(bytes, 0);
    if end == 0 {
        if is_unit(details) {
            return (None, Some(details.to_string()));
        }
        return (Some(details.to_string()), None);
    }

    if bytes.get(end) == Some(&b'/') {
        let denom_len = digit_run(bytes, end + 1);
        if denom_len > 0 {
            end += 1 + denom_len;
        }
    }

    let raw = &details[..end];
    let quantity = match raw.parse::<Fraction>() {
        Ok(fraction) => fraction.to_string(),
        Err(err) => {
            trace!("keeping quantity '{}' as written: {}", raw, err);
            raw.to_string()
        }
    };

    let rest = &details[end..];
    let rest = rest.strip_prefix('%').unwrap_or(rest).trim_start();
    let word_len = rest.bytes().take_while(|b| b.is_ascii_alphabetic()).count();
    let word = &rest[..word_len];

    let unit = if word.is_empty() {
        None
    } else if is_unit(word) {
        Some(word.to_string())
    } else {
        trace!("dropping unknown unit '{}' in '{}'", word, details);
        None
    };

    (Some(quantity), unit)
}
