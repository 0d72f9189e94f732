use crate::units::catalog::UnitCatalog;
use crate::units::error::UnitError;
use crate::units::types::{Dimension, Quantity};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Amount followed by a unit word
    /// Amount forms: "2", "1.5", ".5", "3/4", "1 1/2"
    /// Examples: "2 cups", "1 1/2 tbsp", "250g", "3/4 fl oz"
    static ref QUANTITY_PATTERN: Regex = Regex::new(
        r"^(?P<amount>\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?|\.\d+)\s*(?P<unit>[A-Za-z][A-Za-z_. ]*)$"
    )
    .unwrap();
}

/// Check if a string looks like "<amount> <unit>" without resolving the unit
pub fn looks_like_quantity(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }

    QUANTITY_PATTERN.is_match(trimmed)
}

/// Parse free text such as "1 1/2 cups" into a quantity with a canonical unit code
pub fn parse_quantity(
    catalog: &UnitCatalog,
    input: &str,
) -> Result<(Quantity, Dimension), UnitError> {
    let trimmed = input.trim();
    let captures = QUANTITY_PATTERN
        .captures(trimmed)
        .ok_or_else(|| UnitError::Parse(format!("Not a quantity: '{}'", trimmed)))?;

    let amount = parse_amount(&captures["amount"])?;
    let unit_text = captures["unit"].trim();

    let (unit, dimension) = catalog
        .resolve(unit_text)
        .ok_or_else(|| UnitError::Parse(format!("Unknown unit '{}'", unit_text)))?;

    Ok((Quantity::new(amount, unit.code), dimension))
}

fn parse_amount(text: &str) -> Result<f64, UnitError> {
    let mut parts = text.split_whitespace();
    let (whole, fraction) = match (parts.next(), parts.next()) {
        (Some(whole), Some(fraction)) => (Some(whole), fraction),
        (Some(single), None) => (None, single),
        _ => return Err(UnitError::Parse(format!("Invalid amount '{}'", text))),
    };

    let mut amount = match whole {
        Some(w) => parse_number(w)?,
        None => 0.0,
    };

    amount += match fraction.split_once('/') {
        Some((num, den)) => {
            let den = parse_number(den)?;
            if den == 0.0 {
                return Err(UnitError::Parse(format!("Zero denominator in '{}'", text)));
            }
            parse_number(num)? / den
        }
        None => parse_number(fraction)?,
    };

    Ok(amount)
}

fn parse_number(text: &str) -> Result<f64, UnitError> {
    text.parse::<f64>()
        .map_err(|e| UnitError::Parse(format!("Invalid number '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_quantity_detection() {
        assert!(looks_like_quantity("2 cups"));
        assert!(looks_like_quantity("1.5 tbsp"));
        assert!(looks_like_quantity("1 1/2 cups"));
        assert!(looks_like_quantity("250g"));
        assert!(looks_like_quantity("3/4 fl oz"));

        assert!(!looks_like_quantity("2"));
        assert!(!looks_like_quantity("cups"));
        assert!(!looks_like_quantity("a pinch of salt"));
        assert!(!looks_like_quantity(""));
    }

    #[rstest]
    #[case("2 cups", 2.0, "cup", Dimension::Volume)]
    #[case("1 1/2 tbsp", 1.5, "tbsp", Dimension::Volume)]
    #[case("3/4 fl oz", 0.75, "fl_oz", Dimension::Volume)]
    #[case(".5 L", 0.5, "l", Dimension::Volume)]
    #[case("250g", 250.0, "g", Dimension::Weight)]
    #[case("  2 lbs ", 2.0, "lb", Dimension::Weight)]
    #[case("1 T", 1.0, "tbsp", Dimension::Volume)]
    fn test_parse_quantity(
        #[case] input: &str,
        #[case] amount: f64,
        #[case] code: &str,
        #[case] dim: Dimension,
    ) {
        let (quantity, dimension) = parse_quantity(UnitCatalog::standard(), input).unwrap();
        assert_eq!(quantity, Quantity::new(amount, code));
        assert_eq!(dimension, dim);
    }

    #[test]
    fn test_parse_quantity_errors() {
        let catalog = UnitCatalog::standard();
        assert!(matches!(
            parse_quantity(catalog, "2 handfuls"),
            Err(UnitError::Parse(_))
        ));
        assert!(matches!(
            parse_quantity(catalog, "1/0 cup"),
            Err(UnitError::Parse(_))
        ));
        assert!(matches!(
            parse_quantity(catalog, "some flour"),
            Err(UnitError::Parse(_))
        ));
    }
}
