use crate::units::catalog::UnitCatalog;
use crate::units::error::UnitError;
use crate::units::types::{Dimension, Quantity, UnitValueMap};

/// Round to 2 decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts quantities between units of one dimension, pivoting through
/// the dimension's base unit
#[derive(Debug, Clone, Copy)]
pub struct QuantityConverter<'a> {
    catalog: &'a UnitCatalog,
}

impl Default for QuantityConverter<'static> {
    fn default() -> Self {
        Self::new(UnitCatalog::standard())
    }
}

impl<'a> QuantityConverter<'a> {
    pub fn new(catalog: &'a UnitCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a UnitCatalog {
        self.catalog
    }

    /// Convert `amount` from one unit to another.
    ///
    /// A zero amount, an empty code, or identical codes return `amount`
    /// untouched. A code missing from the dimension's catalog yields NaN;
    /// use [`QuantityConverter::try_convert`] to get an error instead.
    pub fn convert(&self, amount: f64, from: &str, to: &str, dimension: Dimension) -> f64 {
        match self.try_convert(amount, from, to, dimension) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Conversion of {} {} to {} failed: {}", amount, from, to, e);
                f64::NAN
            }
        }
    }

    /// Same contract as [`QuantityConverter::convert`], but unknown codes are
    /// reported as [`UnitError::UnknownUnit`]
    pub fn try_convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        dimension: Dimension,
    ) -> Result<f64, UnitError> {
        if amount == 0.0 || from.is_empty() || to.is_empty() || from == to {
            return Ok(amount);
        }

        let from_factor = self.factor(from, dimension)?;
        let to_factor = self.factor(to, dimension)?;

        Ok(round2(amount * from_factor / to_factor))
    }

    /// Convert a [`Quantity`] into `to`; unset amount or unit pass through
    pub fn convert_quantity(
        &self,
        quantity: &Quantity,
        to: &str,
        dimension: Dimension,
    ) -> Result<Quantity, UnitError> {
        match (quantity.amount, quantity.unit.as_deref()) {
            (Some(amount), Some(from)) if !from.is_empty() => Ok(Quantity::new(
                self.try_convert(amount, from, to, dimension)?,
                to,
            )),
            _ => Ok(quantity.clone()),
        }
    }

    /// The quantity expressed in every unit of `dimension`, in catalog order.
    /// Empty when the amount is unset or zero, or the unit is unset.
    pub fn calculate_all_units(&self, quantity: &Quantity, dimension: Dimension) -> UnitValueMap {
        let mut values = UnitValueMap::new();

        let (amount, from) = match quantity.parts() {
            Some(parts) => parts,
            None => return values,
        };

        for unit in self.catalog.units(dimension) {
            values.push(unit.code, self.convert(amount, from, unit.code, dimension));
        }

        values
    }

    fn factor(&self, code: &str, dimension: Dimension) -> Result<f64, UnitError> {
        self.catalog
            .factor(code, dimension)
            .ok_or_else(|| UnitError::UnknownUnit {
                code: code.to_string(),
                dimension,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn converter() -> QuantityConverter<'static> {
        QuantityConverter::default()
    }

    #[rstest]
    #[case(16.0, "tbsp", "cup", Dimension::Volume, 1.0)]
    #[case(1.0, "cup", "ml", Dimension::Volume, 236.59)]
    #[case(1000.0, "g", "kg", Dimension::Weight, 1.0)]
    #[case(3.0, "tsp", "tbsp", Dimension::Volume, 1.0)]
    #[case(1.0, "gallon", "quart", Dimension::Volume, 4.0)]
    #[case(1.0, "l", "ml", Dimension::Volume, 1000.0)]
    #[case(1.0, "lb", "oz", Dimension::Weight, 16.0)]
    #[case(1.0, "kg", "lb", Dimension::Weight, 2.2)]
    fn test_concrete_conversions(
        #[case] amount: f64,
        #[case] from: &str,
        #[case] to: &str,
        #[case] dim: Dimension,
        #[case] expected: f64,
    ) {
        assert_eq!(converter().convert(amount, from, to, dim), expected);
    }

    #[test]
    fn test_passthrough_cases() {
        let c = converter();
        assert_eq!(c.convert(2.5, "cup", "cup", Dimension::Volume), 2.5);
        // Identity skips rounding
        assert_eq!(c.convert(1.234, "g", "g", Dimension::Weight), 1.234);
        assert_eq!(c.convert(0.0, "cup", "ml", Dimension::Volume), 0.0);
        assert_eq!(c.convert(3.0, "", "ml", Dimension::Volume), 3.0);
        assert_eq!(c.convert(3.0, "cup", "", Dimension::Volume), 3.0);
        // Pass-through happens before lookup, so unknown codes are fine here
        assert_eq!(c.try_convert(0.0, "bogus", "ml", Dimension::Volume), Ok(0.0));
    }

    #[test]
    fn test_unknown_unit() {
        let c = converter();
        assert!(c.convert(1.0, "cup", "furlong", Dimension::Volume).is_nan());
        // Known code, wrong dimension
        assert!(c.convert(1.0, "g", "cup", Dimension::Volume).is_nan());

        assert_eq!(
            c.try_convert(1.0, "cup", "g", Dimension::Volume),
            Err(UnitError::UnknownUnit {
                code: "g".to_string(),
                dimension: Dimension::Volume,
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let c = converter();

        // Each leg rounds to 2 dp, so going back from a larger unit scales the
        // first rounding error by the factor ratio. Into a smaller or equal
        // unit the round trip stays within 0.01.
        for dim in [Dimension::Volume, Dimension::Weight] {
            let units = c.catalog().units(dim);
            for source in units {
                for target in units {
                    for q in [0.75, 7.0, 250.0] {
                        let there = c.convert(q, source.code, target.code, dim);
                        let back = c.convert(there, target.code, source.code, dim);
                        let ratio = target.factor_to_base / source.factor_to_base;
                        let bound = 0.005 * ratio.max(1.0) + 0.005;
                        assert!(
                            (back - q).abs() <= bound + 1e-9,
                            "{} {} -> {} {} -> {} {}",
                            q,
                            source.code,
                            there,
                            target.code,
                            back,
                            source.code
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_calculate_all_units() {
        let c = converter();
        let values = c.calculate_all_units(&Quantity::new(0.5, "cup"), Dimension::Volume);

        assert_eq!(values.len(), 9);
        assert_eq!(values.get("tsp"), Some(24.0));
        assert_eq!(values.get("tbsp"), Some(8.0));
        assert_eq!(values.get("fl_oz"), Some(4.0));
        assert_eq!(values.get("cup"), Some(0.5));
        assert_eq!(values.get("ml"), Some(118.29));

        let codes: Vec<_> = values.iter().map(|(code, _)| code).collect();
        assert_eq!(codes[0], "tsp");
        assert_eq!(codes[8], "l");
    }

    #[test]
    fn test_calculate_all_units_unset() {
        let c = converter();
        let no_unit = Quantity {
            amount: Some(2.0),
            unit: None,
        };
        let no_amount = Quantity {
            amount: None,
            unit: Some("cup".to_string()),
        };
        assert!(c.calculate_all_units(&no_unit, Dimension::Volume).is_empty());
        assert!(c.calculate_all_units(&no_amount, Dimension::Volume).is_empty());
    }

    #[test]
    fn test_calculate_all_units_zero_amount() {
        let c = converter();
        let zero = Quantity::new(0.0, "cup");
        assert!(c.calculate_all_units(&zero, Dimension::Volume).is_empty());
    }

    #[test]
    fn test_unit_value_map_serializes_in_catalog_order() {
        let c = converter();
        let values = c.calculate_all_units(&Quantity::new(1.0, "kg"), Dimension::Weight);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"g":1000.0,"kg":1.0,"oz":35.27,"lb":2.2}"#);
    }

    #[test]
    fn test_convert_quantity() {
        let c = converter();
        let q = c
            .convert_quantity(&Quantity::new(2.0, "cup"), "pint", Dimension::Volume)
            .unwrap();
        assert_eq!(q, Quantity::new(1.0, "pint"));

        // Zero still changes unit: the target is an explicit choice
        let zero = c
            .convert_quantity(&Quantity::new(0.0, "cup"), "ml", Dimension::Volume)
            .unwrap();
        assert_eq!(zero, Quantity::new(0.0, "ml"));

        let unset = Quantity::default();
        assert_eq!(
            c.convert_quantity(&unset, "pint", Dimension::Volume).unwrap(),
            unset
        );
    }
}
