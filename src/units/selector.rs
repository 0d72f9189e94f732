use crate::units::converter::{round2, QuantityConverter};
use crate::units::types::{Dimension, Quantity};

/// Picks the unit that makes a quantity easiest to read: the one whose value
/// is closest to 1 without dropping below it
#[derive(Debug, Clone, Copy)]
pub struct OptimalUnitSelector<'a> {
    converter: QuantityConverter<'a>,
}

impl Default for OptimalUnitSelector<'static> {
    fn default() -> Self {
        Self::new(QuantityConverter::default())
    }
}

impl<'a> OptimalUnitSelector<'a> {
    pub fn new(converter: QuantityConverter<'a>) -> Self {
        Self { converter }
    }

    /// Re-express `quantity` in its most readable unit.
    ///
    /// Candidates are the units where the converted amount is >= 1; the one
    /// nearest to 1 wins, earlier catalog entries winning ties. If no unit
    /// reaches 1, the first catalog unit is returned with its converted
    /// amount. A zero or unset amount, or an unset unit, is returned unchanged.
    pub fn find_optimal_unit(&self, quantity: &Quantity, dimension: Dimension) -> Quantity {
        let (amount, current) = match quantity.parts() {
            Some(parts) => parts,
            None => return quantity.clone(),
        };

        let values = self
            .converter
            .calculate_all_units(&Quantity::new(amount, current), dimension);

        let mut best: Option<(&str, f64)> = None;
        for (code, value) in values.iter().filter(|(_, value)| *value >= 1.0) {
            let closer = match best {
                Some((_, best_value)) => (value - 1.0).abs() < (best_value - 1.0).abs(),
                None => true,
            };
            if closer {
                best = Some((code, value));
            }
        }

        match best {
            Some((code, value)) => {
                log::debug!("Optimal unit for {} {}: {} {}", amount, current, value, code);
                Quantity::new(round2(value), code)
            }
            None => match values.iter().next() {
                Some((code, value)) => Quantity::new(value, code),
                None => quantity.clone(),
            },
        }
    }

    /// Multiply a quantity by `factor` (e.g. servings ratio) and pick the
    /// optimal unit for the result
    pub fn scale_quantity(
        &self,
        quantity: &Quantity,
        factor: f64,
        dimension: Dimension,
    ) -> Quantity {
        match quantity.parts() {
            Some((amount, unit)) => {
                self.find_optimal_unit(&Quantity::new(amount * factor, unit), dimension)
            }
            None => quantity.clone(),
        }
    }
}
