use crate::units::converter::QuantityConverter;
use crate::units::selector::OptimalUnitSelector;
use crate::units::types::{Dimension, Quantity};
use std::collections::HashMap;

/// Display preferences for quantities
#[derive(Debug, Clone)]
pub struct UnitPreferences {
    /// Dimension-level display unit (from config)
    pub dimensions: HashMap<Dimension, String>,
    /// Pick the optimal unit when no preferred unit applies
    pub auto_optimize: bool,
}

impl Default for UnitPreferences {
    fn default() -> Self {
        Self {
            dimensions: HashMap::new(),
            auto_optimize: true,
        }
    }
}

/// Render quantities for display, honouring unit preferences
pub struct UnitFormatter<'a> {
    converter: QuantityConverter<'a>,
    preferences: UnitPreferences,
}

impl<'a> UnitFormatter<'a> {
    pub fn new(converter: QuantityConverter<'a>, preferences: UnitPreferences) -> Self {
        Self {
            converter,
            preferences,
        }
    }

    /// Decide which quantity to show.
    ///
    /// Unit precedence:
    /// 1. Explicit override
    /// 2. Dimension preference in config
    /// 3. Optimal unit (if auto_optimize)
    /// 4. The quantity's own unit
    pub fn resolve(
        &self,
        quantity: &Quantity,
        dimension: Dimension,
        override_unit: Option<&str>,
    ) -> Quantity {
        let preferred = override_unit.or_else(|| {
            self.preferences
                .dimensions
                .get(&dimension)
                .map(String::as_str)
        });

        if let Some(unit) = preferred {
            match self.converter.convert_quantity(quantity, unit, dimension) {
                Ok(converted) => return converted,
                Err(e) => {
                    log::warn!("Ignoring preferred unit '{}': {}", unit, e);
                }
            }
        }

        if self.preferences.auto_optimize {
            OptimalUnitSelector::new(self.converter).find_optimal_unit(quantity, dimension)
        } else {
            quantity.clone()
        }
    }

    /// Format as "<amount> <code>"; blank when the amount is unset or not a number
    pub fn format(
        &self,
        quantity: &Quantity,
        dimension: Dimension,
        override_unit: Option<&str>,
    ) -> String {
        format_quantity(&self.resolve(quantity, dimension, override_unit))
    }
}

/// Format a quantity as-is: "<amount> <code>", trailing zeros trimmed
pub fn format_quantity(quantity: &Quantity) -> String {
    let amount = match quantity.amount {
        Some(a) if a.is_finite() => format_amount(a),
        _ => return String::new(),
    };

    match quantity.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{} {}", amount, unit),
        _ => amount,
    }
}

fn format_amount(amount: f64) -> String {
    let text = format!("{:.2}", amount);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
