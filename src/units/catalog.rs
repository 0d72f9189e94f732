use crate::units::types::{Dimension, UnitDefinition};

const ML_PER_CUP: f64 = 236.588_236_5;

// Catalog order is used for iteration and tie-breaking; it is not sorted by
// magnitude (ml/l come after the imperial units)
const VOLUME_UNITS: &[UnitDefinition] = &[
    UnitDefinition {
        code: "tsp",
        label: "Teaspoon",
        factor_to_base: 1.0 / 48.0,
        aliases: &["teaspoon", "teaspoons", "tsps", "t"],
    },
    UnitDefinition {
        code: "tbsp",
        label: "Tablespoon",
        factor_to_base: 1.0 / 16.0,
        aliases: &["tablespoon", "tablespoons", "tbsps", "tbs", "tbl", "T"],
    },
    UnitDefinition {
        code: "fl_oz",
        label: "Fluid ounce",
        factor_to_base: 1.0 / 8.0,
        aliases: &["fl oz", "fl. oz", "fl. oz.", "floz", "fluid ounce", "fluid ounces"],
    },
    UnitDefinition {
        code: "cup",
        label: "Cup",
        factor_to_base: 1.0,
        aliases: &["cups", "c"],
    },
    UnitDefinition {
        code: "pint",
        label: "Pint",
        factor_to_base: 2.0,
        aliases: &["pints", "pt"],
    },
    UnitDefinition {
        code: "quart",
        label: "Quart",
        factor_to_base: 4.0,
        aliases: &["quarts", "qt"],
    },
    UnitDefinition {
        code: "gallon",
        label: "Gallon",
        factor_to_base: 16.0,
        aliases: &["gallons", "gal"],
    },
    UnitDefinition {
        code: "ml",
        label: "Milliliter",
        factor_to_base: 1.0 / ML_PER_CUP,
        aliases: &["milliliter", "milliliters", "millilitre", "millilitres"],
    },
    UnitDefinition {
        code: "l",
        label: "Liter",
        factor_to_base: 1000.0 / ML_PER_CUP,
        aliases: &["liter", "liters", "litre", "litres", "L"],
    },
];

const WEIGHT_UNITS: &[UnitDefinition] = &[
    UnitDefinition {
        code: "g",
        label: "Gram",
        factor_to_base: 1.0,
        aliases: &["gram", "grams", "gr"],
    },
    UnitDefinition {
        code: "kg",
        label: "Kilogram",
        factor_to_base: 1000.0,
        aliases: &["kilogram", "kilograms", "kgs", "kilo", "kilos"],
    },
    UnitDefinition {
        code: "oz",
        label: "Ounce",
        factor_to_base: 28.349_523_125,
        aliases: &["ounce", "ounces"],
    },
    UnitDefinition {
        code: "lb",
        label: "Pound",
        factor_to_base: 453.592_37,
        aliases: &["pound", "pounds", "lbs"],
    },
];

static STANDARD: UnitCatalog = UnitCatalog {
    volume: VOLUME_UNITS,
    weight: WEIGHT_UNITS,
};

/// Fixed, ordered unit lists for each dimension
#[derive(Debug)]
pub struct UnitCatalog {
    volume: &'static [UnitDefinition],
    weight: &'static [UnitDefinition],
}

impl UnitCatalog {
    /// The built-in catalog (cup pivot for volume, gram pivot for weight)
    pub fn standard() -> &'static UnitCatalog {
        &STANDARD
    }

    /// Units of a dimension in catalog order
    pub fn units(&self, dimension: Dimension) -> &[UnitDefinition] {
        match dimension {
            Dimension::Volume => self.volume,
            Dimension::Weight => self.weight,
        }
    }

    pub fn get(&self, code: &str, dimension: Dimension) -> Option<&UnitDefinition> {
        self.units(dimension).iter().find(|u| u.code == code)
    }

    pub fn factor(&self, code: &str, dimension: Dimension) -> Option<f64> {
        self.get(code, dimension).map(|u| u.factor_to_base)
    }

    pub fn dimension_of(&self, code: &str) -> Option<Dimension> {
        [Dimension::Volume, Dimension::Weight]
            .into_iter()
            .find(|dim| self.get(code, *dim).is_some())
    }

    /// True iff both codes are known and share a dimension
    pub fn is_compatible(&self, a: &str, b: &str) -> bool {
        match (self.dimension_of(a), self.dimension_of(b)) {
            (Some(da), Some(db)) => da == db,
            _ => false,
        }
    }

    /// Find a unit by code or alias.
    ///
    /// Single-letter aliases are case-sensitive ("T" is a tablespoon, "t" a
    /// teaspoon); everything else is matched ignoring case.
    pub fn resolve(&self, text: &str) -> Option<(&UnitDefinition, Dimension)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        for dimension in [Dimension::Volume, Dimension::Weight] {
            if let Some(unit) = self.get(text, dimension) {
                return Some((unit, dimension));
            }
        }

        for dimension in [Dimension::Volume, Dimension::Weight] {
            let found = self.units(dimension).iter().find(|unit| {
                std::iter::once(unit.code)
                    .chain(unit.aliases.iter().copied())
                    .any(|alias| alias_matches(alias, text))
            });
            if let Some(unit) = found {
                return Some((unit, dimension));
            }
        }

        None
    }
}

fn alias_matches(alias: &str, text: &str) -> bool {
    if alias.chars().count() == 1 {
        alias == text
    } else {
        alias.eq_ignore_ascii_case(text)
    }
}
