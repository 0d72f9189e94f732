use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Volume,
    Weight,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Volume => "volume",
            Dimension::Weight => "weight",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the unit catalog
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Identifier used everywhere else (e.g. "tbsp", "fl_oz", "kg")
    pub code: &'static str,
    /// Display label
    pub label: &'static str,
    /// How many base units (1 cup / 1 gram) one of this unit equals
    pub factor_to_base: f64,
    /// Other spellings accepted when parsing free text
    pub aliases: &'static [&'static str],
}

/// An amount paired with a unit code; either side may be unset
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Quantity {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            unit: Some(unit.into()),
        }
    }

    /// Amount and unit code, or None when there is nothing to convert: an
    /// unset or zero amount, or an unset or empty code
    pub fn parts(&self) -> Option<(f64, &str)> {
        match (self.amount, self.unit.as_deref()) {
            (Some(amount), Some(unit)) if amount != 0.0 && !unit.is_empty() => {
                Some((amount, unit))
            }
            _ => None,
        }
    }
}

/// Amount of one source quantity expressed in every unit of a dimension,
/// kept in catalog order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitValueMap {
    entries: Vec<(&'static str, f64)>,
}

impl UnitValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, code: &'static str, amount: f64) {
        self.entries.push((code, amount));
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a JSON object so the UI can index by code; insertion
// (catalog) order is kept in the output
impl Serialize for UnitValueMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, amount) in &self.entries {
            map.serialize_entry(code, amount)?;
        }
        map.end()
    }
}
