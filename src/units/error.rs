use crate::units::types::Dimension;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Unknown {dimension} unit: {code}")]
    UnknownUnit { code: String, dimension: Dimension },

    #[error("Incompatible units: cannot convert {from} to {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
