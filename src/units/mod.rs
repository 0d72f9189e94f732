// Ingredient quantity conversion between volume and weight units

pub mod catalog;
pub mod converter;
pub mod detector;
pub mod error;
pub mod formatter;
pub mod selector;
pub mod types;

pub use catalog::UnitCatalog;
pub use converter::QuantityConverter;
pub use detector::{looks_like_quantity, parse_quantity};
pub use error::UnitError;
pub use formatter::{format_quantity, UnitFormatter, UnitPreferences};
pub use selector::OptimalUnitSelector;
pub use types::{Dimension, Quantity, UnitDefinition, UnitValueMap};
