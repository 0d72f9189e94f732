// Normalization of backend validation failures into a per-field error tree

pub mod normalizer;
pub mod payload;
pub mod tree;


pub use normalizer::apply;
pub use payload::ErrorPayload;
pub use tree::{FieldErrors, RowContext, RowKind, ValidationErrorState, ROW_GENERAL_FIELD};
