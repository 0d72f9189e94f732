use crate::validation::payload::ErrorPayload;
use crate::validation::tree::{RowContext, ValidationErrorState};

/// Keys that carry general (form- or row-level) messages rather than naming a field
const GENERAL_KEYS: &[&str] = &["non_field_errors", "detail"];

const INGREDIENTS_KEY: &str = "ingredients";
const STEPS_KEY: &str = "steps";

/// Merge a validation-failure payload into `state`.
///
/// Never fails: unrecognised shapes are dropped (booleans, blank strings) or
/// flattened (nested objects), so any backend body is accepted.
pub fn apply(
    state: &mut ValidationErrorState,
    payload: impl Into<ErrorPayload>,
    context: Option<RowContext>,
) {
    walk(state, payload.into(), context);
}

fn walk(state: &mut ValidationErrorState, payload: ErrorPayload, context: Option<RowContext>) {
    match payload {
        ErrorPayload::Empty => {}
        ErrorPayload::List(items) => {
            let (literals, nested): (Vec<_>, Vec<_>) =
                items.into_iter().partition(ErrorPayload::is_literal);

            state.add_general(literals, context);
            for item in nested {
                walk(state, item, context);
            }
        }
        ErrorPayload::Keyed(entries) => {
            for (key, value) in entries {
                walk_entry(state, &key, value, context);
            }
        }
        literal @ (ErrorPayload::Text(_) | ErrorPayload::Number(_)) => {
            state.add_general(vec![literal], context);
        }
        ErrorPayload::Flag(_) => {
            log::debug!("Dropping boolean in error payload");
        }
    }
}

fn walk_entry(
    state: &mut ValidationErrorState,
    key: &str,
    value: ErrorPayload,
    context: Option<RowContext>,
) {
    if GENERAL_KEYS.contains(&key) {
        walk(state, value, context);
        return;
    }

    // Inside a row every key is a field of that row; rows do not nest
    if let Some(row) = context {
        state.add_row_error(row, key, value);
        return;
    }

    match (key, value) {
        (INGREDIENTS_KEY, ErrorPayload::List(rows)) => {
            for (index, row) in rows.into_iter().enumerate() {
                walk(state, row, Some(RowContext::ingredient(index)));
            }
        }
        (STEPS_KEY, ErrorPayload::List(rows)) => {
            for (index, row) in rows.into_iter().enumerate() {
                walk(state, row, Some(RowContext::step(index)));
            }
        }
        (_, nested @ ErrorPayload::Keyed(_)) => {
            log::debug!("Flattening nested errors under '{}'", key);
            walk(state, nested, None);
        }
        (field, value) => state.add_field(field, value),
    }
}

impl ValidationErrorState {
    /// Builder form of [`apply`]
    pub fn with_payload(
        mut self,
        payload: impl Into<ErrorPayload>,
        context: Option<RowContext>,
    ) -> Self {
        apply(&mut self, payload, context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_noop() {
        let mut state = ValidationErrorState::new(1, 1);
        apply(&mut state, json!(null), None);
        assert_eq!(state, ValidationErrorState::new(1, 1));
    }

    #[test]
    fn test_scalar_promotion() {
        let mut state = ValidationErrorState::new(0, 0);
        apply(&mut state, "Invalid title", None);
        assert_eq!(state.general, vec!["Invalid title"]);

        apply(&mut state, json!(500), None);
        assert_eq!(state.general, vec!["Invalid title", "500"]);
    }

    #[test]
    fn test_scalar_in_context() {
        let mut state = ValidationErrorState::new(1, 0);
        apply(&mut state, "bad", Some(RowContext::ingredient(0)));
        assert_eq!(state.ingredients[0]["general"], vec!["bad"]);
        assert!(state.general.is_empty());
    }

    #[test]
    fn test_list_literals_then_objects() {
        let mut state = ValidationErrorState::new(0, 0);
        apply(
            &mut state,
            json!([{"detail": "second"}, "first", {"title": "required"}, false]),
            None,
        );
        assert_eq!(state.general, vec!["first", "second"]);
        assert_eq!(state.fields["title"], vec!["required"]);
    }
}
