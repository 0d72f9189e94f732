use crate::validation::payload::ErrorPayload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name -> messages, for the form or one ingredient/step row.
///
/// Fields are kept sorted by name, so rendering order does not depend on the
/// order the backend listed them in. Messages within a field keep their
/// arrival order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Bucket that receives general messages redirected into a row
pub const ROW_GENERAL_FIELD: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Ingredient,
    Step,
}

impl RowKind {
    pub fn label(&self) -> &'static str {
        match self {
            RowKind::Ingredient => "Ingredient",
            RowKind::Step => "Step",
        }
    }
}

/// Marks messages as belonging to one ingredient or step row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowContext {
    pub kind: RowKind,
    pub index: usize,
}

impl RowContext {
    pub fn ingredient(index: usize) -> Self {
        Self {
            kind: RowKind::Ingredient,
            index,
        }
    }

    pub fn step(index: usize) -> Self {
        Self {
            kind: RowKind::Step,
            index,
        }
    }
}

/// Renderable error tree for the recipe form.
///
/// Built empty at the start of a submit attempt, filled by the normalizer,
/// then handed to the UI. `Clone` is a deep copy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ValidationErrorState {
    pub general: Vec<String>,
    pub fields: FieldErrors,
    pub ingredients: Vec<FieldErrors>,
    pub steps: Vec<FieldErrors>,
}

impl ValidationErrorState {
    /// Empty tree with one row slot per ingredient and step currently in the form
    pub fn new(ingredient_count: usize, step_count: usize) -> Self {
        Self {
            general: Vec::new(),
            fields: FieldErrors::new(),
            ingredients: vec![FieldErrors::new(); ingredient_count],
            steps: vec![FieldErrors::new(); step_count],
        }
    }

    /// Append top-level messages, or the row's "general" bucket when a
    /// context is given
    pub fn add_general(
        &mut self,
        messages: impl Into<ErrorPayload>,
        context: Option<RowContext>,
    ) {
        match context {
            Some(row) => self.add_row_error(row, ROW_GENERAL_FIELD, messages),
            None => self.general.extend(messages.into().messages()),
        }
    }

    pub fn add_field(&mut self, field: &str, messages: impl Into<ErrorPayload>) {
        append(&mut self.fields, field, messages.into().messages());
    }

    pub fn add_ingredient_error(
        &mut self,
        index: usize,
        field: &str,
        messages: impl Into<ErrorPayload>,
    ) {
        self.add_row_error(RowContext::ingredient(index), field, messages);
    }

    pub fn add_step_error(
        &mut self,
        index: usize,
        field: &str,
        messages: impl Into<ErrorPayload>,
    ) {
        self.add_row_error(RowContext::step(index), field, messages);
    }

    /// Append to a row's field bucket, growing the row list with empty
    /// entries if `row.index` is past the end
    pub fn add_row_error(
        &mut self,
        row: RowContext,
        field: &str,
        messages: impl Into<ErrorPayload>,
    ) {
        let rows = match row.kind {
            RowKind::Ingredient => &mut self.ingredients,
            RowKind::Step => &mut self.steps,
        };
        if rows.len() <= row.index {
            rows.resize_with(row.index + 1, FieldErrors::new);
        }
        append(&mut rows[row.index], field, messages.into().messages());
    }

    pub fn rows(&self, kind: RowKind) -> &[FieldErrors] {
        match kind {
            RowKind::Ingredient => &self.ingredients,
            RowKind::Step => &self.steps,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.general.is_empty()
            || has_messages(&self.fields)
            || self.ingredients.iter().any(has_messages)
            || self.steps.iter().any(has_messages)
    }

    pub fn message_count(&self) -> usize {
        self.general.len()
            + count_messages(&self.fields)
            + self.ingredients.iter().map(count_messages).sum::<usize>()
            + self.steps.iter().map(count_messages).sum::<usize>()
    }
}

fn append(bucket: &mut FieldErrors, field: &str, messages: Vec<String>) {
    if messages.is_empty() {
        return;
    }
    bucket.entry(field.to_string()).or_default().extend(messages);
}

fn has_messages(bucket: &FieldErrors) -> bool {
    bucket.values().any(|messages| !messages.is_empty())
}

fn count_messages(bucket: &FieldErrors) -> usize {
    bucket.values().map(Vec::len).sum()
}

impl fmt::Display for ValidationErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.general.is_empty() {
            writeln!(f, "General:")?;
            for message in &self.general {
                writeln!(f, "  {}", message)?;
            }
        }

        if has_messages(&self.fields) {
            writeln!(f, "Fields:")?;
            write_bucket(f, &self.fields)?;
        }

        for kind in [RowKind::Ingredient, RowKind::Step] {
            for (index, row) in self.rows(kind).iter().enumerate() {
                if has_messages(row) {
                    writeln!(f, "{} #{}:", kind.label(), index + 1)?;
                    write_bucket(f, row)?;
                }
            }
        }

        Ok(())
    }
}

fn write_bucket(f: &mut fmt::Formatter<'_>, bucket: &FieldErrors) -> fmt::Result {
    for (field, messages) in bucket {
        for message in messages {
            writeln!(f, "  [{}] {}", field, message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_sized_and_empty() {
        let state = ValidationErrorState::new(2, 3);
        assert_eq!(state.ingredients.len(), 2);
        assert_eq!(state.steps.len(), 3);
        assert!(!state.has_errors());
        assert_eq!(state.message_count(), 0);
    }

    #[test]
    fn test_add_general_and_field() {
        let mut state = ValidationErrorState::new(0, 0);
        state.add_general(vec!["one", " two "], None);
        state.add_general("three", None);
        state.add_field("title", "required");
        state.add_field("title", vec!["too short"]);

        assert_eq!(state.general, vec!["one", "two", "three"]);
        assert_eq!(state.fields["title"], vec!["required", "too short"]);
        assert!(state.has_errors());
    }

    #[test]
    fn test_add_general_with_context_redirects() {
        let mut state = ValidationErrorState::new(1, 1);
        state.add_general("bad row", Some(RowContext::step(0)));

        assert!(state.general.is_empty());
        assert_eq!(state.steps[0][ROW_GENERAL_FIELD], vec!["bad row"]);
    }

    #[test]
    fn test_index_auto_extension() {
        let mut state = ValidationErrorState::new(0, 1);
        state.add_step_error(3, "description", "bad");

        assert_eq!(state.steps.len(), 4);
        assert_eq!(state.steps[3]["description"], vec!["bad"]);
        assert!(state.steps[1].is_empty());
        assert!(state.steps[2].is_empty());

        // Never truncated
        state.add_step_error(0, "description", "also bad");
        assert_eq!(state.steps.len(), 4);
    }

    #[test]
    fn test_empty_messages_leave_no_bucket() {
        let mut state = ValidationErrorState::new(0, 0);
        state.add_field("title", "   ");
        state.add_field("notes", ErrorPayload::Flag(true));
        state.add_ingredient_error(1, "name", Vec::<String>::new());

        assert!(state.fields.is_empty());
        assert_eq!(state.ingredients.len(), 2);
        assert!(!state.has_errors());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = ValidationErrorState::new(1, 0);
        state.add_ingredient_error(0, "name", "required");

        let snapshot = state.clone();
        state.add_ingredient_error(0, "name", "too long");
        state.add_general("later", None);

        assert_eq!(snapshot.ingredients[0]["name"], vec!["required"]);
        assert!(snapshot.general.is_empty());
        assert_eq!(state.ingredients[0]["name"].len(), 2);
    }

    #[test]
    fn test_display() {
        let mut state = ValidationErrorState::new(1, 0);
        state.add_general("Recipe invalid", None);
        state.add_field("title", "required");
        state.add_ingredient_error(0, "name", "required");

        let rendered = state.to_string();
        assert_eq!(
            rendered,
            "General:\n  Recipe invalid\nFields:\n  [title] required\nIngredient #1:\n  [name] required\n"
        );
    }

    #[test]
    fn test_serialize_shape() {
        let mut state = ValidationErrorState::new(1, 0);
        state.add_ingredient_error(0, "quantity", 5_i64);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "general": [],
                "fields": {},
                "ingredients": [{"quantity": ["5"]}],
                "steps": []
            })
        );
    }
}
