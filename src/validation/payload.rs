use serde_json::{Number, Value as JsonValue};

/// A validation-failure body, classified by shape.
///
/// Backends return arbitrarily nested strings, numbers, lists and objects;
/// everything the normalizer does is a match on this tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ErrorPayload {
    #[default]
    Empty,
    Text(String),
    Number(Number),
    /// Booleans carry no message and are dropped by the normalizer
    Flag(bool),
    List(Vec<ErrorPayload>),
    /// Object entries in the order they were received
    Keyed(Vec<(String, ErrorPayload)>),
}

impl ErrorPayload {
    /// Strings and numbers
    pub fn is_literal(&self) -> bool {
        matches!(self, ErrorPayload::Text(_) | ErrorPayload::Number(_))
    }

    /// Message text of a literal, trimmed; None for blanks and non-literals
    pub fn literal_text(&self) -> Option<String> {
        match self {
            ErrorPayload::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            ErrorPayload::Number(n) => Some(number_text(n)),
            _ => None,
        }
    }

    /// Flatten into a message list: literals are kept, lists are walked
    /// recursively, anything else contributes nothing
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    fn collect_messages(&self, out: &mut Vec<String>) {
        match self {
            ErrorPayload::List(items) => {
                for item in items {
                    item.collect_messages(out);
                }
            }
            other => out.extend(other.literal_text()),
        }
    }
}

// Integral floats print without a fractional part ("1.0" -> "1"), matching
// how the web client stringifies numbers
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

impl From<JsonValue> for ErrorPayload {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ErrorPayload::Empty,
            JsonValue::Bool(b) => ErrorPayload::Flag(b),
            JsonValue::Number(n) => ErrorPayload::Number(n),
            JsonValue::String(s) => ErrorPayload::Text(s),
            JsonValue::Array(items) => {
                ErrorPayload::List(items.into_iter().map(ErrorPayload::from).collect())
            }
            JsonValue::Object(map) => ErrorPayload::Keyed(
                map.into_iter()
                    .map(|(key, value)| (key, ErrorPayload::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(s: &str) -> Self {
        ErrorPayload::Text(s.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(s: String) -> Self {
        ErrorPayload::Text(s)
    }
}

impl From<i64> for ErrorPayload {
    fn from(n: i64) -> Self {
        ErrorPayload::Number(n.into())
    }
}

impl From<f64> for ErrorPayload {
    fn from(n: f64) -> Self {
        // NaN and infinities are not JSON numbers
        Number::from_f64(n)
            .map(ErrorPayload::Number)
            .unwrap_or(ErrorPayload::Empty)
    }
}

impl<T: Into<ErrorPayload>> From<Vec<T>> for ErrorPayload {
    fn from(items: Vec<T>) -> Self {
        ErrorPayload::List(items.into_iter().map(Into::into).collect())
    }
}
