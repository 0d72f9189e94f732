// WebAssembly bindings for the recipe form
use crate::config::Config;
use crate::units::{Dimension, OptimalUnitSelector, Quantity, QuantityConverter, UnitFormatter};
use crate::validation::{self, ValidationErrorState};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct SousWasm {
    config: Config,
}

impl Default for SousWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_dimension(dimension: &str) -> Result<Dimension, JsValue> {
    match dimension {
        "volume" => Ok(Dimension::Volume),
        "weight" => Ok(Dimension::Weight),
        other => Err(JsValue::from_str(&format!("Unknown dimension: {}", other))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

#[wasm_bindgen]
impl SousWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: Config::empty(),
        }
    }

    /// Replace the display configuration with TOML content
    #[wasm_bindgen]
    pub fn load_config(&mut self, content: &str) -> Result<(), JsValue> {
        self.config = Config::load_from_str(content)
            .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e)))?;
        Ok(())
    }

    /// Convert an amount; unknown units raise instead of returning NaN
    #[wasm_bindgen]
    pub fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        dimension: &str,
    ) -> Result<f64, JsValue> {
        let dimension = parse_dimension(dimension)?;
        QuantityConverter::default()
            .try_convert(amount, from, to, dimension)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns JSON object mapping every unit code to the converted amount
    #[wasm_bindgen]
    pub fn calculate_all_units(
        &self,
        amount: Option<f64>,
        unit: Option<String>,
        dimension: &str,
    ) -> Result<String, JsValue> {
        let dimension = parse_dimension(dimension)?;
        let values =
            QuantityConverter::default().calculate_all_units(&Quantity { amount, unit }, dimension);
        to_json(&values)
    }

    /// Returns JSON {"amount": ..., "unit": ...}
    #[wasm_bindgen]
    pub fn find_optimal_unit(
        &self,
        amount: Option<f64>,
        unit: Option<String>,
        dimension: &str,
    ) -> Result<String, JsValue> {
        let dimension = parse_dimension(dimension)?;
        let optimal =
            OptimalUnitSelector::default().find_optimal_unit(&Quantity { amount, unit }, dimension);
        to_json(&optimal)
    }

    /// Display string using the loaded unit preferences
    #[wasm_bindgen]
    pub fn format_quantity(
        &self,
        amount: Option<f64>,
        unit: Option<String>,
        dimension: &str,
    ) -> Result<String, JsValue> {
        let dimension = parse_dimension(dimension)?;
        let formatter =
            UnitFormatter::new(QuantityConverter::default(), self.config.unit_preferences());
        Ok(formatter.format(&Quantity { amount, unit }, dimension, None))
    }

    /// Normalize a failed-validation body (any JS value) into the error tree.
    /// Returns JSON of the tree.
    #[wasm_bindgen]
    pub fn normalize_errors(
        &self,
        payload: JsValue,
        ingredient_count: usize,
        step_count: usize,
    ) -> Result<String, JsValue> {
        let mut state = ValidationErrorState::new(ingredient_count, step_count);

        // `undefined` has no JSON form
        if !payload.is_undefined() {
            let text: String = js_sys::JSON::stringify(&payload)?.into();
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse payload: {}", e)))?;
            validation::apply(&mut state, value, None);
        }

        to_json(&state)
    }
}
