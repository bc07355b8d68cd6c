//! # Browser Bindings
//!
//! Exposes the calculator to the storefront as `calculatePrice`, so the
//! instant estimate in the browser is the same compiled code the quote
//! service runs.
//!
//! ```text
//! import init, { calculatePrice } from "printshop_core";
//! await init();
//! const breakdown = calculatePrice({ basePrice: 40, quantity: 2 });
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::pricing::calculate_price;
use crate::types::PriceCalculationInput;

/// Prices a plain JS object. Throws only when the argument is not an object.
#[wasm_bindgen(js_name = calculatePrice)]
pub fn calculate_price_js(input: JsValue) -> Result<JsValue, JsValue> {
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(input).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let input = PriceCalculationInput::from_json_value(&value)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    calculate_price(&input)
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
