//! Entry points callable from the host page.

use leptos::{mount_to_body, view};
use wasm_bindgen::prelude::*;

use super::app::ChartApp;
use crate::config::ChartConfig;
use crate::domain::logging::LogComponent;
use crate::log_info;

/// Mount the chart with default settings.
#[wasm_bindgen(js_name = runApp)]
pub fn run_app() {
    mount(ChartConfig::default());
}

/// Mount the chart with a partial JSON config; unknown keys are rejected.
#[wasm_bindgen(js_name = runAppWithConfig)]
pub fn run_app_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = ChartConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(config);
    Ok(())
}

fn mount(config: ChartConfig) {
    log_info!(LogComponent::Presentation("WasmApi"), "🚀 Mounting chart for {}", config.source.symbol);
    mount_to_body(move || view! { <ChartApp config=config.clone() /> });
}
