//! Scrollable OHLC candlestick chart rendered to a browser canvas.
//!
//! Layers follow the usual split: `domain` holds bars, viewport math and the
//! pure state transition; `application` serialises events and repaints;
//! `infrastructure` talks to HTTP, the DOM and the canvas; `presentation`
//! mounts the Leptos component.

use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use config::ChartConfig;

/// Install the panic hook, console logger and browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "🚀 Chart runtime initialized");
}
