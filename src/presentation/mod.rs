//! Presentation layer: the Leptos component and the JS entry points.

pub mod app;
pub mod wasm_api;

pub use app::ChartApp;
