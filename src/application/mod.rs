//! Application layer: the event-driven coordinator and the load use case.

pub mod coordinator;
pub mod use_cases;

pub use coordinator::ChartCoordinator;
pub use use_cases::{Lifetime, LifetimeWatcher, LoadOutcome, load_bars};
