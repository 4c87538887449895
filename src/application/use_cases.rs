//! Use cases driving the chart from outside the UI thread's event handlers.

use std::rc::{Rc, Weak};

use crate::domain::{
    errors::AppError,
    events::ChartEvent,
    logging::{LogComponent, get_logger},
    market_data::{BarSeries, BarSource},
};
use crate::{log_error, log_info};

/// Marks the lifetime of a mounted chart. Dropping it invalidates every
/// watcher handed out, so late async results can tell they are orphaned.
#[derive(Debug, Default)]
pub struct Lifetime {
    token: Rc<()>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watcher(&self) -> LifetimeWatcher {
        LifetimeWatcher { token: Rc::downgrade(&self.token) }
    }
}

#[derive(Debug, Clone)]
pub struct LifetimeWatcher {
    token: Weak<()>,
}

impl LifetimeWatcher {
    pub fn is_alive(&self) -> bool {
        self.token.strong_count() > 0
    }
}

/// What happened to one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { bars: usize },
    Failed(AppError),
    /// The chart was torn down before the source answered.
    Discarded,
}

/// Fetch the full sequence once and hand the resulting event to `deliver`.
///
/// On failure the current bars are left alone and only a `LoadFailed`
/// event goes out. Nothing is delivered once `watcher` is dead.
pub async fn load_bars<B, F>(source: &B, watcher: &LifetimeWatcher, deliver: F) -> LoadOutcome
where
    B: BarSource,
    F: FnOnce(ChartEvent),
{
    log_info!(LogComponent::Application("LoadBars"), "Loading bars from {}", source.describe());

    let result = source.fetch_bars().await;

    if !watcher.is_alive() {
        get_logger().debug(LogComponent::Application("LoadBars"), "Chart gone before bars arrived, result discarded");
        return LoadOutcome::Discarded;
    }

    match result {
        Ok(bars) => {
            let series = BarSeries::new(bars);
            let count = series.len();
            deliver(ChartEvent::BarsLoaded(series));
            LoadOutcome::Loaded { bars: count }
        }
        Err(err) => {
            log_error!(LogComponent::Application("LoadBars"), "Failed to load bars: {}", err);
            deliver(ChartEvent::LoadFailed { reason: err.to_string() });
            LoadOutcome::Failed(err)
        }
    }
}
