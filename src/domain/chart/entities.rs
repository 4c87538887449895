use super::value_objects::{AutoscaleMode, LoadStatus, PriceScale, ScrollPolicy, SurfaceSize, ViewportState, VisibleRange};
use crate::domain::events::ChartEvent;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Bar, BarSeries, PriceBounds};
use crate::log_warn;

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub repaint: bool,
}

impl Transition {
    pub const REPAINT: Transition = Transition { repaint: true };
    pub const NONE: Transition = Transition { repaint: false };

    pub fn merge(self, other: Transition) -> Transition {
        Transition { repaint: self.repaint || other.repaint }
    }
}

/// Domain entity - everything a repaint reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub bars: BarSeries,
    pub viewport: ViewportState,
    pub container: SurfaceSize,
    pub status: LoadStatus,
    pub autoscale: AutoscaleMode,
    pub scroll_policy: ScrollPolicy,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(ViewportState::default(), AutoscaleMode::default(), ScrollPolicy::default())
    }
}

impl ChartState {
    pub fn new(viewport: ViewportState, autoscale: AutoscaleMode, scroll_policy: ScrollPolicy) -> Self {
        Self {
            bars: BarSeries::empty(),
            viewport,
            container: SurfaceSize::default(),
            status: LoadStatus::Loading,
            autoscale,
            scroll_policy,
        }
    }

    pub fn with_container(self, container: SurfaceSize) -> Self {
        Self { container, ..self }
    }

    /// Pure transition `(state, event) -> state'` plus the repaint trigger.
    pub fn apply(self, event: ChartEvent) -> (ChartState, Transition) {
        match event {
            ChartEvent::BarsLoaded(bars) => {
                let status = LoadStatus::Ready { bars: bars.len() };
                let viewport = self.viewport.constrained(self.scroll_policy, bars.len());
                (Self { bars, status, viewport, ..self }, Transition::REPAINT)
            }
            ChartEvent::LoadFailed { reason } => {
                (Self { status: LoadStatus::Failed { reason }, ..self }, Transition::REPAINT)
            }
            ChartEvent::Scrolled { delta_y } => {
                let viewport = self
                    .viewport
                    .handle_scroll(delta_y)
                    .constrained(self.scroll_policy, self.bars.len());
                (Self { viewport, ..self }, Transition::REPAINT)
            }
            ChartEvent::BarWidthChanged { bar_width } => match self.viewport.with_bar_width(bar_width) {
                Ok(viewport) => (Self { viewport, ..self }, Transition::REPAINT),
                Err(err) => {
                    log_warn!(LogComponent::Domain("ChartState"), "ignored: {}", err);
                    (self, Transition::NONE)
                }
            },
            ChartEvent::Resized(container) => (Self { container, ..self }, Transition::REPAINT),
            ChartEvent::Invalidated => (self, Transition::REPAINT),
        }
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.viewport.visible_range(self.bars.len(), self.container.width)
    }

    pub fn visible_bars(&self) -> &[Bar] {
        self.bars.window(self.visible_range().as_range())
    }

    /// Bounds for the current repaint; `None` while there is nothing to scale.
    pub fn price_bounds(&self) -> Option<PriceBounds> {
        match self.autoscale {
            AutoscaleMode::Global => self.bars.bounds(),
            AutoscaleMode::Visible => PriceBounds::of(self.visible_bars()),
        }
    }

    pub fn price_scale(&self) -> Option<PriceScale> {
        self.price_bounds().map(|bounds| PriceScale::new(bounds, self.container.height as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> BarSeries {
        BarSeries::new(
            (0..n)
                .map(|i| {
                    let base = 1.0 + i as f64;
                    Bar::from_values(i as i64 * 60_000, base, base + 0.5, base - 0.5, base + 0.25)
                })
                .collect(),
        )
    }

    #[test]
    fn reload_keeps_scroll_offset() {
        let state = ChartState::default().with_container(SurfaceSize::new(200, 100));
        let (state, _) = state.apply(ChartEvent::BarsLoaded(series(30)));
        let (state, _) = state.apply(ChartEvent::Scrolled { delta_y: 3.0 });
        let (state, t) = state.apply(ChartEvent::BarsLoaded(series(40)));
        assert!(t.repaint);
        assert_eq!(state.viewport.scroll_offset, 1);
        assert_eq!(state.status, LoadStatus::Ready { bars: 40 });
    }

    #[test]
    fn failed_load_leaves_bars_untouched() {
        let (state, _) = ChartState::default().apply(ChartEvent::BarsLoaded(series(5)));
        let (state, t) = state.apply(ChartEvent::LoadFailed { reason: "timeout".into() });
        assert!(t.repaint);
        assert_eq!(state.bars.len(), 5);
        assert_eq!(state.status.message(), "Failed to load bars: timeout");
    }

    #[test]
    fn invalid_bar_width_is_ignored() {
        let (state, t) = ChartState::default().apply(ChartEvent::BarWidthChanged { bar_width: -2.0 });
        assert_eq!(t, Transition::NONE);
        assert_eq!(state.viewport.bar_width, 10.0);
    }

    #[test]
    fn visible_autoscale_uses_window_only() {
        let state = ChartState::new(ViewportState::default(), AutoscaleMode::Visible, ScrollPolicy::Unbounded)
            .with_container(SurfaceSize::new(20, 100));
        let (state, _) = state.apply(ChartEvent::BarsLoaded(series(10)));
        assert_eq!(state.visible_range(), VisibleRange::new(0, 2));
        assert_eq!(state.price_bounds(), Some(PriceBounds::new(0.5, 2.5)));

        let global = ChartState { autoscale: AutoscaleMode::Global, ..state };
        assert_eq!(global.price_bounds(), Some(PriceBounds::new(0.5, 10.5)));
    }
}
