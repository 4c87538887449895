use crate::domain::chart::SurfaceSize;
use crate::domain::market_data::BarSeries;

/// Everything that can change what the chart shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The source delivered a new sequence; replaces the old one wholesale.
    BarsLoaded(BarSeries),
    /// The fetch failed; bars and viewport stay as they are.
    LoadFailed { reason: String },
    /// Wheel input; only the sign matters.
    Scrolled { delta_y: f64 },
    BarWidthChanged { bar_width: f64 },
    /// The container was laid out at a new size.
    Resized(SurfaceSize),
    /// Explicit repaint request, e.g. right after the canvas mounts.
    Invalidated,
}

impl ChartEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::BarsLoaded(_) => "BarsLoaded",
            ChartEvent::LoadFailed { .. } => "LoadFailed",
            ChartEvent::Scrolled { .. } => "Scrolled",
            ChartEvent::BarWidthChanged { .. } => "BarWidthChanged",
            ChartEvent::Resized(_) => "Resized",
            ChartEvent::Invalidated => "Invalidated",
        }
    }
}
