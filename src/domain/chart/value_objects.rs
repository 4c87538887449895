use crate::domain::errors::AppError;
use crate::domain::market_data::PriceBounds;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_BAR_WIDTH: f64 = 10.0;

/// Where the vertical price bounds come from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AutoscaleMode {
    /// Lowest low / highest high of the whole series; the axis stays put while scrolling.
    #[default]
    #[strum(serialize = "global")]
    Global,
    /// Bounds of the visible window only; the axis rescales on every scroll.
    #[strum(serialize = "visible")]
    Visible,
}

/// Whether the scroll offset may leave the loaded series.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPolicy {
    #[default]
    #[strum(serialize = "unbounded")]
    Unbounded,
    /// Offset kept in `[0, max(0, total - 1)]`.
    #[strum(serialize = "clamped")]
    Clamped,
}

/// Pixel dimensions of the drawing target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Window dimensions arrive as CSS pixels in `f64`.
    pub fn from_css(width: f64, height: f64) -> Self {
        let to_px = |v: f64| if v.is_finite() && v > 0.0 { v.floor().min(u32::MAX as f64) as u32 } else { 0 };
        Self::new(to_px(width), to_px(height))
    }
}

/// Half-open index window `[start, end)` over the bar series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Scroll position and zoom of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Index of the leftmost visible bar; may be negative or past the end.
    pub scroll_offset: i64,
    /// Horizontal pixels per bar.
    pub bar_width: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { scroll_offset: 0, bar_width: DEFAULT_BAR_WIDTH }
    }
}

impl ViewportState {
    pub fn new(scroll_offset: i64, bar_width: f64) -> Result<Self, AppError> {
        Self::default().with_scroll_offset(scroll_offset).with_bar_width(bar_width)
    }

    pub fn with_scroll_offset(self, scroll_offset: i64) -> Self {
        Self { scroll_offset, ..self }
    }

    /// Bar width must be positive and finite.
    pub fn with_bar_width(self, bar_width: f64) -> Result<Self, AppError> {
        if !bar_width.is_finite() || bar_width <= 0.0 {
            return Err(AppError::Validation(format!("bar width must be positive, got {}", bar_width)));
        }
        Ok(Self { bar_width, ..self })
    }

    /// One step per wheel event: forward on positive delta, back otherwise.
    pub fn handle_scroll(self, delta_y: f64) -> Self {
        let step = if delta_y > 0.0 { 1 } else { -1 };
        Self { scroll_offset: self.scroll_offset.saturating_add(step), ..self }
    }

    /// Apply the policy to the current offset.
    pub fn constrained(self, policy: ScrollPolicy, total_bars: usize) -> Self {
        match policy {
            ScrollPolicy::Unbounded => self,
            ScrollPolicy::Clamped => {
                let last = i64::try_from(total_bars.saturating_sub(1)).unwrap_or(i64::MAX);
                Self { scroll_offset: self.scroll_offset.clamp(0, last), ..self }
            }
        }
    }

    pub fn visible_bar_count(&self, surface_width: u32) -> usize {
        (surface_width as f64 / self.bar_width).floor() as usize
    }

    pub fn visible_range(&self, total_bars: usize, surface_width: u32) -> VisibleRange {
        let start = usize::try_from(self.scroll_offset.max(0)).unwrap_or(usize::MAX);
        let end = start.saturating_add(self.visible_bar_count(surface_width)).min(total_bars);
        VisibleRange::new(start, end)
    }
}

/// Price-to-pixel mapping for one repaint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub bounds: PriceBounds,
    pub height: f64,
}

impl PriceScale {
    pub fn new(bounds: PriceBounds, height: f64) -> Self {
        Self { bounds, height }
    }

    /// `min` maps to the bottom edge, `max` to the top. Flat bounds map to the middle.
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.bounds.is_degenerate() {
            return self.height / 2.0;
        }
        self.height - ((price - self.bounds.min) / self.bounds.span()) * self.height
    }

    /// `count` evenly spaced prices from `min` to `max` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.bounds.min],
            _ => {
                let step = self.bounds.span() / (count - 1) as f64;
                (0..count).map(|i| self.bounds.min + i as f64 * step).collect()
            }
        }
    }
}

/// Outcome of the bar fetch, shown while the series is empty
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready {
        bars: usize,
    },
    Failed {
        reason: String,
    },
}

impl LoadStatus {
    pub fn message(&self) -> String {
        match self {
            LoadStatus::Loading => "Loading bars...".to_string(),
            LoadStatus::Ready { bars: 0 } => "No bars loaded".to_string(),
            LoadStatus::Ready { bars } => format!("{} bars loaded", bars),
            LoadStatus::Failed { reason } => format!("Failed to load bars: {}", reason),
        }
    }
}
