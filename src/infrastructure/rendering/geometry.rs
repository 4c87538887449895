//! Pixel geometry for the visible candles.

use crate::domain::chart::{PriceScale, VisibleRange};
use crate::domain::market_data::{Bar, CandleDirection};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Candle count from which projection is spread over the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Pre-computed drawing data for one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    /// Series index of the bar.
    pub index: usize,
    /// Left edge of the slot.
    pub x: f64,
    pub width: f64,
    pub wick_x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub open_y: f64,
    pub close_y: f64,
    /// Body rectangle normalised to a non-negative height.
    pub body_top: f64,
    pub body_height: f64,
    pub direction: CandleDirection,
}

/// Geometry of the bar at series index `index`, drawn in slot `slot`.
pub fn project_candle(index: usize, slot: usize, bar: &Bar, scale: &PriceScale, bar_width: f64) -> CandleGeometry {
    let x = slot as f64 * bar_width;
    let open_y = scale.price_to_y(bar.open());
    let close_y = scale.price_to_y(bar.close());

    CandleGeometry {
        index,
        x,
        width: bar_width,
        wick_x: x + bar_width / 2.0,
        high_y: scale.price_to_y(bar.high()),
        low_y: scale.price_to_y(bar.low()),
        open_y,
        close_y,
        body_top: open_y.min(close_y),
        body_height: (close_y - open_y).abs(),
        direction: bar.direction(),
    }
}

/// Left-to-right geometry for `window`, the bars covered by `range`.
pub fn project_window(window: &[Bar], range: VisibleRange, scale: &PriceScale, bar_width: f64) -> Vec<CandleGeometry> {
    let project = |(slot, bar): (usize, &Bar)| project_candle(range.start + slot, slot, bar, scale, bar_width);

    #[cfg(feature = "parallel")]
    if window.len() >= PARALLEL_THRESHOLD {
        return window.par_iter().enumerate().map(project).collect();
    }

    window.iter().enumerate().map(project).collect()
}
