use super::geometry::{CandleGeometry, project_window};
use super::price_axis::price_labels;
use super::surface::DrawSurface;
use crate::config::ChartStyle;
use crate::domain::chart::{ChartState, PriceScale, VisibleRange};
use crate::domain::errors::RenderingResult;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{CandleDirection, PriceBounds};
use crate::log_trace;

/// Gap between the title baseline and the status line.
const STATUS_LINE_OFFSET: f64 = 30.0;

/// Summary of one full repaint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub range: VisibleRange,
    pub candles: usize,
    pub scale: Option<PriceScale>,
}

/// Stateless full-redraw painter for candlesticks and chrome.
#[derive(Debug, Clone, Default)]
pub struct CandleRenderer {
    style: ChartStyle,
}

impl CandleRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Clear, resize to the container, then paint bars, title and labels.
    ///
    /// Without bars the label column sits at mid-height and a status line
    /// follows the title.
    pub fn render<S: DrawSurface>(&self, surface: &mut S, state: &ChartState) -> RenderingResult<FrameStats> {
        let current = surface.size();
        surface.clear_rect(0.0, 0.0, current.width as f64, current.height as f64)?;
        surface.resize(state.container)?;

        let range = state.visible_range();
        let scale = if state.bars.is_empty() { None } else { state.price_scale() };

        let mut candles = 0;
        if let Some(scale) = &scale {
            let geometry = project_window(state.visible_bars(), range, scale, state.viewport.bar_width);
            for candle in &geometry {
                self.paint_candle(surface, candle)?;
            }
            candles = geometry.len();
        }

        self.paint_title(surface)?;
        match &scale {
            Some(scale) => self.paint_price_labels(surface, scale)?,
            None => {
                // No bounds to scale against: keep the axis, collapsed to the middle.
                let flat = PriceScale::new(PriceBounds::new(0.0, 0.0), state.container.height as f64);
                self.paint_price_labels(surface, &flat)?;
                self.paint_status(surface, state)?;
            }
        }

        log_trace!(
            LogComponent::Infrastructure("CandleRenderer"),
            "painted {} candles in [{}, {})",
            candles,
            range.start,
            range.end
        );

        Ok(FrameStats { range, candles, scale })
    }

    fn paint_candle<S: DrawSurface>(&self, surface: &mut S, candle: &CandleGeometry) -> RenderingResult<()> {
        surface.stroke_line((candle.wick_x, candle.high_y), (candle.wick_x, candle.low_y), &self.style.wick_color)?;
        surface.fill_rect(candle.x, candle.body_top, candle.width, candle.body_height, self.body_color(candle.direction))
    }

    pub fn body_color(&self, direction: CandleDirection) -> &str {
        match direction {
            CandleDirection::Up => &self.style.up_color,
            CandleDirection::Down => &self.style.down_color,
        }
    }

    fn paint_title<S: DrawSurface>(&self, surface: &mut S) -> RenderingResult<()> {
        let (x, y) = self.style.title_position;
        surface.fill_text(&self.style.title, x, y, &self.style.title_font, &self.style.text_color)
    }

    fn paint_price_labels<S: DrawSurface>(&self, surface: &mut S, scale: &PriceScale) -> RenderingResult<()> {
        for label in price_labels(scale, self.style.price_label_count, self.style.price_precision) {
            surface.fill_text(&label.text, self.style.label_x, label.y, &self.style.label_font, &self.style.text_color)?;
        }
        Ok(())
    }

    fn paint_status<S: DrawSurface>(&self, surface: &mut S, state: &ChartState) -> RenderingResult<()> {
        let (x, y) = self.style.title_position;
        surface.fill_text(
            &state.status.message(),
            x,
            y + STATUS_LINE_OFFSET,
            &self.style.label_font,
            &self.style.text_color,
        )
    }
}
