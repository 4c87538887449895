pub use super::value_objects::{CandleDirection, Ohlc, Price, Timestamp};
use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::rc::Rc;

/// Domain entity - one OHLC observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: Timestamp,
    pub ohlc: Ohlc,
}

impl Bar {
    pub fn new(time: Timestamp, ohlc: Ohlc) -> Self {
        Self { time, ohlc }
    }

    /// Shorthand used by fixtures and the HTTP mapper.
    pub fn from_values(time_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self::new(
            Timestamp::from_millis(time_ms),
            Ohlc::new(Price::from(open), Price::from(high), Price::from(low), Price::from(close)),
        )
    }

    pub fn open(&self) -> f64 {
        self.ohlc.open.value()
    }

    pub fn high(&self) -> f64 {
        self.ohlc.high.value()
    }

    pub fn low(&self) -> f64 {
        self.ohlc.low.value()
    }

    pub fn close(&self) -> f64 {
        self.ohlc.close.value()
    }

    pub fn direction(&self) -> CandleDirection {
        CandleDirection::of(self.open(), self.close())
    }

    pub fn is_bullish(&self) -> bool {
        self.direction() == CandleDirection::Up
    }
}

/// Min/max price over a set of bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lowest low and highest high; `None` for an empty slice.
    pub fn of(bars: &[Bar]) -> Option<Self> {
        let (first, rest) = bars.split_first()?;
        let seed = Self::new(first.low(), first.high());
        Some(rest.iter().fold(seed, |acc, bar| {
            Self::new(acc.min.min(bar.low()), acc.max.max(bar.high()))
        }))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Flat market or single-price series.
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || span == 0.0
    }
}

/// Prices are finite and times never go backwards.
pub fn check_sequence(bars: &[Bar]) -> Result<(), AppError> {
    if let Some(index) = bars.iter().position(|bar| !bar.ohlc.is_finite()) {
        return Err(AppError::MalformedData(format!("bar {} has a non-finite price", index)));
    }
    if let Some(index) = bars.windows(2).position(|pair| pair[1].time < pair[0].time) {
        return Err(AppError::MalformedData(format!("bar {} is older than its predecessor", index + 1)));
    }
    Ok(())
}

/// Bars breaking `low <= open/close <= high`. Feeds occasionally ship these;
/// they are drawn as delivered.
pub fn count_inconsistent(bars: &[Bar]) -> usize {
    bars.iter().filter(|bar| !bar.ohlc.is_valid()).count()
}

/// Domain entity - the loaded bar sequence.
///
/// Shared and immutable: a reload builds a new series instead of patching
/// this one, so the cached bounds can never go stale.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Rc<[Bar]>,
    bounds: Option<PriceBounds>,
}

impl PartialEq for BarSeries {
    fn eq(&self, other: &Self) -> bool {
        self.bars == other.bars
    }
}

impl BarSeries {
    /// Accepts bars as delivered; ordering and OHLC shape are the source's job.
    pub fn new(bars: Vec<Bar>) -> Self {
        let bounds = PriceBounds::of(&bars);
        Self { bars: bars.into(), bounds }
    }

    /// Builds a series after checking prices and time ordering.
    pub fn validated(bars: Vec<Bar>) -> Result<Self, AppError> {
        check_sequence(&bars)?;
        Ok(Self::new(bars))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Bars inside `range`; out-of-range windows yield an empty slice.
    pub fn window(&self, range: Range<usize>) -> &[Bar] {
        self.bars.get(range).unwrap_or(&[])
    }

    /// Bounds over the whole series, computed once at construction.
    pub fn bounds(&self) -> Option<PriceBounds> {
        self.bounds
    }
}
