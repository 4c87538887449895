use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay};

/// Value Object - price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Display, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - epoch milliseconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Display, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    /// Feeds report seconds; the chart works in milliseconds.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Value Object - OHLC prices of one interval
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Ohlc {
    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close].iter().all(Price::is_finite)
    }

    /// `low <= min(open, close) <= max(open, close) <= high`, all finite.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.low.value() <= self.open.value().min(self.close.value())
            && self.open.value().max(self.close.value()) <= self.high.value()
    }
}

/// Candle colour class. A flat candle (`close == open`) counts as down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr)]
pub enum CandleDirection {
    #[strum(serialize = "up")]
    Up,
    #[strum(serialize = "down")]
    Down,
}

impl CandleDirection {
    pub fn of(open: f64, close: f64) -> Self {
        if close > open { Self::Up } else { Self::Down }
    }
}
