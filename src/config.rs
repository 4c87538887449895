//! Runtime configuration.
//!
//! Every field has a default, so a host page can pass a partial JSON object
//! (or nothing at all) to `run_app_with_config`.

use crate::domain::chart::{AutoscaleMode, DEFAULT_BAR_WIDTH, ScrollPolicy, ViewportState};
use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub bar_width: f64,
    pub autoscale: AutoscaleMode,
    pub scroll_policy: ScrollPolicy,
    pub style: ChartStyle,
    pub source: SourceConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            autoscale: AutoscaleMode::Global,
            scroll_policy: ScrollPolicy::Unbounded,
            style: ChartStyle::default(),
            source: SourceConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: ChartConfig =
            serde_json::from_str(json).map_err(|e| AppError::Validation(format!("invalid chart config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        ViewportState::default().with_bar_width(self.bar_width)?;
        if self.style.price_label_count < 2 {
            return Err(AppError::Validation(format!(
                "price_label_count must be at least 2, got {}",
                self.style.price_label_count
            )));
        }
        if self.source.timeout_ms == 0 {
            return Err(AppError::Validation("source timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn initial_viewport(&self) -> Result<ViewportState, AppError> {
        ViewportState::default().with_bar_width(self.bar_width)
    }
}

/// Colours, fonts and chrome placement. Colours are CSS colour strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartStyle {
    pub title: String,
    pub up_color: String,
    pub down_color: String,
    pub wick_color: String,
    pub text_color: String,
    pub title_font: String,
    pub label_font: String,
    pub title_position: (f64, f64),
    pub label_x: f64,
    pub price_label_count: usize,
    pub price_precision: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Forex Market Chart - EURUSD".to_string(),
            up_color: "green".to_string(),
            down_color: "red".to_string(),
            wick_color: "black".to_string(),
            text_color: "black".to_string(),
            title_font: "20px Arial".to_string(),
            label_font: "16px Arial".to_string(),
            title_position: (10.0, 40.0),
            label_x: 10.0,
            price_label_count: 6,
            price_precision: 2,
        }
    }
}

/// Query parameters of the chunked bars endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub base_url: String,
    pub broker: String,
    pub symbol: String,
    pub timeframe: u32,
    pub start: u64,
    pub end: u64,
    pub use_message_pack: bool,
    pub timeout_ms: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://beta.forextester.com/data/api/Metadata/bars/chunked".to_string(),
            broker: "Advanced".to_string(),
            symbol: "EURUSD".to_string(),
            timeframe: 1,
            start: 57674,
            end: 59113,
            use_message_pack: false,
            timeout_ms: 30_000,
        }
    }
}

impl SourceConfig {
    pub fn url(&self) -> String {
        format!(
            "{}?Broker={}&Symbol={}&Timeframe={}&Start={}&End={}&UseMessagePack={}",
            self.base_url, self.broker, self.symbol, self.timeframe, self.start, self.end, self.use_message_pack
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_matches_endpoint() {
        assert_eq!(
            SourceConfig::default().url(),
            "https://beta.forextester.com/data/api/Metadata/bars/chunked?Broker=Advanced&Symbol=EURUSD&Timeframe=1&Start=57674&End=59113&UseMessagePack=false"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(r#"{"bar_width": 6, "source": {"symbol": "GBPUSD"}}"#).unwrap();
        assert_eq!(config.bar_width, 6.0);
        assert_eq!(config.source.symbol, "GBPUSD");
        assert_eq!(config.source.broker, "Advanced");
        assert_eq!(config.style, ChartStyle::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(ChartConfig::from_json(r#"{"bar_width": 0}"#), Err(AppError::Validation(_))));
        assert!(ChartConfig::from_json(r#"{"style": {"price_label_count": 1}}"#).is_err());
        assert!(ChartConfig::from_json(r#"{"zoom": 2}"#).is_err());
        assert!(ChartConfig::from_json(r#"{"autoscale": "visible"}"#).is_ok());
    }
}
