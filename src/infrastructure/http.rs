use crate::config::SourceConfig;
use crate::domain::{
    errors::{AppError, NetworkResult},
    logging::LogComponent,
    market_data::{Bar, BarSource, Ohlc, Price, Timestamp, check_sequence, count_inconsistent},
};
use crate::{log_info, log_warn};
use futures::future::{Either, select};
use gloo::net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;

/// One chunk of the `bars/chunked` payload
#[derive(Debug, Deserialize)]
pub struct BarSegmentDto {
    #[serde(rename = "Bars")]
    pub bars: Vec<BarDto>,
}

/// Wire shape of a bar; `Time` is in epoch seconds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BarDto {
    #[serde(rename = "Time")]
    pub time: i64,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
}

impl From<BarDto> for Bar {
    fn from(dto: BarDto) -> Self {
        Bar::new(
            Timestamp::from_secs(dto.time),
            Ohlc::new(Price::from(dto.open), Price::from(dto.high), Price::from(dto.low), Price::from(dto.close)),
        )
    }
}

/// Flatten every segment's bars in order, converting seconds to milliseconds.
///
/// Missing fields, wrong shapes, non-finite prices and times going backwards
/// are reported as `MalformedData`.
pub fn parse_segments(body: &str) -> NetworkResult<Vec<Bar>> {
    let segments: Vec<BarSegmentDto> = serde_json::from_str(body)?;
    let bars: Vec<Bar> = segments.into_iter().flat_map(|s| s.bars).map(Bar::from).collect();
    check_sequence(&bars)?;

    let inconsistent = count_inconsistent(&bars);
    if inconsistent > 0 {
        log_warn!(
            LogComponent::Infrastructure("ForexTesterClient"),
            "{} of {} bars break low <= open/close <= high",
            inconsistent,
            bars.len()
        );
    }
    Ok(bars)
}

/// Client for the ForexTester chunked bars endpoint
#[derive(Debug, Clone, Default)]
pub struct ForexTesterClient {
    config: SourceConfig,
}

impl ForexTesterClient {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn url(&self) -> String {
        self.config.url()
    }

    async fn request(&self, url: &str) -> NetworkResult<Vec<Bar>> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(AppError::Network(format!("HTTP error! status: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read body: {}", e)))?;

        parse_segments(&body)
    }
}

impl BarSource for ForexTesterClient {
    async fn fetch_bars(&self) -> Result<Vec<Bar>, AppError> {
        let url = self.url();
        log_info!(LogComponent::Infrastructure("ForexTesterClient"), "📡 Fetching bars: {}", url);

        let request = Box::pin(self.request(&url));
        let timeout = Box::pin(TimeoutFuture::new(self.config.timeout_ms));

        let bars = match select(request, timeout).await {
            Either::Left((result, _)) => result?,
            Either::Right(((), _)) => {
                return Err(AppError::Network(format!("request timed out after {} ms", self.config.timeout_ms)));
            }
        };

        log_info!(LogComponent::Infrastructure("ForexTesterClient"), "✅ Successfully fetched {} bars", bars.len());
        Ok(bars)
    }

    fn describe(&self) -> String {
        format!("{} {}@{}", self.config.broker, self.config.symbol, self.config.base_url)
    }
}
