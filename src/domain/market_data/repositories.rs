use crate::domain::errors::AppError;
use crate::domain::market_data::Bar;

/// Interface for the opaque bar provider.
///
/// Implementations resolve once with the full chronological sequence or a
/// transport/payload error. Futures run on the UI thread, so no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait BarSource {
    async fn fetch_bars(&self) -> Result<Vec<Bar>, AppError>;

    /// Human-readable origin for log lines.
    fn describe(&self) -> String;
}
