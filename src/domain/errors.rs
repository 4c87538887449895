use derive_more::Display;

/// Flat error taxonomy for the whole chart.
///
/// Degenerate math (empty series, flat market) and a not-yet-mounted
/// surface are normal states and never show up here.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Malformed Data: {}", _0)]
    MalformedData(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
}

impl std::error::Error for AppError {}

impl AppError {
    /// Short tag used in log lines and the status overlay.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(_) => "network",
            AppError::MalformedData(_) => "malformed-data",
            AppError::Rendering(_) => "rendering",
            AppError::Validation(_) => "validation",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedData(err.to_string())
    }
}

pub type NetworkResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
