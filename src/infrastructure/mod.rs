//! Browser-facing adapters: HTTP source, canvas drawing, DOM listeners and
//! console logging.

pub mod dom;
pub mod http;
pub mod rendering;
pub mod services;

pub use http::ForexTesterClient;
