pub mod candle_renderer;
pub mod canvas_surface;
pub mod geometry;
pub mod price_axis;
pub mod surface;

pub use candle_renderer::{CandleRenderer, FrameStats};
pub use canvas_surface::CanvasSurface;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
