use super::surface::DrawSurface;
use crate::domain::chart::SurfaceSize;
use crate::domain::errors::{AppError, RenderingResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `DrawSurface` over a browser canvas and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of an already mounted canvas.
    pub fn new(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| js_error("Failed to get 2D context", e))?
            .ok_or_else(|| AppError::Rendering("Canvas has no 2D context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))?;

        Ok(Self { canvas, context })
    }

    /// Same underlying element, used to detect a remounted canvas.
    pub fn is_backed_by(&self, canvas: &HtmlCanvasElement) -> bool {
        self.canvas == *canvas
    }
}

fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::Rendering(format!("{}: {:?}", context, err))
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, size: SurfaceSize) -> RenderingResult<()> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> RenderingResult<()> {
        self.context.clear_rect(x, y, width, height);
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str) -> RenderingResult<()> {
        self.context.set_stroke_style_str(color);
        self.context.begin_path();
        self.context.move_to(from.0, from.1);
        self.context.line_to(to.0, to.1);
        self.context.stroke();
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> RenderingResult<()> {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(x, y, width, height);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) -> RenderingResult<()> {
        self.context.set_fill_style_str(color);
        self.context.set_font(font);
        self.context.fill_text(text, x, y).map_err(|e| js_error("fillText failed", e))
    }
}
