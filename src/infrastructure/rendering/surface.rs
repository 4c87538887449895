//! Immediate-mode 2D drawing target.
//!
//! `CanvasSurface` backs this with a browser canvas; `RecordingSurface`
//! keeps the commands in memory for headless runs and tests.

use crate::domain::chart::SurfaceSize;
use crate::domain::errors::RenderingResult;
use std::fmt;

pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;

    fn resize(&mut self, size: SurfaceSize) -> RenderingResult<()>;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> RenderingResult<()>;

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str) -> RenderingResult<()>;

    /// `height` is expected to be non-negative; callers normalise first.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> RenderingResult<()>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) -> RenderingResult<()>;
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { x: f64, y: f64, width: f64, height: f64 },
    Resize(SurfaceSize),
    Line { from: (f64, f64), to: (f64, f64), color: String },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: String },
    Text { text: String, x: f64, y: f64, font: String, color: String },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Clear { x, y, width, height } => {
                write!(f, "clear {:.1},{:.1} {:.1}x{:.1}", x, y, width, height)
            }
            DrawCommand::Resize(size) => write!(f, "resize {}x{}", size.width, size.height),
            DrawCommand::Line { from, to, color } => {
                write!(f, "line {:.1},{:.1} -> {:.1},{:.1} {}", from.0, from.1, to.0, to.1, color)
            }
            DrawCommand::FillRect { x, y, width, height, color } => {
                write!(f, "rect {:.1},{:.1} {:.1}x{:.1} {}", x, y, width, height, color)
            }
            DrawCommand::Text { text, x, y, font, color } => {
                write!(f, "text {:?} {:.1},{:.1} {} {}", text, x, y, font, color)
            }
        }
    }
}

/// Headless surface that logs every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self { size, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of full repaints seen so far (each one starts with a clear).
    pub fn repaint_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Clear { .. })).count()
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// One command per line, in `Display` form.
    pub fn transcript(&self) -> String {
        self.commands.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> RenderingResult<()> {
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Clear { x, y, width, height });
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Line { from, to, color: color.to_string() });
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color: color.to_string() });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
        });
        Ok(())
    }
}
