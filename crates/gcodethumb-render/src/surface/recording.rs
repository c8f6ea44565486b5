use super::{DrawingSurface, PixelRect};
use crate::color::Color;
use crate::mapper::PixelPoint;

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect(PixelRect),
    FillRect(PixelRect, Color),
    BeginPath,
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    BezierCurveTo {
        c1: PixelPoint,
        c2: PixelPoint,
        to: PixelPoint,
    },
    Stroke {
        color: Color,
        width: f32,
    },
}

/// Surface that records calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count()
    }

    pub fn is_untouched(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: PixelPoint) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: PixelPoint) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn bezier_curve_to(&mut self, c1: PixelPoint, c2: PixelPoint, to: PixelPoint) {
        self.commands.push(DrawCommand::BezierCurveTo { c1, c2, to });
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }
}
