//! Single segment drawing

use crate::color::Color;
use crate::mapper::map_point;
use crate::scale::ScaleContext;
use crate::surface::DrawingSurface;
use gcodethumb_core::Point;
use gcodethumb_geometry::{CubicBezier, Segment};

/// Stroke width in pixels for every segment
pub const STROKE_WIDTH: f32 = 2.0;

/// Draw one segment in `color`. Returns false if nothing was drawn.
pub fn draw_segment<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    ctx: &ScaleContext,
    segment: &Segment,
    color: Color,
) -> bool {
    match segment {
        Segment::Straight { start, end, .. } => {
            draw_straight(surface, ctx, start, end, color);
            true
        }
        Segment::Curved { beziers, .. } => draw_curved(surface, ctx, beziers, color),
        Segment::Unknown { .. } => false,
    }
}

pub fn draw_straight<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    ctx: &ScaleContext,
    start: &Point,
    end: &Point,
    color: Color,
) {
    surface.begin_path();
    surface.move_to(map_point(ctx, start));
    surface.line_to(map_point(ctx, end));
    surface.stroke(color, STROKE_WIDTH);
}

/// Draw all pieces of an arc as one path with a single stroke.
pub fn draw_curved<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    ctx: &ScaleContext,
    beziers: &[CubicBezier],
    color: Color,
) -> bool {
    if beziers.is_empty() {
        return false;
    }

    surface.begin_path();
    let mut pen = None;
    for piece in beziers {
        let from = map_point(ctx, &piece.p0);
        if pen != Some(from) {
            surface.move_to(from);
        }
        let to = map_point(ctx, &piece.p3);
        surface.bezier_curve_to(map_point(ctx, &piece.p1), map_point(ctx, &piece.p2), to);
        pen = Some(to);
    }
    surface.stroke(color, STROKE_WIDTH);
    true
}
