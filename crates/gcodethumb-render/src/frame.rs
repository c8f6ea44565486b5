//! Frame rendering pipeline
//!
//! 1. No color policy: nothing happens.
//! 2. Geometry is extracted from the toolpath text.
//! 3. Geometry with no X/Y extent: nothing happens.
//! 4. The surface is cleared and filled with [`BACKGROUND`].
//! 5. Each segment whose category has a color is drawn, in order.

use crate::color::{Category, Color, ColorPolicy};
use crate::error::RenderError;
use crate::scale::ScaleContext;
use crate::segment::draw_segment;
use crate::surface::{DrawingSurface, PixelRect};
use gcodethumb_geometry::{GeometryModel, GeometrySource, ToolpathParser};
use tracing::{debug, trace};

/// Background color painted under every rendered frame
pub const BACKGROUND: Color = Color::WHITE;

/// Per-frame segment counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Segments that reached the surface
    pub drawn: usize,
    /// Segments whose category has no color, or arcs without pieces
    pub suppressed: usize,
    /// Segments with an unknown type tag
    pub unknown: usize,
}

/// What a render call did to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No color policy was given; the surface was not touched
    NoColorPolicy,
    /// The geometry has no X/Y extent; the surface was not touched
    DegenerateGeometry,
    /// The frame was painted
    Rendered(RenderStats),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    pub fn stats(&self) -> Option<RenderStats> {
        match self {
            RenderOutcome::Rendered(stats) => Some(*stats),
            _ => None,
        }
    }
}

/// Renders toolpath text onto a surface
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer<G = ToolpathParser> {
    source: G,
}

impl FrameRenderer<ToolpathParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: GeometrySource> FrameRenderer<G> {
    /// Renderer that takes its geometry from `source`
    pub fn with_source(source: G) -> Self {
        Self { source }
    }

    /// Render one full frame of `toolpath` onto `surface`.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        toolpath: &str,
        colors: Option<&ColorPolicy>,
        surface: &mut S,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(colors) = colors else {
            debug!("No color policy given, skipping render");
            return Ok(RenderOutcome::NoColorPolicy);
        };

        let model = self.source.extract(toolpath)?;
        Ok(render_model(&model, Some(colors), surface))
    }
}

/// Render an already extracted model onto `surface`.
pub fn render_model<S: DrawingSurface + ?Sized>(
    model: &GeometryModel,
    colors: Option<&ColorPolicy>,
    surface: &mut S,
) -> RenderOutcome {
    let Some(colors) = colors else {
        debug!("No color policy given, skipping render");
        return RenderOutcome::NoColorPolicy;
    };

    let bbox = model.bounding_box;
    if bbox.is_degenerate() {
        debug!("Geometry has no X/Y extent, skipping render");
        return RenderOutcome::DegenerateGeometry;
    }

    let full = PixelRect::covering(&*surface);
    surface.clear_rect(full);
    surface.fill_rect(full, BACKGROUND);

    let ctx = ScaleContext::fit(&bbox, surface.width(), surface.height());
    debug!(
        "Rendering {} segments at ratio {:.4} onto {}x{}",
        model.segments.len(),
        ctx.ratio,
        full.width,
        full.height
    );

    let mut stats = RenderStats::default();
    for segment in &model.segments {
        let Some(category) = Category::of(segment) else {
            trace!("Skipping unknown segment {}", segment.code());
            stats.unknown += 1;
            continue;
        };
        match colors.color_for(category) {
            Some(color) if draw_segment(surface, &ctx, segment, color) => stats.drawn += 1,
            _ => stats.suppressed += 1,
        }
    }

    debug!(
        "Frame done: {} drawn, {} suppressed, {} unknown",
        stats.drawn, stats.suppressed, stats.unknown
    );
    RenderOutcome::Rendered(stats)
}
