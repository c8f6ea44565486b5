//! # gcodethumb Render
//!
//! Draws a [`GeometryModel`](gcodethumb_geometry::GeometryModel) onto a
//! [`DrawingSurface`], scaled to fit while keeping the aspect ratio.
//!
//! - [`scale`]: fit ratio from the bounding box and surface size
//! - [`mapper`]: model space to pixel space, Y axis flipped
//! - [`segment`]: straight and bezier segment drawing
//! - [`color`]: per-category color policy
//! - [`frame`]: the full frame pipeline
//! - [`surface`]: tiny-skia and recording surfaces

pub mod color;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod scale;
pub mod segment;
pub mod surface;

pub use color::{Category, Color, ColorError, ColorPolicy};
pub use error::{RenderError, SurfaceError};
pub use frame::{render_model, FrameRenderer, RenderOutcome, RenderStats, BACKGROUND};
pub use mapper::{map_point, PixelPoint};
pub use scale::{fit_ratio, ScaleContext};
pub use segment::{draw_segment, STROKE_WIDTH};
pub use surface::{
    DrawCommand, DrawingSurface, PixelRect, PixmapSurface, RecordingSurface,
};
