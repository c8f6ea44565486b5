//! # gcodethumb Geometry
//!
//! Turns G-code toolpath text into a [`GeometryModel`]: an ordered list of
//! straight and curved segments plus the bounding box of all motion.
//! Arcs are resolved into cubic bezier pieces so consumers never deal with
//! arc direction, planes or centre formats.

pub mod arc;
pub mod model;
pub mod parser;

pub use arc::{ArcCenter, ArcError, ArcMove, Plane};
pub use gcodethumb_core::GcodeError;
pub use model::{ArcKind, CubicBezier, GeometryModel, Segment, StraightKind};
pub use parser::ToolpathParser;

/// Anything that can extract geometry from toolpath text
pub trait GeometrySource {
    fn extract(&self, toolpath: &str) -> Result<GeometryModel, GcodeError>;
}

impl GeometrySource for ToolpathParser {
    fn extract(&self, toolpath: &str) -> Result<GeometryModel, GcodeError> {
        self.parse(toolpath)
    }
}

impl<F> GeometrySource for F
where
    F: Fn(&str) -> Result<GeometryModel, GcodeError>,
{
    fn extract(&self, toolpath: &str) -> Result<GeometryModel, GcodeError> {
        self(toolpath)
    }
}

/// Parse toolpath text with the default parser settings
pub fn parse(toolpath: &str) -> Result<GeometryModel, GcodeError> {
    ToolpathParser::default().parse(toolpath)
}

/// Read and parse a toolpath file
pub fn parse_file(path: impl AsRef<std::path::Path>) -> gcodethumb_core::Result<GeometryModel> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(parse(&text)?)
}
