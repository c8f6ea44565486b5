//! Render error types

use gcodethumb_core::GcodeError;
use thiserror::Error;

/// Errors raised while rendering a frame
///
/// Missing colors and empty geometry are not errors; see
/// [`RenderOutcome`](crate::RenderOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The toolpath could not be turned into geometry
    #[error("Geometry extraction failed: {0}")]
    Geometry(#[from] GcodeError),
}

/// Errors raised while creating a drawing surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Zero on either axis, or too large to allocate as one pixmap
    #[error("Invalid surface dimensions {width}x{height}: must be non-zero and within the pixmap size limit")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_wraps_line() {
        let err: RenderError = GcodeError::InvalidSyntax {
            line_number: 4,
            reason: "Unexpected '#'".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Geometry extraction failed: Invalid syntax at line 4: Unexpected '#'"
        );
    }

    #[test]
    fn test_surface_error_display() {
        let err = SurfaceError::InvalidDimensions {
            width: 0,
            height: 200,
        };
        assert_eq!(
            err.to_string(),
            "Invalid surface dimensions 0x200: must be non-zero and within the pixmap size limit"
        );
    }
}
