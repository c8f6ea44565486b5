//! Error handling for gcodethumb
//!
//! Provides the error types raised while turning toolpath text into geometry:
//! - G-Code errors (syntax, missing parameters, impossible arcs)
//! - A unified [`Error`] for callers that mix G-code and I/O failures
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors related to G-Code parsing and arc resolution.
/// Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Invalid G-Code syntax
    #[error("Invalid syntax at line {line_number}: {reason}")]
    InvalidSyntax {
        /// The line number where the syntax error occurred.
        line_number: u32,
        /// The reason for the syntax error.
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' at line {line_number}: {reason}")]
    InvalidParameter {
        /// The line number where the invalid parameter was found.
        line_number: u32,
        /// The parameter name.
        param: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// Missing required parameter
    #[error("Missing required parameter '{param}' at line {line_number}")]
    MissingParameter {
        /// The line number where the parameter was missing.
        line_number: u32,
        /// The name of the missing parameter.
        param: String,
    },

    /// Arc cannot be resolved into a circle
    #[error("Invalid arc at line {line_number}: {reason}")]
    InvalidArc {
        /// The line number of the arc command.
        line_number: u32,
        /// Why the arc geometry is impossible.
        reason: String,
    },
}

impl GcodeError {
    /// Line number the error refers to
    pub fn line_number(&self) -> u32 {
        match self {
            GcodeError::InvalidSyntax { line_number, .. }
            | GcodeError::InvalidParameter { line_number, .. }
            | GcodeError::MissingParameter { line_number, .. }
            | GcodeError::InvalidArc { line_number, .. } => *line_number,
        }
    }
}

/// Main error type for gcodethumb
///
/// A unified error type for callers that read toolpaths from disk.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::InvalidSyntax {
            line_number: 3,
            reason: "Unexpected 'Xabc'".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid syntax at line 3: Unexpected 'Xabc'");

        let err = GcodeError::MissingParameter {
            line_number: 7,
            param: "I/J/K or R".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required parameter 'I/J/K or R' at line 7"
        );
    }

    #[test]
    fn test_line_number_accessor() {
        let err = GcodeError::InvalidArc {
            line_number: 12,
            reason: "zero radius".to_string(),
        };
        assert_eq!(err.line_number(), 12);
    }

    #[test]
    fn test_error_conversion() {
        let gcode_err = GcodeError::InvalidSyntax {
            line_number: 1,
            reason: "bad".to_string(),
        };
        let err: Error = gcode_err.into();
        assert!(err.is_gcode_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(!err.is_gcode_error());
        assert!(matches!(err, Error::Io(_)));
    }
}
