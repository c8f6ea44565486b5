//! Unit conversion utilities
//!
//! Toolpath geometry is kept in millimetres; G20 programs are converted
//! while they are parsed.

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Length units selected by G20 / G21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Millimeters (G21)
    #[default]
    Millimeters,
    /// Inches (G20)
    Inches,
}

impl Units {
    /// Convert a value from one unit to another
    pub fn convert(value: f64, from: Units, to: Units) -> f64 {
        match (from, to) {
            (Units::Millimeters, Units::Inches) => value / MM_PER_INCH,
            (Units::Inches, Units::Millimeters) => value * MM_PER_INCH,
            _ => value,
        }
    }

    /// Convert a value expressed in these units to millimetres
    #[inline]
    pub fn to_millimeters(self, value: f64) -> f64 {
        Self::convert(value, self, Units::Millimeters)
    }
}
