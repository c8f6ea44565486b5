//! G-code toolpath parser
//!
//! Reads toolpath text line by line, tracks the modal state that affects
//! motion (motion mode, arc plane, distance mode, units) and emits one
//! [`Segment`] per motion line. Everything that does not move the tool
//! (feeds, spindle, tool changes, M codes) is skipped.

use crate::arc::{ArcCenter, ArcMove, Plane};
use crate::model::{ArcKind, GeometryModel, Segment, StraightKind};
use gcodethumb_core::{GcodeError, Point, Units};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| Regex::new(r"\([^)]*\)?|;.*").expect("invalid regex pattern"))
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z])\s*([+-]?(?:\d+\.?\d*|\.\d+))").expect("invalid regex pattern")
    })
}

/// Active motion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Straight(StraightKind),
    Arc(ArcKind),
}

/// Non-modal G codes whose axis words are not a motion target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NonModal {
    /// G92: the axis words name the current position in new coordinates
    SetPosition,
    /// G10, G28, G30, G53, G92.x: no drawable motion in work coordinates
    Skip,
}

/// Modal state carried between lines of a single parse
#[derive(Debug, Clone)]
struct ModalState {
    motion: Option<Motion>,
    plane: Plane,
    absolute: bool,
    units: Units,
    position: Point,
}

impl ModalState {
    fn new(units: Units) -> Self {
        Self {
            motion: Some(Motion::Straight(StraightKind::Rapid)),
            plane: Plane::Xy,
            absolute: true,
            units,
            position: Point::ORIGIN,
        }
    }

    fn apply_g(&mut self, value: f64) -> Option<NonModal> {
        match (value * 10.0).round() as i64 {
            920 => return Some(NonModal::SetPosition),
            100 | 280 | 281 | 300 | 301 | 530 | 921..=923 => return Some(NonModal::Skip),
            0 => self.motion = Some(Motion::Straight(StraightKind::Rapid)),
            10 => self.motion = Some(Motion::Straight(StraightKind::Linear)),
            20 => self.motion = Some(Motion::Arc(ArcKind::Clockwise)),
            30 => self.motion = Some(Motion::Arc(ArcKind::CounterClockwise)),
            170 => self.plane = Plane::Xy,
            180 => self.plane = Plane::Zx,
            190 => self.plane = Plane::Yz,
            200 => self.units = Units::Inches,
            210 => self.units = Units::Millimeters,
            800 => self.motion = None,
            900 => self.absolute = true,
            910 => self.absolute = false,
            _ => trace!("Ignoring G{}", value),
        }
        None
    }

    fn axis(&self, current: f64, word: Option<f64>) -> f64 {
        match word {
            Some(v) if self.absolute => self.units.to_millimeters(v),
            Some(v) => current + self.units.to_millimeters(v),
            None => current,
        }
    }

    /// Position after G92: named axes take the given values, G91 does not apply
    fn rebased(&self, words: &Words) -> Point {
        let set = |current: f64, word: Option<f64>| {
            word.map_or(current, |v| self.units.to_millimeters(v))
        };
        Point::new(
            set(self.position.x, words.x),
            set(self.position.y, words.y),
            set(self.position.z, words.z),
        )
    }

    fn target(&self, words: &Words) -> Point {
        Point::new(
            self.axis(self.position.x, words.x),
            self.axis(self.position.y, words.y),
            self.axis(self.position.z, words.z),
        )
    }
}

/// Words of one line that matter for motion
#[derive(Debug, Default)]
struct Words {
    g: Vec<f64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    i: Option<f64>,
    j: Option<f64>,
    k: Option<f64>,
    r: Option<f64>,
}

impl Words {
    fn has_axis(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    fn has_offsets(&self) -> bool {
        self.i.is_some() || self.j.is_some() || self.k.is_some()
    }
}

/// Toolpath text to [`GeometryModel`] extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolpathParser {
    initial_units: Units,
}

impl ToolpathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units assumed until the program selects G20 or G21
    pub fn with_units(mut self, units: Units) -> Self {
        self.initial_units = units;
        self
    }

    pub fn initial_units(&self) -> Units {
        self.initial_units
    }

    /// Parse toolpath text into geometry.
    ///
    /// Stops at the first malformed line.
    pub fn parse(&self, text: &str) -> Result<GeometryModel, GcodeError> {
        debug!("Starting toolpath parse, input size: {} bytes", text.len());

        let mut state = ModalState::new(self.initial_units);
        let mut segments = Vec::new();
        let (mut straight_count, mut arc_count) = (0usize, 0usize);

        for (idx, raw) in text.lines().enumerate() {
            let line_number = (idx + 1) as u32;
            let Some(words) = read_words(raw, line_number)? else {
                continue;
            };

            let mut non_modal = None;
            for &g in &words.g {
                if let Some(code) = state.apply_g(g) {
                    non_modal = Some(code);
                }
            }
            match non_modal {
                Some(NonModal::SetPosition) => {
                    state.position = state.rebased(&words);
                    trace!("Line {}: position set to {:?}", line_number, state.position);
                    continue;
                }
                Some(NonModal::Skip) => {
                    trace!("Line {}: skipping non-modal move", line_number);
                    continue;
                }
                None => {}
            }

            let target = state.target(&words);
            match state.motion {
                Some(Motion::Straight(kind)) if words.has_axis() => {
                    trace!("Line {}: {} to {:?}", line_number, kind.code(), target);
                    segments.push(Segment::straight(kind, state.position, target));
                    straight_count += 1;
                }
                Some(Motion::Arc(kind))
                    if words.has_axis() || words.has_offsets() || words.r.is_some() =>
                {
                    trace!("Line {}: {} to {:?}", line_number, kind.code(), target);
                    let beziers = arc_move(&state, &words, kind, target)
                        .ok_or_else(|| GcodeError::MissingParameter {
                            line_number,
                            param: "I/J/K or R".to_string(),
                        })?
                        .to_beziers()
                        .map_err(|e| GcodeError::InvalidArc {
                            line_number,
                            reason: e.to_string(),
                        })?;
                    segments.push(Segment::curved(kind, beziers));
                    arc_count += 1;
                }
                _ => {}
            }
            state.position = target;
        }

        let model = GeometryModel::from_segments(segments);
        debug!(
            "Toolpath parsed: {} straight, {} arc segments, bbox {:?}",
            straight_count, arc_count, model.bounding_box
        );
        Ok(model)
    }
}

fn arc_move(state: &ModalState, words: &Words, kind: ArcKind, target: Point) -> Option<ArcMove> {
    let to_mm = |v: Option<f64>| state.units.to_millimeters(v.unwrap_or(0.0));
    let center = if words.has_offsets() {
        let (a, b) = state
            .plane
            .offsets(to_mm(words.i), to_mm(words.j), to_mm(words.k));
        ArcCenter::Offsets(a, b)
    } else {
        ArcCenter::Radius(state.units.to_millimeters(words.r?))
    };
    Some(ArcMove {
        plane: state.plane,
        start: state.position,
        end: target,
        center,
        clockwise: kind == ArcKind::Clockwise,
    })
}

/// Split one line into words. `None` for lines without any.
fn read_words(raw: &str, line_number: u32) -> Result<Option<Words>, GcodeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('%') {
        return Ok(None);
    }
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let cleaned = comment_regex().replace_all(trimmed, " ");

    let mut words = Words::default();
    let mut residue = String::new();
    let mut last = 0;
    let mut found = false;

    for caps in word_regex().captures_iter(&cleaned) {
        let (Some(whole), Some(letter), Some(number)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        residue.push_str(&cleaned[last..whole.start()]);
        last = whole.end();
        found = true;

        let letter = letter.as_str().to_ascii_uppercase();
        let value: f64 = number
            .as_str()
            .parse()
            .map_err(|e: std::num::ParseFloatError| GcodeError::InvalidParameter {
                line_number,
                param: letter.clone(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() {
            return Err(GcodeError::InvalidParameter {
                line_number,
                param: letter,
                reason: "value is not a finite number".to_string(),
            });
        }

        match letter.as_str() {
            "G" => words.g.push(value),
            "X" => words.x = Some(value),
            "Y" => words.y = Some(value),
            "Z" => words.z = Some(value),
            "I" => words.i = Some(value),
            "J" => words.j = Some(value),
            "K" => words.k = Some(value),
            "R" => words.r = Some(value),
            _ => {}
        }
    }
    residue.push_str(&cleaned[last..]);

    let residue = residue.trim();
    if !residue.is_empty() {
        return Err(GcodeError::InvalidSyntax {
            line_number,
            reason: format!("Unexpected '{}'", residue),
        });
    }

    Ok(found.then_some(words))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_ends(model: &GeometryModel) -> Vec<(Point, Point)> {
        model
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Straight { start, end, .. } => Some((*start, *end)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let model = ToolpathParser::new()
            .parse("(header)\n\n; note\n%\nG1 X1 (inline) Y2 ; trailing\n")
            .unwrap();
        assert_eq!(model.segments.len(), 1);
        assert_eq!(straight_ends(&model)[0].1, Point::xy(1.0, 2.0));
    }

    #[test]
    fn test_modal_motion_persists() {
        let model = ToolpathParser::new().parse("G1 X1\nY1\nG0 X0\n").unwrap();
        let codes: Vec<_> = model.segments.iter().map(|s| s.code().to_string()).collect();
        assert_eq!(codes, vec!["G1", "G1", "G0"]);
    }

    #[test]
    fn test_default_motion_is_rapid() {
        let model = ToolpathParser::new().parse("X5 Y5\n").unwrap();
        assert_eq!(model.segments[0].code(), "G0");
    }

    #[test]
    fn test_g80_cancels_motion() {
        let model = ToolpathParser::new().parse("G1 X1\nG80\nX2\n").unwrap();
        assert_eq!(model.segments.len(), 1);
    }

    #[test]
    fn test_g92_rebases_without_segment() {
        let model = ToolpathParser::new()
            .parse("G1 X10 Y10\nG92 X0 Y0\nG1 X1 Y1\n")
            .unwrap();
        let ends = straight_ends(&model);
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[1], (Point::xy(0.0, 0.0), Point::xy(1.0, 1.0)));
    }

    #[test]
    fn test_g92_ignores_incremental_mode() {
        let model = ToolpathParser::new().parse("G91 G1 X5\nG92 X2\nX1\n").unwrap();
        let ends = straight_ends(&model);
        assert_eq!(ends[1], (Point::xy(2.0, 0.0), Point::xy(3.0, 0.0)));
    }

    #[test]
    fn test_homing_and_offset_codes_draw_nothing() {
        for line in [
            "G28 X0 Y0",
            "G30 X0 Y0",
            "G10 L20 P1 X0 Y0",
            "G53 G0 X0 Y0",
            "G28.1 X5",
        ] {
            let text = format!("G1 X3 Y3\n{}\n", line);
            let model = ToolpathParser::new().parse(&text).unwrap();
            assert_eq!(model.segments.len(), 1, "{line}");
        }
    }

    #[test]
    fn test_motion_resumes_after_homing() {
        let model = ToolpathParser::new()
            .parse("G1 X3 Y3\nG28 X0 Y0\nX4\n")
            .unwrap();
        let ends = straight_ends(&model);
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[1], (Point::xy(3.0, 3.0), Point::xy(4.0, 3.0)));
    }

    #[test]
    fn test_incremental_and_inches() {
        let model = ToolpathParser::new()
            .parse("G91 G1 X1 Y1\nX1\nG90 G20 X1\n")
            .unwrap();
        let ends = straight_ends(&model);
        assert_eq!(ends[0].1, Point::xy(1.0, 1.0));
        assert_eq!(ends[1].1, Point::xy(2.0, 1.0));
        assert_eq!(ends[2].1, Point::xy(25.4, 1.0));
    }

    #[test]
    fn test_initial_units() {
        let parser = ToolpathParser::new().with_units(Units::Inches);
        assert_eq!(parser.initial_units(), Units::Inches);
        let model = parser.parse("G1 X1\n").unwrap();
        assert_eq!(straight_ends(&model)[0].1, Point::xy(25.4, 0.0));
    }

    #[test]
    fn test_non_motion_words_ignored() {
        let model = ToolpathParser::new()
            .parse("N10 M3 S12000\nT1 M6\nG4 P1\nF100\n")
            .unwrap();
        assert!(model.is_empty());
        assert!(model.bounding_box.is_degenerate());
    }

    #[test]
    fn test_compact_and_lowercase_words() {
        let model = ToolpathParser::new().parse("g1x1.5y-.5\n").unwrap();
        assert_eq!(straight_ends(&model)[0].1, Point::xy(1.5, -0.5));
    }

    #[test]
    fn test_block_delete_prefix() {
        let model = ToolpathParser::new().parse("/G1 X3\n").unwrap();
        assert_eq!(model.segments.len(), 1);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = ToolpathParser::new().parse("G1 X1\nG1 X#1\n").unwrap_err();
        assert_eq!(err.line_number(), 2);
        assert!(matches!(err, GcodeError::InvalidSyntax { .. }));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let huge = format!("G1 X{}\n", "9".repeat(400));
        let err = ToolpathParser::new().parse(&huge).unwrap_err();
        assert!(matches!(err, GcodeError::InvalidParameter { ref param, .. } if param == "X"));
    }

    #[test]
    fn test_arc_without_centre() {
        let err = ToolpathParser::new().parse("G2 X1 Y1\n").unwrap_err();
        assert!(matches!(err, GcodeError::MissingParameter { line_number: 1, .. }));
    }

    #[test]
    fn test_impossible_radius() {
        let err = ToolpathParser::new().parse("G2 X10 R1\n").unwrap_err();
        assert!(matches!(err, GcodeError::InvalidArc { line_number: 1, .. }));
    }

    #[test]
    fn test_arc_modal_continuation() {
        let model = ToolpathParser::new()
            .parse("G0 X1\nG3 X-1 I-1\nX1 I1\n")
            .unwrap();
        assert_eq!(model.segments.len(), 3);
        assert_eq!(model.segments[2].code(), "G3");
        assert_eq!(model.segments[2].end(), Some(Point::xy(1.0, 0.0)));
        assert!((model.bounding_box.max.y - 1.0).abs() < 1e-9);
        assert!((model.bounding_box.min.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_circle_offsets_only() {
        let model = ToolpathParser::new().parse("G0 X1\nG2 I-1\n").unwrap();
        assert_eq!(model.segments.len(), 2);
        match &model.segments[1] {
            Segment::Curved { beziers, .. } => assert_eq!(beziers.len(), 4),
            other => panic!("expected arc, got {other}"),
        }
        assert!((model.bounding_box.min.x + 1.0).abs() < 1e-9);
    }
}
