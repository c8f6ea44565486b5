//! Geometry model produced by toolpath extraction.
//!
//! The JSON form follows the layout used by G-code geometry services:
//! `{"boundingBox": {...}, "segments": [{"type": "G1", "start": ..., "end": ...},
//! {"type": "G3", "beziers": [...]}]}`. The legacy keys `size` and `lines`
//! are accepted as aliases.

use gcodethumb_core::{BoundingBox, Bounds, Point};
use lyon::geom::{point, CubicBezierSegment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cubic bezier piece of an arc approximation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// Start anchor
    pub p0: Point,
    /// First control point
    pub p1: Point,
    /// Second control point
    pub p2: Point,
    /// End anchor
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Accumulate the tight bounds of this piece.
    pub fn include_in(&self, bounds: &mut Bounds) {
        let planar = CubicBezierSegment {
            from: point(self.p0.x, self.p0.y),
            ctrl1: point(self.p1.x, self.p1.y),
            ctrl2: point(self.p2.x, self.p2.y),
            to: point(self.p3.x, self.p3.y),
        }
        .bounding_box();
        // Z extents come from a second curve carrying z on its x axis.
        let depth = CubicBezierSegment {
            from: point(self.p0.z, 0.0),
            ctrl1: point(self.p1.z, 0.0),
            ctrl2: point(self.p2.z, 0.0),
            to: point(self.p3.z, 0.0),
        }
        .bounding_box();

        bounds.update(&Point::new(planar.min.x, planar.min.y, depth.min.x));
        bounds.update(&Point::new(planar.max.x, planar.max.y, depth.max.x));
    }
}

/// Straight move kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StraightKind {
    /// G0 rapid (non-cutting) move
    Rapid,
    /// G1 linear feed (cutting) move
    Linear,
}

impl StraightKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
        }
    }
}

/// Arc move kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcKind {
    /// G2 clockwise arc
    Clockwise,
    /// G3 counter-clockwise arc
    CounterClockwise,
}

impl ArcKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Clockwise => "G2",
            Self::CounterClockwise => "G3",
        }
    }
}

/// One motion segment, in motion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SegmentRecord", into = "SegmentRecord")]
pub enum Segment {
    /// G0 / G1 line
    Straight {
        kind: StraightKind,
        start: Point,
        end: Point,
    },
    /// G2 / G3 arc approximated by bezier pieces
    Curved {
        kind: ArcKind,
        beziers: Vec<CubicBezier>,
    },
    /// A record with a type tag this model does not know
    Unknown { kind: String },
}

impl Segment {
    pub fn straight(kind: StraightKind, start: Point, end: Point) -> Self {
        Self::Straight { kind, start, end }
    }

    pub fn curved(kind: ArcKind, beziers: Vec<CubicBezier>) -> Self {
        Self::Curved { kind, beziers }
    }

    /// Type tag, e.g. `"G1"`
    pub fn code(&self) -> &str {
        match self {
            Self::Straight { kind, .. } => kind.code(),
            Self::Curved { kind, .. } => kind.code(),
            Self::Unknown { kind } => kind,
        }
    }

    pub fn start(&self) -> Option<Point> {
        match self {
            Self::Straight { start, .. } => Some(*start),
            Self::Curved { beziers, .. } => beziers.first().map(|b| b.p0),
            Self::Unknown { .. } => None,
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self {
            Self::Straight { end, .. } => Some(*end),
            Self::Curved { beziers, .. } => beziers.last().map(|b| b.p3),
            Self::Unknown { .. } => None,
        }
    }

    fn include_in(&self, bounds: &mut Bounds) {
        match self {
            Self::Straight { start, end, .. } => {
                bounds.update(start);
                bounds.update(end);
            }
            Self::Curved { beziers, .. } => {
                for piece in beziers {
                    piece.include_in(bounds);
                }
            }
            Self::Unknown { .. } => {}
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight { kind, start, end } => write!(
                f,
                "{} ({:.3}, {:.3}) -> ({:.3}, {:.3})",
                kind.code(),
                start.x,
                start.y,
                end.x,
                end.y
            ),
            Self::Curved { kind, beziers } => {
                write!(f, "{} [{} bezier pieces]", kind.code(), beziers.len())
            }
            Self::Unknown { kind } => write!(f, "{} (unknown)", kind),
        }
    }
}

/// Wire form of a segment
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SegmentRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    beziers: Vec<CubicBezier>,
}

impl From<SegmentRecord> for Segment {
    fn from(record: SegmentRecord) -> Self {
        match (record.kind.as_str(), record.start, record.end) {
            ("G0", Some(start), Some(end)) => Segment::straight(StraightKind::Rapid, start, end),
            ("G1", Some(start), Some(end)) => Segment::straight(StraightKind::Linear, start, end),
            ("G2", _, _) => Segment::curved(ArcKind::Clockwise, record.beziers),
            ("G3", _, _) => Segment::curved(ArcKind::CounterClockwise, record.beziers),
            _ => Segment::Unknown { kind: record.kind },
        }
    }
}

impl From<Segment> for SegmentRecord {
    fn from(segment: Segment) -> Self {
        let (start, end) = (segment.start(), segment.end());
        match segment {
            Segment::Straight { kind, .. } => SegmentRecord {
                kind: kind.code().to_string(),
                start,
                end,
                beziers: Vec::new(),
            },
            Segment::Curved { kind, beziers } => SegmentRecord {
                kind: kind.code().to_string(),
                start,
                end,
                beziers,
            },
            Segment::Unknown { kind } => SegmentRecord {
                kind,
                start: None,
                end: None,
                beziers: Vec::new(),
            },
        }
    }
}

/// Structured toolpath consumed by the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ModelRecord")]
pub struct GeometryModel {
    pub bounding_box: BoundingBox,
    pub segments: Vec<Segment>,
}

/// Wire form of [`GeometryModel`]; the bounding box may be omitted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecord {
    #[serde(alias = "size", default)]
    bounding_box: Option<BoundingBox>,
    #[serde(alias = "lines", default)]
    segments: Vec<Segment>,
}

impl From<ModelRecord> for GeometryModel {
    fn from(record: ModelRecord) -> Self {
        match record.bounding_box {
            Some(bounding_box) => Self {
                bounding_box,
                segments: record.segments,
            },
            None => Self::from_segments(record.segments),
        }
    }
}

impl GeometryModel {
    /// Build a model, deriving the bounding box from the segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut bounds = Bounds::new();
        for segment in &segments {
            segment.include_in(&mut bounds);
        }
        Self {
            bounding_box: bounds.finish(),
            segments,
        }
    }

    /// Read a model produced by an external geometry service
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
