//! Arc (G2/G3) resolution into cubic bezier pieces.
//!
//! Arcs are solved in the active plane (G17/G18/G19). Helical motion along
//! the plane normal is interpolated linearly over the sweep.

use crate::model::CubicBezier;
use gcodethumb_core::Point;
use lyon::geom::{point, vector, Angle, Arc, CubicBezierSegment};
use std::f64::consts::TAU;
use thiserror::Error;

/// Arc plane selected by G17 / G18 / G19
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Plane {
    /// G17
    #[default]
    Xy,
    /// G18
    Zx,
    /// G19
    Yz,
}

impl Plane {
    /// Split a point into (first axis, second axis, normal axis) for this plane.
    fn project(self, p: Point) -> (f64, f64, f64) {
        match self {
            Plane::Xy => (p.x, p.y, p.z),
            Plane::Zx => (p.z, p.x, p.y),
            Plane::Yz => (p.y, p.z, p.x),
        }
    }

    fn unproject(self, a: f64, b: f64, n: f64) -> Point {
        match self {
            Plane::Xy => Point::new(a, b, n),
            Plane::Zx => Point::new(b, n, a),
            Plane::Yz => Point::new(n, a, b),
        }
    }

    /// Pick the centre offsets that belong to this plane out of I/J/K.
    pub fn offsets(self, i: f64, j: f64, k: f64) -> (f64, f64) {
        match self {
            Plane::Xy => (i, j),
            Plane::Zx => (k, i),
            Plane::Yz => (j, k),
        }
    }
}

/// How the arc centre was programmed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcCenter {
    /// Centre offsets from the start point, already mapped to the plane axes
    Offsets(f64, f64),
    /// Signed radius; negative selects the long way round
    Radius(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcError {
    #[error("Arc radius is zero")]
    ZeroRadius,

    #[error("Arc radius {radius} is smaller than half the chord ({half_chord})")]
    RadiusTooSmall { radius: f64, half_chord: f64 },

    #[error("Radius-format arc has coincident start and end points")]
    CoincidentEndpoints,
}

/// A single G2/G3 move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMove {
    pub plane: Plane,
    pub start: Point,
    pub end: Point,
    pub center: ArcCenter,
    pub clockwise: bool,
}

const EPSILON: f64 = 1e-9;

impl ArcMove {
    /// Approximate the arc by cubic bezier pieces of at most a quarter turn.
    ///
    /// The first piece starts exactly at `start` and the last one ends
    /// exactly at `end`.
    pub fn to_beziers(&self) -> Result<Vec<CubicBezier>, ArcError> {
        let (sa, sb, sn) = self.plane.project(self.start);
        let (ea, eb, en) = self.plane.project(self.end);

        let (ca, cb) = self.solve_center((sa, sb), (ea, eb))?;
        let radius = (sa - ca).hypot(sb - cb);
        if radius < EPSILON {
            return Err(ArcError::ZeroRadius);
        }

        let start_angle = (sb - cb).atan2(sa - ca);
        let end_angle = (eb - cb).atan2(ea - ca);
        let closed = (sa - ea).abs() < EPSILON && (sb - eb).abs() < EPSILON;
        let sweep = if closed {
            if self.clockwise {
                -TAU
            } else {
                TAU
            }
        } else if self.clockwise {
            -ccw_span(end_angle, start_angle)
        } else {
            ccw_span(start_angle, end_angle)
        };

        let arc = Arc {
            center: point(ca, cb),
            radii: vector(radius, radius),
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(sweep),
            x_rotation: Angle::radians(0.0),
        };

        let mut planar = Vec::new();
        arc.for_each_cubic_bezier(&mut |piece: &CubicBezierSegment<f64>| planar.push(*piece));

        let count = planar.len().max(1) as f64;
        let normal_at = |t: f64| sn + (en - sn) * t;
        let mut pieces: Vec<CubicBezier> = planar
            .iter()
            .enumerate()
            .map(|(idx, piece)| {
                let t0 = idx as f64 / count;
                let dt = 1.0 / count;
                CubicBezier::new(
                    self.plane.unproject(piece.from.x, piece.from.y, normal_at(t0)),
                    self.plane
                        .unproject(piece.ctrl1.x, piece.ctrl1.y, normal_at(t0 + dt / 3.0)),
                    self.plane.unproject(
                        piece.ctrl2.x,
                        piece.ctrl2.y,
                        normal_at(t0 + 2.0 * dt / 3.0),
                    ),
                    self.plane.unproject(piece.to.x, piece.to.y, normal_at(t0 + dt)),
                )
            })
            .collect();

        if let Some(first) = pieces.first_mut() {
            first.p0 = self.start;
        }
        if let Some(last) = pieces.last_mut() {
            last.p3 = self.end;
        }

        Ok(pieces)
    }

    fn solve_center(&self, start: (f64, f64), end: (f64, f64)) -> Result<(f64, f64), ArcError> {
        match self.center {
            ArcCenter::Offsets(da, db) => Ok((start.0 + da, start.1 + db)),
            ArcCenter::Radius(r) => {
                if r.abs() < EPSILON {
                    return Err(ArcError::ZeroRadius);
                }
                let (dx, dy) = (end.0 - start.0, end.1 - start.1);
                let chord = dx.hypot(dy);
                if chord < EPSILON {
                    return Err(ArcError::CoincidentEndpoints);
                }
                let half = chord / 2.0;
                let radius = r.abs();
                let tolerance = 1e-6 * half.max(1.0);
                if radius + tolerance < half {
                    return Err(ArcError::RadiusTooSmall {
                        radius,
                        half_chord: half,
                    });
                }

                let h = (radius * radius - half * half).max(0.0).sqrt();
                let (la, lb) = (-dy / chord, dx / chord);
                let mut side = if self.clockwise { -1.0 } else { 1.0 };
                if r < 0.0 {
                    side = -side;
                }
                let (ma, mb) = (start.0 + dx / 2.0, start.1 + dy / 2.0);
                Ok((ma + side * h * la, mb + side * h * lb))
            }
        }
    }
}

/// Counter-clockwise angular distance from `from` to `to`, in (0, TAU].
fn ccw_span(from: f64, to: f64) -> f64 {
    let span = (to - from).rem_euclid(TAU);
    if span < EPSILON {
        TAU
    } else {
        span
    }
}
