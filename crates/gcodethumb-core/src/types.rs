//! Model-space geometry primitives.

use serde::{Deserialize, Serialize};

/// 3D point in model space (millimetres, Y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the XY plane
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Smallest axis-aligned box enclosing all motion of a toolpath
///
/// A toolpath without motion has the all-zero box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).abs()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).abs()
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        (self.max.z - self.min.z).abs()
    }

    /// True when the box has no extent on both X and Y.
    ///
    /// Nothing can be scaled onto a surface in that case.
    pub fn is_degenerate(&self) -> bool {
        self.max.x == self.min.x && self.max.y == self.min.y
    }

    pub fn contains(&self, p: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

/// Bounding box accumulator used while extracting toolpaths.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    pub fn update(&mut self, p: &Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            && self.min_z <= self.max_z
    }

    /// Close the accumulator. Nothing accumulated yields the all-zero box.
    pub fn finish(self) -> BoundingBox {
        if !self.is_valid() {
            return BoundingBox::default();
        }
        BoundingBox {
            min: Point::new(self.min_x, self.min_y, self.min_z),
            max: Point::new(self.max_x, self.max_y, self.max_z),
        }
    }
}
