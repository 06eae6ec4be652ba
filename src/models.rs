//! Data models for located sprites
//!
//! These serialize to the box-list format consumed by atlas builders:
//! `{"sprites":[{"min":{"x":0,"y":0},"max":{"x":2,"y":2}}]}`.

use serde::{Deserialize, Serialize};

pub use crate::grid::Point;

/// Axis-aligned bounding box of one sprite.
///
/// Both corners are inclusive: `min` is the top-left pixel and `max` the
/// bottom-right pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sprite {
    /// Upper left pixel
    pub min: Point,
    /// Lower right pixel
    pub max: Point,
}

impl Sprite {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Build from corner coordinates `(x0, y0)` and `(x1, y1)`
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { min: Point::new(x0, y0), max: Point::new(x1, y1) }
    }

    /// Horizontal extent, `max.x - min.x`
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Vertical extent, `max.y - min.y`
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Integer midpoint of the box
    pub fn center(&self) -> Point {
        Point::new(midpoint(self.min.x, self.max.x), midpoint(self.min.y, self.max.y))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The box grown by `margin` on all four sides
    pub fn expanded(&self, margin: i32) -> Self {
        Self::from_coords(
            self.min.x - margin,
            self.min.y - margin,
            self.max.x + margin,
            self.max.y + margin,
        )
    }

    pub fn overlaps(&self, other: &Sprite) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Euclidean distance of the top-left corner from the sheet origin
    pub fn origin_distance(&self) -> f64 {
        let x = self.min.x as f64;
        let y = self.min.y as f64;
        (x * x + y * y).sqrt()
    }
}

/// Midpoint rounded toward zero, computed wide so large coordinates cannot overflow
fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

/// Sprite box list for one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spritesheet {
    #[serde(default)]
    pub sprites: Vec<Sprite>,
}

impl Spritesheet {
    pub fn new(sprites: Vec<Sprite>) -> Self {
        Self { sprites }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl From<Vec<Sprite>> for Spritesheet {
    fn from(sprites: Vec<Sprite>) -> Self {
        Self { sprites }
    }
}
