//! Core geometry types for phyllo.
//!
//! ## Rust Lesson #2: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` + `Copy` = small stack values that are copied implicitly
//! - `PartialEq` = can compare with `==`
//! - `Serialize` / `Deserialize` = serde can turn it into JSON or YAML

use serde::{Deserialize, Serialize};

/// Decimal places kept on every generated coordinate.
pub const COORD_PRECISION: i32 = 2;

/// Round a coordinate to [`COORD_PRECISION`] decimal places.
///
/// Rounds half away from zero (`f64::round`).
#[inline]
pub fn round_coord(value: f64) -> f64 {
    let scale = 10f64.powi(COORD_PRECISION);
    (value * scale).round() / scale
}

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Point {
    /// Create a new point.
    ///
    /// Called as: `Point::new(1.0, 2.0)`
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point from polar coordinates, snapped to the display precision.
    ///
    /// The order matters for reproducibility: cos/sin of `angle` are taken
    /// first, scaled by `radius`, and only then rounded.
    #[inline]
    pub fn from_polar_rounded(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin()).rounded()
    }

    /// Copy of this point with both coordinates rounded.
    #[inline]
    pub fn rounded(&self) -> Self {
        Self::new(round_coord(self.x), round_coord(self.y))
    }

    /// Same point shifted by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    ///
    /// `Point` is `Copy`, so taking `other` by value costs nothing.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from the origin.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.distance(Point::new(0.0, 0.0))
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Get the midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

// ============================================================================
// TESTS
// ============================================================================
