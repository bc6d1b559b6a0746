//! Geometry utilities: points, rectangles, rotation-aware bounds.
//!
//! Everything here is a pure function of its inputs. Rotated objects are
//! approximated by the axis-aligned box enclosing the rotated rectangle; at
//! the quarter-turn angles the editor produces this is exact.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either container or plan-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that only share an edge or a corner do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Whether `other` lies entirely inside `self`, allowing `tolerance` of slack.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }

    /// Whether the point lies inside or on the border of the rectangle.
    #[must_use]
    pub fn contains_point(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// `(cos, sin)` of an angle in degrees, exact at quarter turns.
#[must_use]
pub fn unit_trig(deg: f64) -> (f64, f64) {
    let deg = normalize_rotation(deg);
    if deg == 0.0 {
        (1.0, 0.0)
    } else if deg == 90.0 {
        (0.0, 1.0)
    } else if deg == 180.0 {
        (-1.0, 0.0)
    } else if deg == 270.0 {
        (0.0, -1.0)
    } else {
        let rad = deg.to_radians();
        (rad.cos(), rad.sin())
    }
}

/// Axis-aligned extent `(effW, effH)` of a `w` x `h` rectangle rotated by `rotation_deg`.
#[must_use]
pub fn effective_bounds(w: f64, h: f64, rotation_deg: f64) -> (f64, f64) {
    let (cos, sin) = unit_trig(rotation_deg);
    let (cos, sin) = (cos.abs(), sin.abs());
    (w * cos + h * sin, h * cos + w * sin)
}

/// Effective bounding box of a rectangle whose unrotated top-left is `pos`.
///
/// Rotation pivots on the rectangle's centre, so the box is re-centred there.
#[must_use]
pub fn effective_rect(pos: Point, size: Size, rotation_deg: f64) -> Rect {
    let (ew, eh) = effective_bounds(size.width, size.height, rotation_deg);
    let cx = pos.x + size.width / 2.0;
    let cy = pos.y + size.height / 2.0;
    Rect::new(cx - ew / 2.0, cy - eh / 2.0, ew, eh)
}

/// Offset from the nominal top-left to the effective box's top-left.
#[must_use]
pub fn effective_offset(size: Size, rotation_deg: f64) -> Point {
    let (ew, eh) = effective_bounds(size.width, size.height, rotation_deg);
    Point::new((size.width - ew) / 2.0, (size.height - eh) / 2.0)
}

/// Clip a rectangle's top-left so the whole rectangle stays inside `container`.
///
/// When the rectangle is larger than the container on an axis it is pinned to
/// the container's near edge on that axis.
#[must_use]
pub fn clamp_rect(pos: Point, size: Size, container: Rect) -> Point {
    let max_x = container.right() - size.width;
    let max_y = container.bottom() - size.height;
    Point::new(pos.x.min(max_x).max(container.x), pos.y.min(max_y).max(container.y))
}

/// Clip a rotated rectangle's nominal top-left so its effective box stays inside `container`.
#[must_use]
pub fn clamp_rotated(pos: Point, size: Size, rotation_deg: f64, container: Rect) -> Point {
    let offset = effective_offset(size, rotation_deg);
    let (ew, eh) = effective_bounds(size.width, size.height, rotation_deg);
    clamp_rect(pos.add(offset), Size::new(ew, eh), container).sub(offset)
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// A non-positive grid leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Rotate a vector by `deg` degrees (clockwise in a y-down space).
#[must_use]
pub fn rotate_vec(v: Point, deg: f64) -> Point {
    let (cos, sin) = unit_trig(deg);
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Map a world-space vector into the local frame of an object rotated by `deg`.
#[must_use]
pub fn unrotate_vec(v: Point, deg: f64) -> Point {
    rotate_vec(v, -deg)
}
