//! Collision engine: touch and overlap counting between effective bounding boxes.
//!
//! DESIGN
//! ======
//! Every drag frame, resize frame, and placement candidate is judged by
//! [`touch_count`]. A positive-area intersection with any other object
//! short-circuits to [`TouchCount::Overlap`]; otherwise the result is the
//! number of objects whose opposite edge lies within `epsilon` of one of the
//! candidate's edges while their perpendicular projections overlap. The plan
//! boundary is not part of the count; containment is enforced by clamping
//! before this check.
//!
//! Boxes are the axis-aligned bounds of rotated rectangles, which is exact at
//! the quarter-turn angles the editor produces.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::doc::{ObjectId, Scene};
use crate::geometry::Rect;

/// Outcome of a touch count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchCount {
    /// No overlap; this many objects are edge-adjacent.
    Touches(usize),
    /// The candidate overlaps another object. Never acceptable.
    Overlap,
}

impl TouchCount {
    /// Whether a candidate with this count may be committed.
    #[must_use]
    pub fn is_acceptable(self, max_touches: usize) -> bool {
        match self {
            Self::Touches(n) => n <= max_touches,
            Self::Overlap => false,
        }
    }

    /// Add extra touches (for example from the plan boundary). Overlap stays overlap.
    #[must_use]
    pub fn plus(self, extra: usize) -> Self {
        match self {
            Self::Touches(n) => Self::Touches(n.saturating_add(extra)),
            Self::Overlap => Self::Overlap,
        }
    }
}

/// Count touches between `candidate` (an effective box, plan-local) and every
/// object in the scene except `exclude`.
#[must_use]
pub fn touch_count(scene: &Scene, candidate: &Rect, exclude: Option<ObjectId>, epsilon: f64) -> TouchCount {
    let mut touches = 0usize;
    for other in scene.objects() {
        if Some(other.id) == exclude {
            continue;
        }
        let other_rect = other.effective_rect();
        if candidate.intersects(&other_rect) {
            return TouchCount::Overlap;
        }
        if are_touching(candidate, &other_rect, epsilon) {
            touches += 1;
        }
    }
    TouchCount::Touches(touches)
}

/// Ids of the objects `candidate` touches, in insertion order.
#[must_use]
pub fn touching_ids(scene: &Scene, candidate: &Rect, exclude: Option<ObjectId>, epsilon: f64) -> Vec<ObjectId> {
    scene
        .sorted_objects()
        .into_iter()
        .filter(|o| Some(o.id) != exclude)
        .filter(|o| {
            let r = o.effective_rect();
            !candidate.intersects(&r) && are_touching(candidate, &r, epsilon)
        })
        .map(|o| o.id)
        .collect()
}

/// Whether two non-overlapping boxes are edge-adjacent.
///
/// An edge of `a` must lie within `epsilon` of the opposite edge of `b`, and
/// the boxes' projections on the other axis must overlap by a positive length.
/// Corner-to-corner contact is not a touch.
#[must_use]
pub fn are_touching(a: &Rect, b: &Rect, epsilon: f64) -> bool {
    let x_overlap = projections_overlap(a.x, a.right(), b.x, b.right());
    let y_overlap = projections_overlap(a.y, a.bottom(), b.y, b.bottom());

    let horizontal = y_overlap && ((a.right() - b.x).abs() <= epsilon || (b.right() - a.x).abs() <= epsilon);
    let vertical = x_overlap && ((a.bottom() - b.y).abs() <= epsilon || (b.bottom() - a.y).abs() <= epsilon);
    horizontal || vertical
}

fn projections_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
    a1.min(b1) - a0.max(b0) > 0.0
}
