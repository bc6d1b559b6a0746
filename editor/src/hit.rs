//! Input targets and point hit-testing.
//!
//! The input contract names its target explicitly (`pointer_down(target, ..)`),
//! so hosts that already know what was pressed pass a [`Target`] directly.
//! Hosts that only have coordinates use [`hit_test`] to resolve one.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ObjectId, ObjectKind, Scene, Selection};
use crate::geometry::{self, Point, Rect};

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// All eight anchors, clockwise from north.
    pub const ALL: [ResizeAnchor; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// The four corner anchors walls expose.
    pub const CORNERS: [ResizeAnchor; 4] = [Self::Ne, Self::Se, Self::Sw, Self::Nw];

    /// Direction of the handle on each axis: -1 for west/north, 1 for east/south, 0 when the axis is untouched.
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::E => (1.0, 0.0),
            Self::Se => (1.0, 1.0),
            Self::S => (0.0, 1.0),
            Self::Sw => (-1.0, 1.0),
            Self::W => (-1.0, 0.0),
            Self::Nw => (-1.0, -1.0),
        }
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }
}

/// What a pointer event is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The plan surface itself.
    Plan,
    /// One of the plan's eight resize handles.
    PlanHandle(ResizeAnchor),
    /// The body of a desk or wall.
    Object(ObjectId),
    /// A corner handle of a wall.
    ObjectHandle(ObjectId, ResizeAnchor),
}

impl Target {
    /// The object this target refers to, if any.
    #[must_use]
    pub fn object_id(self) -> Option<ObjectId> {
        match self {
            Self::Object(id) | Self::ObjectHandle(id, _) => Some(id),
            Self::Plan | Self::PlanHandle(_) => None,
        }
    }

    /// Whether the target belongs to the plan rather than an object.
    #[must_use]
    pub fn is_plan(self) -> bool {
        matches!(self, Self::Plan | Self::PlanHandle(_))
    }
}

/// The eight handle positions around `rect`, in the same space as `rect`.
#[must_use]
pub fn plan_handle_points(rect: &Rect) -> [(ResizeAnchor, Point); 8] {
    let c = rect.center();
    ResizeAnchor::ALL.map(|anchor| {
        let (sx, sy) = anchor.signs();
        (anchor, Point::new(c.x + sx * rect.width / 2.0, c.y + sy * rect.height / 2.0))
    })
}

/// Corner handles of a (possibly rotated) object, plan-local.
///
/// Anchors are named in the object's local frame, so after a quarter turn the
/// `Nw` handle is no longer the top-left one on screen.
#[must_use]
pub fn object_handle_points(pos: Point, w: f64, h: f64, rotation: f64) -> [(ResizeAnchor, Point); 4] {
    let c = Point::new(pos.x + w / 2.0, pos.y + h / 2.0);
    ResizeAnchor::CORNERS.map(|anchor| {
        let (sx, sy) = anchor.signs();
        let local = Point::new(sx * w / 2.0, sy * h / 2.0);
        (anchor, c.add(geometry::rotate_vec(local, rotation)))
    })
}

/// Resolve a container-space point to a target.
///
/// Handles of the current selection win, then objects topmost first, then
/// the plan body.
#[must_use]
pub fn hit_test(scene: &Scene, pt: Point, radius: f64) -> Option<Target> {
    let plan = scene.plan()?;
    let local = plan.to_local(pt);
    let near = |handle: Point, probe: Point| (handle.x - probe.x).abs() <= radius && (handle.y - probe.y).abs() <= radius;

    match scene.selection() {
        Selection::Plan => {
            for (anchor, p) in plan_handle_points(&plan.rect()) {
                if near(p, pt) {
                    return Some(Target::PlanHandle(anchor));
                }
            }
        }
        Selection::Object(id) => {
            if let Some(obj) = scene.get(&id).filter(|o| o.kind == ObjectKind::Wall) {
                for (anchor, p) in object_handle_points(obj.rendered(), obj.width, obj.height, obj.rotation) {
                    if near(p, local) {
                        return Some(Target::ObjectHandle(id, anchor));
                    }
                }
            }
        }
        Selection::None => {}
    }

    let mut objects = scene.sorted_objects();
    objects.reverse();
    if let Some(obj) = objects.into_iter().find(|o| o.rendered_rect().contains_point(local)) {
        return Some(Target::Object(obj.id));
    }

    plan.rect().contains_point(pt).then_some(Target::Plan)
}
