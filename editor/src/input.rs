//! Input model: keys, the gesture state machine, and multi-activation tracking.
//!
//! `InputState` is the gesture currently owned by the interaction controller,
//! carrying everything needed to compute the next frame from pointer
//! displacement. Only one gesture exists at a time; while one is active, new
//! gesture starts on other entities are ignored until release.
//! `ActivationTracker` turns a stream of timestamped primary activations into
//! single/double/triple counts.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ObjectId;
use crate::geometry::{Point, Rect, Size};
use crate::hit::{ResizeAnchor, Target};

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Set when the most recent candidate mutation was discarded. Cleared by
    /// the next accepted mutation or gesture start. The host decides how long
    /// to show the warning.
    pub last_rejected: bool,
    /// Object waiting for the host to confirm its deletion.
    pub pending_delete: Option<ObjectId>,
}

/// The active gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A desk or wall is following the pointer.
    DraggingObject {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Pointer position minus the object's target at pointer-down, plan-local.
        grab_offset: Point,
    },
    /// The plan is being resized by one of its eight handles.
    ResizingPlan {
        /// Which edge/corner handle is being dragged.
        anchor: ResizeAnchor,
        /// Container-space pointer position at pointer-down.
        start: Point,
        /// Plan rectangle at pointer-down, container space.
        orig: Rect,
    },
    /// A wall is being resized by one of its corner handles.
    ResizingWall {
        /// Id of the wall being resized.
        id: ObjectId,
        /// Which corner handle is being dragged, in the wall's local frame.
        anchor: ResizeAnchor,
        /// Container-space pointer position at pointer-down.
        start: Point,
        /// Wall target position at pointer-down, plan-local.
        orig_pos: Point,
        /// Wall nominal size at pointer-down.
        orig_size: Size,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The entity that owns the active gesture.
    #[must_use]
    pub fn owner(&self) -> Option<Target> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { id, .. } => Some(Target::Object(*id)),
            Self::ResizingPlan { anchor, .. } => Some(Target::PlanHandle(*anchor)),
            Self::ResizingWall { id, anchor, .. } => Some(Target::ObjectHandle(*id, *anchor)),
        }
    }
}

/// Counts rapid repeated primary activations on the same target.
#[derive(Debug, Clone, Default)]
pub struct ActivationTracker {
    last: Option<(Target, f64)>,
    count: u32,
}

impl ActivationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activation at `now_ms` and return how many activations in a
    /// row (including this one) landed on `target` within `window_ms` of each
    /// other.
    pub fn register(&mut self, target: Target, now_ms: f64, window_ms: f64) -> u32 {
        self.count = match self.last {
            Some((prev, at)) if prev == target && now_ms - at <= window_ms && now_ms >= at => self.count + 1,
            _ => 1,
        };
        self.last = Some((target, now_ms));
        self.count
    }

    /// Forget the running sequence.
    pub fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}
