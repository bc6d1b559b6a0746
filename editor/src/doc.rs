//! Scene model: the plan, its placed objects, and the current selection.
//!
//! This module defines what is on the editing surface (`Plan`,
//! `PlacedObject`, `ObjectKind`) and the store that owns it (`Scene`). The
//! scene enforces structural rules: a single plan, objects only inside a
//! plan, no structural edits while the plan is confirmed, and a single
//! selection. Geometric rules (overlap, touch budget) are checked by
//! [`crate::collision`] before the interaction controller commits anything.
//!
//! Object coordinates are local to the plan's top-left corner. The plan's own
//! position is in container coordinates.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EditorConfig;
use crate::error::SceneError;
use crate::geometry::{self, Point, Rect, Size};
use crate::placement::{self, Placement};

/// Unique identifier for a placed object.
pub type ObjectId = Uuid;

/// The kind of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Fixed-size narrow rectangle.
    Desk,
    /// User-resizable rectangle with a minimum size.
    Wall,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desk => f.write_str("desk"),
            Self::Wall => f.write_str("wall"),
        }
    }
}

/// A desk or wall on the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Rendered left edge (unrotated), plan-local.
    pub x: f64,
    /// Rendered top edge (unrotated), plan-local.
    pub y: f64,
    /// Validated x the object is easing toward.
    pub target_x: f64,
    /// Validated y the object is easing toward.
    pub target_y: f64,
    /// Nominal width.
    pub width: f64,
    /// Nominal height.
    pub height: f64,
    /// Clockwise rotation in degrees, always a value in `[0, 360)`.
    pub rotation: f64,
    /// Insertion order; used for stable listing and topmost-first hit testing.
    pub seq: u64,
}

impl PlacedObject {
    #[must_use]
    pub fn target(&self) -> Point {
        Point::new(self.target_x, self.target_y)
    }

    #[must_use]
    pub fn rendered(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Effective bounding box at the validated target position.
    #[must_use]
    pub fn effective_rect(&self) -> Rect {
        geometry::effective_rect(self.target(), self.size(), self.rotation)
    }

    /// Effective bounding box at the currently rendered position.
    #[must_use]
    pub fn rendered_rect(&self) -> Rect {
        geometry::effective_rect(self.rendered(), self.size(), self.rotation)
    }

    /// Whether the rendered position still lags the target by more than `epsilon` on either axis.
    #[must_use]
    pub fn is_animating(&self, epsilon: f64) -> bool {
        (self.target_x - self.x).abs() >= epsilon || (self.target_y - self.y).abs() >= epsilon
    }

    /// Move both target and rendered position, skipping the animation.
    pub fn place_at(&mut self, pos: Point) {
        self.x = pos.x;
        self.y = pos.y;
        self.target_x = pos.x;
        self.target_y = pos.y;
    }
}

/// The bounded editing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Left edge in container coordinates.
    pub x: f64,
    /// Top edge in container coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// While set, only unconfirming is allowed.
    pub confirmed: bool,
}

impl Plan {
    /// The plan's rectangle in container coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The plan's interior in plan-local coordinates.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Convert a container-space point to plan-local coordinates.
    #[must_use]
    pub fn to_local(&self, pt: Point) -> Point {
        Point::new(pt.x - self.x, pt.y - self.y)
    }
}

/// What is currently highlighted. The plan and an object are never selected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Plan,
    Object(ObjectId),
}

/// Owner of the plan and every object on it.
#[derive(Debug, Default)]
pub struct Scene {
    plan: Option<Plan>,
    objects: HashMap<ObjectId, PlacedObject>,
    selection: Selection,
    next_seq: u64,
}

impl Scene {
    /// Create an empty scene with no plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Plan lifecycle ---

    /// Install a new plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanExists` if a plan is already present.
    pub fn create_plan(&mut self, rect: Rect) -> Result<&Plan, SceneError> {
        if self.plan.is_some() {
            return Err(SceneError::PlanExists);
        }
        Ok(self.plan.insert(Plan {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            confirmed: false,
        }))
    }

    /// Remove the plan and every object on it. Returns how many objects were discarded.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` if there is nothing to delete and `PlanConfirmed` while frozen.
    pub fn delete_plan(&mut self) -> Result<usize, SceneError> {
        self.editable_plan()?;
        self.plan = None;
        let discarded = self.objects.len();
        self.objects.clear();
        self.selection = Selection::None;
        Ok(discarded)
    }

    /// Freeze the plan. Returns `false` when it was already confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` if no plan exists.
    pub fn confirm_plan(&mut self) -> Result<bool, SceneError> {
        let plan = self.plan.as_mut().ok_or(SceneError::NoPlan)?;
        if plan.confirmed {
            return Ok(false);
        }
        plan.confirmed = true;
        Ok(true)
    }

    /// Unfreeze the plan. Returns `false` when it was not confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` if no plan exists.
    pub fn unconfirm_plan(&mut self) -> Result<bool, SceneError> {
        let plan = self.plan.as_mut().ok_or(SceneError::NoPlan)?;
        if !plan.confirmed {
            return Ok(false);
        }
        plan.confirmed = false;
        Ok(true)
    }

    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// The plan, if it exists and may be edited.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` or `PlanConfirmed`.
    pub fn editable_plan(&self) -> Result<&Plan, SceneError> {
        let plan = self.plan.as_ref().ok_or(SceneError::NoPlan)?;
        if plan.confirmed {
            return Err(SceneError::PlanConfirmed);
        }
        Ok(plan)
    }

    /// Replace the plan's rectangle, shifting object coordinates so that
    /// objects keep their container position when the origin moves.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` or `PlanConfirmed`.
    pub fn set_plan_rect(&mut self, rect: Rect) -> Result<(), SceneError> {
        self.editable_plan()?;
        let plan = self.plan.as_mut().ok_or(SceneError::NoPlan)?;
        let dx = rect.x - plan.x;
        let dy = rect.y - plan.y;
        plan.x = rect.x;
        plan.y = rect.y;
        plan.width = rect.width;
        plan.height = rect.height;
        if dx != 0.0 || dy != 0.0 {
            for obj in self.objects.values_mut() {
                obj.x -= dx;
                obj.y -= dy;
                obj.target_x -= dx;
                obj.target_y -= dy;
            }
        }
        Ok(())
    }

    // --- Objects ---

    /// Insert an object at `pos` without any geometric validation.
    ///
    /// Callers run the candidate through [`crate::placement`] first.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` or `PlanConfirmed`.
    pub fn insert_object(&mut self, kind: ObjectKind, pos: Point, size: Size) -> Result<ObjectId, SceneError> {
        self.editable_plan()?;
        let id = Uuid::new_v4();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.objects.insert(
            id,
            PlacedObject {
                id,
                kind,
                x: pos.x,
                y: pos.y,
                target_x: pos.x,
                target_y: pos.y,
                width: size.width,
                height: size.height,
                rotation: 0.0,
                seq,
            },
        );
        Ok(id)
    }

    /// Add a desk at `requested` (plan-local), falling back to the placement search.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan`, `PlanConfirmed`, or `NoSpaceAvailable`; no object is created on error.
    pub fn add_desk(&mut self, requested: Point, cfg: &EditorConfig) -> Result<(ObjectId, Placement), SceneError> {
        self.add_object(ObjectKind::Desk, requested, cfg.desk_size, cfg)
    }

    /// Add a wall of the default size at `requested` (plan-local).
    ///
    /// # Errors
    ///
    /// Same as [`Scene::add_desk`].
    pub fn add_wall(&mut self, requested: Point, cfg: &EditorConfig) -> Result<(ObjectId, Placement), SceneError> {
        let size = Size::new(
            cfg.default_wall_size.width.max(cfg.wall_min_size.width),
            cfg.default_wall_size.height.max(cfg.wall_min_size.height),
        );
        self.add_object(ObjectKind::Wall, requested, size, cfg)
    }

    fn add_object(
        &mut self,
        kind: ObjectKind,
        requested: Point,
        size: Size,
        cfg: &EditorConfig,
    ) -> Result<(ObjectId, Placement), SceneError> {
        let placement = placement::place(self, kind, size, requested, cfg)?;
        let id = self.insert_object(kind, placement.pos, size)?;
        Ok((id, placement))
    }

    /// Remove an object, clearing the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan`, `PlanConfirmed`, or `ObjectNotFound`.
    pub fn remove_object(&mut self, id: &ObjectId) -> Result<PlacedObject, SceneError> {
        self.editable_plan()?;
        let removed = self.objects.remove(id).ok_or(SceneError::ObjectNotFound(*id))?;
        if self.selection == Selection::Object(*id) {
            self.selection = Selection::None;
        }
        Ok(removed)
    }

    /// Look up an object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    /// Mutable access to an object, only while the plan is editable.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan`, `PlanConfirmed`, or `ObjectNotFound`.
    pub fn get_mut(&mut self, id: &ObjectId) -> Result<&mut PlacedObject, SceneError> {
        self.editable_plan()?;
        self.objects.get_mut(id).ok_or(SceneError::ObjectNotFound(*id))
    }

    /// Mutable access that ignores the confirmed flag. Used by the animation
    /// scheduler, which only moves rendered positions toward validated targets.
    pub(crate) fn get_rendered_mut(&mut self, id: &ObjectId) -> Option<&mut PlacedObject> {
        self.objects.get_mut(id)
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&PlacedObject> {
        let mut objs: Vec<&PlacedObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.seq.cmp(&b.seq).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    /// Iterate over objects in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }

    /// Number of objects of `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // --- Selection ---

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Change the selection. Selecting one entity implicitly clears the other.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` when selecting a missing plan and `ObjectNotFound` for an unknown id.
    pub fn select(&mut self, selection: Selection) -> Result<(), SceneError> {
        match selection {
            Selection::None => {}
            Selection::Plan => {
                if self.plan.is_none() {
                    return Err(SceneError::NoPlan);
                }
            }
            Selection::Object(id) => {
                if !self.objects.contains_key(&id) {
                    return Err(SceneError::ObjectNotFound(id));
                }
            }
        }
        self.selection = selection;
        Ok(())
    }

    /// Replace the whole scene. Used by snapshot hydration after validation.
    pub(crate) fn replace(&mut self, plan: Option<Plan>, objects: Vec<PlacedObject>) {
        self.plan = plan;
        self.next_seq = objects.iter().map(|o| o.seq + 1).max().unwrap_or(0);
        self.objects = objects.into_iter().map(|o| (o.id, o)).collect();
        self.selection = Selection::None;
    }
}
