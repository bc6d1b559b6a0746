//! Interaction controller: turns host input into validated scene mutations.
//!
//! `EngineCore` owns the scene together with all transient interaction state
//! (active gesture, activation counter, animation queue). Every handler returns
//! the list of [`Action`]s the host should react to; nothing here renders or
//! schedules timers. The host drives [`EngineCore::tick`] once per frame.
//!
//! Candidate geometry from drags and wall resizes is always run through the
//! collision engine before it is committed. A refused frame leaves the scene
//! untouched and raises [`UiState::last_rejected`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::animation::AnimationScheduler;
use crate::collision::{self, TouchCount};
use crate::config::EditorConfig;
use crate::doc::{ObjectId, ObjectKind, PlacedObject, Plan, Scene, Selection};
use crate::error::SceneError;
use crate::geometry::{self, Point, Rect, Size};
use crate::hit::{self, ResizeAnchor, Target};
use crate::input::{ActivationTracker, InputState, Key, UiState};
use crate::placement;
use crate::snapshot::{self, Snapshot};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PlanCreated { width: f64, height: f64 },
    PlanDeleted { discarded: usize },
    PlanConfirmed,
    PlanUnconfirmed,
    /// New plan rectangle, container space.
    PlanResized { rect: Rect },
    ObjectCreated { id: ObjectId, kind: ObjectKind, x: f64, y: f64, relocated: bool },
    /// The object's target moved; its rendered position follows via `tick`.
    ObjectMoved { id: ObjectId, x: f64, y: f64 },
    ObjectResized { id: ObjectId, x: f64, y: f64, width: f64, height: f64 },
    ObjectRotated { id: ObjectId, rotation: f64 },
    ObjectDeleted { id: ObjectId },
    SelectionChanged(Selection),
    /// The host should ask the user and answer with [`EngineCore::confirm_delete`].
    DeleteConfirmationRequested { id: ObjectId },
    /// A candidate frame was discarded. Show a transient warning on `target`.
    Blocked { target: Target },
    /// A new object could not be placed anywhere.
    PlacementFailed { message: String },
    /// Emitted after every committed mutation.
    Committed { snapshot: Option<Snapshot>, status: String },
    RenderNeeded,
}

/// Editor state and interaction logic, independent of any presentation layer.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub scene: Scene,
    pub config: EditorConfig,
    pub ui: UiState,
    pub input: InputState,
    pub animation: AnimationScheduler,
    activations: ActivationTracker,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self { config: config.normalized(), ..Self::default() }
    }

    // --- Plan lifecycle ---

    /// Create the plan at the container origin.
    ///
    /// The size defaults to the configured plan size, is rounded to the active
    /// grid, floored at the plan minimum, and capped by the container.
    ///
    /// # Errors
    ///
    /// Returns `PlanExists` when a plan is already present.
    pub fn create_plan(&mut self, size: Option<Size>) -> Result<Vec<Action>, SceneError> {
        let requested = size.unwrap_or(self.config.default_plan_size);
        let container = self.config.container();
        let grid = self.config.active_grid();
        let min = self.config.plan_min_size;
        let width = geometry::snap_to_grid(requested.width, grid).max(min.width).min(container.width);
        let height = geometry::snap_to_grid(requested.height, grid).max(min.height).min(container.height);

        self.scene.create_plan(Rect::new(container.x, container.y, width, height))?;
        self.reset_interaction();
        tracing::info!(width, height, "plan created");
        Ok(vec![Action::PlanCreated { width, height }, self.committed(), Action::RenderNeeded])
    }

    /// Delete the plan and everything on it. A no-op while confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` when there is nothing to delete.
    pub fn delete_plan(&mut self) -> Result<Vec<Action>, SceneError> {
        let Some(discarded) = unless_confirmed(self.scene.delete_plan(), "delete plan")? else {
            return Ok(Vec::new());
        };
        self.reset_interaction();
        self.animation.clear();
        tracing::info!(discarded, "plan deleted");
        Ok(vec![Action::PlanDeleted { discarded }, self.committed(), Action::RenderNeeded])
    }

    /// Freeze the plan. Any gesture in progress is abandoned on its next frame.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` when no plan exists.
    pub fn confirm_plan(&mut self) -> Result<Vec<Action>, SceneError> {
        if !self.scene.confirm_plan()? {
            return Ok(Vec::new());
        }
        self.ui.pending_delete = None;
        tracing::info!("plan confirmed");
        Ok(vec![Action::PlanConfirmed, self.committed(), Action::RenderNeeded])
    }

    /// # Errors
    ///
    /// Returns `NoPlan` when no plan exists.
    pub fn unconfirm_plan(&mut self) -> Result<Vec<Action>, SceneError> {
        if !self.scene.unconfirm_plan()? {
            return Ok(Vec::new());
        }
        tracing::info!("plan unconfirmed");
        Ok(vec![Action::PlanUnconfirmed, self.committed(), Action::RenderNeeded])
    }

    // --- Objects ---

    /// Add a desk at `pos` (plan-local), relocating it if that spot is taken.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan`, or `NoSpaceAvailable` when no slot is free.
    pub fn add_desk(&mut self, pos: Point) -> Result<Vec<Action>, SceneError> {
        let result = self.scene.add_desk(pos, &self.config);
        self.finish_add(ObjectKind::Desk, result)
    }

    /// Add a wall of the default size at `pos` (plan-local).
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::add_desk`].
    pub fn add_wall(&mut self, pos: Point) -> Result<Vec<Action>, SceneError> {
        let result = self.scene.add_wall(pos, &self.config);
        self.finish_add(ObjectKind::Wall, result)
    }

    fn finish_add(
        &mut self,
        kind: ObjectKind,
        result: Result<(ObjectId, placement::Placement), SceneError>,
    ) -> Result<Vec<Action>, SceneError> {
        let Some((id, placed)) = unless_confirmed(result, "add object")? else {
            return Ok(Vec::new());
        };
        tracing::info!(%id, %kind, x = placed.pos.x, y = placed.pos.y, "object added");
        Ok(vec![
            Action::ObjectCreated { id, kind, x: placed.pos.x, y: placed.pos.y, relocated: placed.relocated },
            self.committed(),
            Action::RenderNeeded,
        ])
    }

    /// Delete an object. A no-op while the plan is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan` or `ObjectNotFound`.
    pub fn remove_object(&mut self, id: &ObjectId) -> Result<Vec<Action>, SceneError> {
        let was_selected = self.scene.selection() == Selection::Object(*id);
        let Some(removed) = unless_confirmed(self.scene.remove_object(id), "remove object")? else {
            return Ok(Vec::new());
        };
        self.animation.cancel(id);
        if self.ui.pending_delete == Some(*id) {
            self.ui.pending_delete = None;
        }
        if self.input.owner().and_then(Target::object_id) == Some(*id) {
            self.input = InputState::Idle;
        }
        tracing::info!(%id, kind = %removed.kind, "object removed");

        let mut actions = vec![Action::ObjectDeleted { id: *id }];
        if was_selected {
            actions.push(Action::SelectionChanged(Selection::None));
        }
        actions.push(self.committed());
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Answer a [`Action::DeleteConfirmationRequested`] in the affirmative.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::remove_object`].
    pub fn confirm_delete(&mut self, id: &ObjectId) -> Result<Vec<Action>, SceneError> {
        self.remove_object(id)
    }

    /// # Errors
    ///
    /// Returns `NoPlan` or `ObjectNotFound` for a selection that does not exist.
    pub fn select(&mut self, selection: Selection) -> Result<Vec<Action>, SceneError> {
        let mut actions = Vec::new();
        self.select_into(selection, &mut actions)?;
        Ok(actions)
    }

    fn select_into(&mut self, selection: Selection, actions: &mut Vec<Action>) -> Result<(), SceneError> {
        if self.scene.selection() != selection {
            self.scene.select(selection)?;
            actions.push(Action::SelectionChanged(selection));
            actions.push(Action::RenderNeeded);
        }
        Ok(())
    }

    // --- Pointer input ---

    /// Start a gesture on `target` at container point `pt`.
    ///
    /// Pressing an entity selects it. Objects start dragging when the plan is
    /// editable and they are not still animating. Handles start a resize only
    /// when their owner is already selected.
    ///
    /// # Errors
    ///
    /// Returns `NoPlan`, or `ObjectNotFound` for an unknown object id.
    pub fn on_pointer_down(&mut self, target: Target, pt: Point) -> Result<Vec<Action>, SceneError> {
        if let Some(owner) = self.input.owner() {
            tracing::debug!(?owner, ?target, "pointer down ignored; gesture already active");
            return Ok(Vec::new());
        }
        let plan = self.scene.plan().ok_or(SceneError::NoPlan)?;
        let plan_rect = plan.rect();
        let local = plan.to_local(pt);
        let editable = !plan.confirmed;

        self.ui.last_rejected = false;
        let mut actions = Vec::new();

        match target {
            Target::Plan => self.select_into(Selection::Plan, &mut actions)?,
            Target::PlanHandle(anchor) => {
                if editable && self.scene.selection() == Selection::Plan {
                    self.input = InputState::ResizingPlan { anchor, start: pt, orig: plan_rect };
                } else {
                    self.select_into(Selection::Plan, &mut actions)?;
                }
            }
            Target::ObjectHandle(id, anchor) if editable && self.is_resizable_handle(id, anchor) => {
                let obj = self.scene.get(&id).ok_or(SceneError::ObjectNotFound(id))?;
                self.input = InputState::ResizingWall {
                    id,
                    anchor,
                    start: pt,
                    orig_pos: obj.target(),
                    orig_size: obj.size(),
                };
            }
            Target::Object(id) | Target::ObjectHandle(id, _) => {
                let obj = self.scene.get(&id).ok_or(SceneError::ObjectNotFound(id))?;
                let grab_offset = local.sub(obj.target());
                let animating = obj.is_animating(self.config.animation_epsilon);
                self.select_into(Selection::Object(id), &mut actions)?;
                if !editable {
                    tracing::debug!(%id, "drag ignored while plan is confirmed");
                } else if animating {
                    tracing::debug!(%id, "drag refused; object still animating");
                } else {
                    self.input = InputState::DraggingObject { id, grab_offset };
                }
            }
        }
        Ok(actions)
    }

    /// Advance the active gesture to container point `pt`.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        if !self.gesture_is_valid() {
            tracing::debug!(gesture = ?self.input, "gesture abandoned; owner no longer editable");
            self.input = InputState::Idle;
            return Vec::new();
        }
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::DraggingObject { id, grab_offset } => self.drag_frame(id, grab_offset, pt),
            InputState::ResizingPlan { anchor, start, orig } => self.resize_plan_frame(anchor, start, orig, pt),
            InputState::ResizingWall { id, anchor, start, orig_pos, orig_size } => {
                self.resize_wall_frame(id, anchor, pt.sub(start), orig_pos, orig_size)
            }
        }
    }

    /// End the active gesture. A dragged object keeps easing toward its last accepted target.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Primary activation (click/tap) on `target` at host time `now_ms`.
    ///
    /// A second activation on the same object within the activation window
    /// rotates it by a quarter turn. A third requests deletion.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` for an unknown object id.
    pub fn on_primary_activate(&mut self, target: Target, now_ms: f64) -> Result<Vec<Action>, SceneError> {
        let count = self.activations.register(target, now_ms, self.config.multi_activate_window_ms);
        let Target::Object(id) = target else {
            return Ok(Vec::new());
        };
        if self.scene.get(&id).is_none() {
            return Err(SceneError::ObjectNotFound(id));
        }
        match count {
            2 => self.rotate(id),
            3 => {
                self.activations.reset();
                Ok(self.request_delete(id))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Context action on `target` at container point `pt`: add a desk there.
    ///
    /// Only the plan body or its handles accept the action, and only while
    /// the plan is editable. Placement exhaustion is reported as
    /// [`Action::PlacementFailed`].
    ///
    /// # Errors
    ///
    /// Structural failures other than placement exhaustion.
    pub fn on_secondary_activate(&mut self, target: Target, pt: Point) -> Result<Vec<Action>, SceneError> {
        if !target.is_plan() {
            return Ok(Vec::new());
        }
        let Some(plan) = self.scene.plan().filter(|p| !p.confirmed) else {
            tracing::debug!("context action ignored; no editable plan");
            return Ok(Vec::new());
        };
        let local = plan.to_local(pt);
        match self.add_desk(local) {
            Err(err) if err.is_user_facing() => Ok(vec![Action::PlacementFailed { message: err.to_string() }]),
            other => other,
        }
    }

    /// Keyboard shortcuts.
    ///
    /// `Delete`/`Backspace` request deletion of the selected object. `Escape`
    /// cancels the active gesture, restores pre-resize geometry, and clears
    /// the selection.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => match self.scene.selection() {
                Selection::Object(id) => self.request_delete(id),
                Selection::Plan | Selection::None => Vec::new(),
            },
            "Escape" => self.cancel(),
            _ => Vec::new(),
        }
    }

    // --- Animation ---

    /// Advance every animating object by one frame.
    pub fn tick(&mut self) -> Vec<Action> {
        let moved = self.animation.tick(&mut self.scene, self.config.smoothing_factor, self.config.animation_epsilon);
        if moved.is_empty() { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    // --- Snapshot ---

    /// Current scene snapshot, `None` without a plan.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        snapshot::snapshot(&self.scene)
    }

    #[must_use]
    pub fn status(&self) -> String {
        snapshot::status(&self.scene)
    }

    /// Replace the scene with a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot`; the current scene is kept. A confirmed
    /// plan is never replaced.
    pub fn load_snapshot(&mut self, snap: &Snapshot) -> Result<Vec<Action>, SceneError> {
        if self.scene.plan().is_some() {
            let editable = self.scene.editable_plan().map(|_| ());
            if unless_confirmed(editable, "load_snapshot")?.is_none() {
                return Ok(Vec::new());
            }
        }
        snapshot::load_snapshot(&mut self.scene, snap, &self.config)?;
        self.reset_interaction();
        self.animation.clear();
        Ok(vec![self.committed(), Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        self.scene.plan()
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.scene.get(id)
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.scene.selection()
    }

    /// Resolve a container-space point to an input target.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<Target> {
        hit::hit_test(&self.scene, pt, self.config.handle_radius)
    }

    /// Whether any object is still easing toward its target.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animation.is_idle()
    }

    // --- Internals ---

    fn committed(&self) -> Action {
        Action::Committed { snapshot: self.snapshot(), status: self.status() }
    }

    fn reset_interaction(&mut self) {
        self.input = InputState::Idle;
        self.ui = UiState::default();
        self.activations.reset();
    }

    fn is_resizable_handle(&self, id: ObjectId, anchor: ResizeAnchor) -> bool {
        anchor.is_corner()
            && self.scene.selection() == Selection::Object(id)
            && self.scene.get(&id).is_some_and(|o| o.kind == ObjectKind::Wall)
    }

    /// Frame-level validity check: the plan must still be editable and the
    /// gesture's object must still exist.
    fn gesture_is_valid(&self) -> bool {
        if self.scene.editable_plan().is_err() {
            return false;
        }
        match &self.input {
            InputState::Idle => false,
            InputState::ResizingPlan { .. } => true,
            InputState::DraggingObject { id, .. } | InputState::ResizingWall { id, .. } => self.scene.get(id).is_some(),
        }
    }

    fn reject(&mut self, target: Target, count: TouchCount, neighbours: &[ObjectId]) -> Vec<Action> {
        self.ui.last_rejected = true;
        tracing::debug!(?target, ?count, ?neighbours, "frame blocked");
        vec![Action::Blocked { target }]
    }

    fn drag_frame(&mut self, id: ObjectId, grab_offset: Point, pt: Point) -> Vec<Action> {
        let Some(plan) = self.scene.plan() else {
            return Vec::new();
        };
        let bounds = plan.local_bounds();
        let local = plan.to_local(pt);
        let Some(obj) = self.scene.get(&id) else {
            return Vec::new();
        };
        let (size, rotation, current) = (obj.size(), obj.rotation, obj.target());

        let pos = placement::resolve_request(local.sub(grab_offset), size, rotation, bounds, &self.config);
        if pos == current {
            return Vec::new();
        }
        let rect = geometry::effective_rect(pos, size, rotation);
        let count = collision::touch_count(&self.scene, &rect, Some(id), self.config.touch_epsilon);
        if !count.is_acceptable(self.config.max_touches) {
            let neighbours = collision::touching_ids(&self.scene, &rect, Some(id), self.config.touch_epsilon);
            return self.reject(Target::Object(id), count, &neighbours);
        }

        match self.scene.get_mut(&id) {
            Ok(obj) => {
                obj.target_x = pos.x;
                obj.target_y = pos.y;
            }
            Err(err) => {
                tracing::debug!(%id, error = %err, "drag frame dropped");
                return Vec::new();
            }
        }
        self.animation.schedule(id);
        self.ui.last_rejected = false;
        vec![Action::ObjectMoved { id, x: pos.x, y: pos.y }, self.committed(), Action::RenderNeeded]
    }

    fn resize_plan_frame(&mut self, anchor: ResizeAnchor, start: Point, orig: Rect, pt: Point) -> Vec<Action> {
        let Some(plan) = self.scene.plan() else {
            return Vec::new();
        };
        let current = plan.rect();
        let content = content_bounds(&self.scene, plan);
        let container = self.config.container();
        let grid = self.config.active_grid();
        let min = self.config.plan_min_size;
        let delta = pt.sub(start);
        let (sx, sy) = anchor.signs();

        let (left, right) = resize_axis(
            (orig.x, orig.right()),
            sx,
            delta.x,
            min.width,
            grid,
            content.map(|c| (c.x, c.right())),
            (container.x, container.right()),
        );
        let (top, bottom) = resize_axis(
            (orig.y, orig.bottom()),
            sy,
            delta.y,
            min.height,
            grid,
            content.map(|c| (c.y, c.bottom())),
            (container.y, container.bottom()),
        );
        let rect = Rect::new(left, top, right - left, bottom - top);
        if rect == current {
            return Vec::new();
        }
        if let Err(err) = self.scene.set_plan_rect(rect) {
            tracing::debug!(error = %err, "plan resize frame dropped");
            return Vec::new();
        }
        vec![Action::PlanResized { rect }, self.committed(), Action::RenderNeeded]
    }

    fn resize_wall_frame(
        &mut self,
        id: ObjectId,
        anchor: ResizeAnchor,
        delta: Point,
        orig_pos: Point,
        orig_size: Size,
    ) -> Vec<Action> {
        let Some(plan) = self.scene.plan() else {
            return Vec::new();
        };
        let bounds = plan.local_bounds();
        let Some(obj) = self.scene.get(&id) else {
            return Vec::new();
        };
        let rotation = obj.rotation;
        let current = (obj.target(), obj.size());
        let grid = self.config.active_grid();
        let min = self.config.wall_min_size;
        let target = Target::ObjectHandle(id, anchor);

        let local_delta = geometry::unrotate_vec(delta, rotation);
        let (sx, sy) = anchor.signs();
        let size = Size::new(
            geometry::snap_to_grid(orig_size.width + sx * local_delta.x, grid).max(min.width),
            geometry::snap_to_grid(orig_size.height + sy * local_delta.y, grid).max(min.height),
        );
        let (ew, eh) = geometry::effective_bounds(size.width, size.height, rotation);
        if ew > bounds.width || eh > bounds.height {
            return self.reject(target, TouchCount::Touches(0), &[]);
        }
        let pinned = pin_opposite_corner(orig_pos, orig_size, size, anchor, rotation);
        let pos = geometry::clamp_rotated(pinned, size, rotation, bounds);
        if (pos, size) == current {
            return Vec::new();
        }

        let rect = geometry::effective_rect(pos, size, rotation);
        let count = collision::touch_count(&self.scene, &rect, Some(id), self.config.touch_epsilon);
        if !count.is_acceptable(self.config.max_touches) {
            let neighbours = collision::touching_ids(&self.scene, &rect, Some(id), self.config.touch_epsilon);
            return self.reject(target, count, &neighbours);
        }

        match self.scene.get_mut(&id) {
            Ok(obj) => {
                obj.width = size.width;
                obj.height = size.height;
                obj.place_at(pos);
            }
            Err(err) => {
                tracing::debug!(%id, error = %err, "wall resize frame dropped");
                return Vec::new();
            }
        }
        self.animation.cancel(&id);
        self.ui.last_rejected = false;
        vec![
            Action::ObjectResized { id, x: pos.x, y: pos.y, width: size.width, height: size.height },
            self.committed(),
            Action::RenderNeeded,
        ]
    }

    fn rotate(&mut self, id: ObjectId) -> Result<Vec<Action>, SceneError> {
        let Some(obj) = unless_confirmed(self.scene.get_mut(&id), "rotate")? else {
            return Ok(Vec::new());
        };
        obj.rotation = geometry::normalize_rotation(obj.rotation + 90.0);
        let rotation = obj.rotation;
        tracing::info!(%id, rotation, "object rotated");
        Ok(vec![Action::ObjectRotated { id, rotation }, self.committed(), Action::RenderNeeded])
    }

    fn request_delete(&mut self, id: ObjectId) -> Vec<Action> {
        if self.scene.editable_plan().is_err() {
            tracing::debug!(%id, "delete request ignored; plan not editable");
            return Vec::new();
        }
        self.ui.pending_delete = Some(id);
        vec![Action::DeleteConfirmationRequested { id }]
    }

    fn cancel(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::ResizingPlan { orig, .. } => {
                if self.scene.set_plan_rect(orig).is_ok() {
                    actions.push(Action::PlanResized { rect: orig });
                    actions.push(self.committed());
                }
            }
            InputState::ResizingWall { id, orig_pos, orig_size, .. } => {
                if let Ok(obj) = self.scene.get_mut(&id) {
                    obj.width = orig_size.width;
                    obj.height = orig_size.height;
                    obj.place_at(orig_pos);
                    actions.push(Action::ObjectResized {
                        id,
                        x: orig_pos.x,
                        y: orig_pos.y,
                        width: orig_size.width,
                        height: orig_size.height,
                    });
                    actions.push(self.committed());
                }
            }
            InputState::Idle | InputState::DraggingObject { .. } => {}
        }
        self.ui.pending_delete = None;
        if self.scene.selection() != Selection::None && self.scene.select(Selection::None).is_ok() {
            actions.push(Action::SelectionChanged(Selection::None));
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

/// Collapse a confirmed-plan refusal into a logged no-op.
fn unless_confirmed<T>(result: Result<T, SceneError>, op: &str) -> Result<Option<T>, SceneError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SceneError::PlanConfirmed) => {
            tracing::debug!(op, "ignored while plan is confirmed");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Union of every object's effective box, in container space.
fn content_bounds(scene: &Scene, plan: &Plan) -> Option<Rect> {
    scene
        .objects()
        .map(PlacedObject::effective_rect)
        .reduce(|a, b| {
            let x = a.x.min(b.x);
            let y = a.y.min(b.y);
            Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
        })
        .map(|r| Rect::new(r.x + plan.x, r.y + plan.y, r.width, r.height))
}

/// Move one edge of the span `(lo, hi)` by `delta` in the direction `sign`.
///
/// The new length is grid-rounded and floored at `min` with the opposite edge
/// fixed. The moving edge then snaps out to cover `content` and is clipped to
/// `limit`.
fn resize_axis(
    span: (f64, f64),
    sign: f64,
    delta: f64,
    min: f64,
    grid: f64,
    content: Option<(f64, f64)>,
    limit: (f64, f64),
) -> (f64, f64) {
    let (lo, hi) = span;
    let (mut lo, mut hi) = if sign < 0.0 {
        let len = geometry::snap_to_grid(hi - lo - delta, grid).max(min);
        (hi - len, hi)
    } else if sign > 0.0 {
        let len = geometry::snap_to_grid(hi - lo + delta, grid).max(min);
        (lo, lo + len)
    } else {
        return span;
    };
    if let Some((cmin, cmax)) = content {
        lo = lo.min(cmin);
        hi = hi.max(cmax);
    }
    (lo.max(limit.0), hi.min(limit.1))
}

/// Top-left for a rotated rectangle resized from `anchor` such that the
/// corner opposite `anchor` stays where it was in plan space.
fn pin_opposite_corner(orig_pos: Point, orig_size: Size, size: Size, anchor: ResizeAnchor, rotation: f64) -> Point {
    let (sx, sy) = anchor.signs();
    let orig_center = Point::new(orig_pos.x + orig_size.width / 2.0, orig_pos.y + orig_size.height / 2.0);
    let fixed = orig_center.add(geometry::rotate_vec(
        Point::new(-sx * orig_size.width / 2.0, -sy * orig_size.height / 2.0),
        rotation,
    ));
    let center = fixed.add(geometry::rotate_vec(Point::new(sx * size.width / 2.0, sy * size.height / 2.0), rotation));
    Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0)
}
