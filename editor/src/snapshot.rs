//! Read-only scene snapshots and the status line.
//!
//! A [`Snapshot`] is what external collaborators see after every committed
//! mutation: plan dimensions, the confirmed flag, and each object's validated
//! geometry. Object positions are targets, not the eased rendered positions,
//! so a snapshot never captures an in-between animation frame.
//!
//! [`load_snapshot`] is the inverse: it rebuilds a scene from a snapshot,
//! refusing anything that breaks containment, overlap, or the touch budget.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};

use crate::collision;
use crate::config::EditorConfig;
use crate::doc::{ObjectId, ObjectKind, PlacedObject, Plan, Scene};
use crate::error::SceneError;
use crate::geometry::{self, Size};

/// Containment slack for hydrated geometry, absorbing float noise from serialization.
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub plan_x: f64,
    pub plan_y: f64,
    pub plan_width: f64,
    pub plan_height: f64,
    pub confirmed: bool,
    pub objects: Vec<ObjectSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl From<&PlacedObject> for ObjectSnapshot {
    fn from(obj: &PlacedObject) -> Self {
        Self {
            id: obj.id,
            kind: obj.kind,
            x: obj.target_x,
            y: obj.target_y,
            width: obj.width,
            height: obj.height,
            rotation: obj.rotation,
        }
    }
}

/// Capture the scene. `None` when no plan exists.
#[must_use]
pub fn snapshot(scene: &Scene) -> Option<Snapshot> {
    let plan = scene.plan()?;
    Some(Snapshot {
        plan_x: plan.x,
        plan_y: plan.y,
        plan_width: plan.width,
        plan_height: plan.height,
        confirmed: plan.confirmed,
        objects: scene.sorted_objects().into_iter().map(ObjectSnapshot::from).collect(),
    })
}

/// Human-readable summary, e.g. `"Plan 400x300, 2 desks, 1 wall"`.
#[must_use]
pub fn status(scene: &Scene) -> String {
    let Some(plan) = scene.plan() else {
        return "No plan".to_owned();
    };
    let desks = scene.count_kind(ObjectKind::Desk);
    let walls = scene.count_kind(ObjectKind::Wall);
    let mut line = format!(
        "Plan {}x{}, {}, {}",
        plan.width,
        plan.height,
        plural(desks, "desk"),
        plural(walls, "wall")
    );
    if plan.confirmed {
        line.push_str(", confirmed");
    }
    line
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 { format!("1 {noun}") } else { format!("{n} {noun}s") }
}

/// Replace `scene` with the contents of `snap`.
///
/// The scene is left untouched when validation fails.
///
/// # Errors
///
/// Returns `InvalidSnapshot` describing the first violated rule.
pub fn load_snapshot(scene: &mut Scene, snap: &Snapshot, cfg: &EditorConfig) -> Result<(), SceneError> {
    let plan = Plan {
        x: snap.plan_x,
        y: snap.plan_y,
        width: snap.plan_width,
        height: snap.plan_height,
        confirmed: snap.confirmed,
    };
    if !(plan.width > 0.0 && plan.height > 0.0) {
        return Err(invalid("plan has no area"));
    }
    if !cfg.container().contains_rect(&plan.rect(), TOLERANCE) {
        return Err(invalid("plan exceeds the container"));
    }

    let mut objects = Vec::with_capacity(snap.objects.len());
    for (seq, o) in (0u64..).zip(&snap.objects) {
        match o.kind {
            ObjectKind::Desk => {
                let fixed = cfg.desk_size;
                if (o.width - fixed.width).abs() > TOLERANCE
                    || (o.height - fixed.height).abs() > TOLERANCE
                {
                    return Err(invalid(&format!("desk {} is not {}x{}", o.id, fixed.width, fixed.height)));
                }
            }
            ObjectKind::Wall => {
                let min = min_size(o.kind, cfg);
                if o.width < min.width || o.height < min.height {
                    return Err(invalid(&format!("wall {} is below the minimum size", o.id)));
                }
            }
        }
        if !is_quarter_turn(o.rotation) {
            return Err(invalid(&format!("{} {} has rotation {} off the quarter turns", o.kind, o.id, o.rotation)));
        }
        let mut obj = PlacedObject {
            id: o.id,
            kind: o.kind,
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            width: o.width,
            height: o.height,
            rotation: geometry::normalize_rotation((o.rotation / 90.0).round() * 90.0),
            seq,
        };
        obj.place_at(geometry::Point::new(o.x, o.y));
        if !plan.local_bounds().contains_rect(&obj.effective_rect(), TOLERANCE) {
            return Err(invalid(&format!("{} {} lies outside the plan", o.kind, o.id)));
        }
        objects.push(obj);
    }

    let mut staged = Scene::new();
    staged.replace(Some(plan), objects);
    if staged.len() != snap.objects.len() {
        return Err(invalid("duplicate object ids"));
    }
    for obj in staged.sorted_objects() {
        let count = collision::touch_count(&staged, &obj.effective_rect(), Some(obj.id), cfg.touch_epsilon);
        if !count.is_acceptable(cfg.max_touches) {
            return Err(invalid(&format!("{} {} overlaps or touches too many neighbours", obj.kind, obj.id)));
        }
    }

    *scene = staged;
    tracing::info!(objects = scene.len(), "scene loaded from snapshot");
    Ok(())
}

/// Minimum nominal size for an object kind.
#[must_use]
pub fn min_size(kind: ObjectKind, cfg: &EditorConfig) -> Size {
    match kind {
        ObjectKind::Desk => cfg.desk_size,
        ObjectKind::Wall => cfg.wall_min_size,
    }
}

fn is_quarter_turn(deg: f64) -> bool {
    let turns = deg / 90.0;
    turns.is_finite() && (turns - turns.round()).abs() <= TOLERANCE
}

fn invalid(reason: &str) -> SceneError {
    tracing::warn!(%reason, "snapshot rejected");
    SceneError::InvalidSnapshot(reason.to_owned())
}
