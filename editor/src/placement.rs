//! Placement search for new objects.
//!
//! DESIGN
//! ======
//! A requested top-left is snapped, clamped into the plan, and judged by the
//! collision engine. If it is rejected, the plan is scanned row-major
//! (top-to-bottom, left-to-right) at grid steps and the first acceptable
//! candidate wins. The scan order is fixed, so identical scenes always yield
//! the same slot. A scan candidate that would poke past the plan edge is
//! clamped back inside, and that clamp is charged as one touch.
//!
//! The scan is bounded by `(plan_w / grid) * (plan_h / grid)` collision
//! checks and runs to completion synchronously.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::collision::{self, TouchCount};
use crate::config::EditorConfig;
use crate::doc::{ObjectKind, Scene};
use crate::error::SceneError;
use crate::geometry::{self, Point, Rect, Size};

/// Where a new object ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Accepted nominal top-left, plan-local.
    pub pos: Point,
    /// `true` when the requested position was rejected and the grid scan was used.
    pub relocated: bool,
}

/// Snap and clamp a requested top-left into the plan.
#[must_use]
pub fn resolve_request(requested: Point, size: Size, rotation: f64, bounds: Rect, cfg: &EditorConfig) -> Point {
    let grid = cfg.active_grid();
    let snapped = Point::new(
        geometry::snap_to_grid(requested.x, grid),
        geometry::snap_to_grid(requested.y, grid),
    );
    geometry::clamp_rotated(snapped, size, rotation, bounds)
}

/// Find a position for a new object of `size`, preferring `requested`.
///
/// # Errors
///
/// Returns `NoPlan`/`PlanConfirmed` when the plan cannot take objects and
/// `NoSpaceAvailable` when the grid scan is exhausted.
pub fn place(
    scene: &Scene,
    kind: ObjectKind,
    size: Size,
    requested: Point,
    cfg: &EditorConfig,
) -> Result<Placement, SceneError> {
    let bounds = scene.editable_plan()?.local_bounds();
    let pos = resolve_request(requested, size, 0.0, bounds, cfg);
    let rect = geometry::effective_rect(pos, size, 0.0);
    if collision::touch_count(scene, &rect, None, cfg.touch_epsilon).is_acceptable(cfg.max_touches) {
        return Ok(Placement { pos, relocated: false });
    }

    match find_free_slot(scene, size, 0.0, bounds, cfg) {
        Some(pos) => {
            tracing::info!(%kind, x = pos.x, y = pos.y, "requested position blocked; placed at first free slot");
            Ok(Placement { pos, relocated: true })
        }
        None => {
            tracing::warn!(%kind, "placement search exhausted");
            Err(SceneError::NoSpaceAvailable { kind })
        }
    }
}

/// Row-major grid scan for the first acceptable top-left inside `bounds`.
#[must_use]
pub fn find_free_slot(scene: &Scene, size: Size, rotation: f64, bounds: Rect, cfg: &EditorConfig) -> Option<Point> {
    let grid = cfg.grid_size.max(1.0);
    let cols = steps(bounds.width, grid);
    let rows = steps(bounds.height, grid);

    for row in 0..rows {
        for col in 0..cols {
            let candidate = Point::new(bounds.x + index_to_f64(col) * grid, bounds.y + index_to_f64(row) * grid);
            let clamped = geometry::clamp_rotated(candidate, size, rotation, bounds);
            let edge_penalty = usize::from(clamped != candidate);
            let rect = geometry::effective_rect(clamped, size, rotation);
            let count: TouchCount =
                collision::touch_count(scene, &rect, None, cfg.touch_epsilon).plus(edge_penalty);
            if count.is_acceptable(cfg.max_touches) {
                return Some(clamped);
            }
        }
    }
    None
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn steps(extent: f64, grid: f64) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    (extent / grid).ceil() as usize
}

#[allow(clippy::cast_precision_loss)]
fn index_to_f64(i: usize) -> f64 {
    i as f64
}
