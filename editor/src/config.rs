//! Editor configuration.
//!
//! DESIGN
//! ======
//! One flat struct carries every tunable knob. Defaults come from
//! [`crate::consts`]; hosts may deserialize a partial JSON document over the
//! defaults (`#[serde(default)]`) and then overlay `DESKPLAN_*` environment
//! variables. Values that would break the geometry (zero grid, smoothing
//! factor outside `(0, 1]`) are repaired by [`EditorConfig::normalized`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::geometry::{Rect, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid step for snapping and for the placement scan.
    pub grid_size: f64,
    /// Round dragged positions and resized sizes to the grid.
    pub snap_to_grid: bool,
    /// Fixed nominal desk size.
    pub desk_size: Size,
    /// Minimum wall size.
    pub wall_min_size: Size,
    /// Nominal size of a freshly added wall.
    pub default_wall_size: Size,
    /// Minimum plan size.
    pub plan_min_size: Size,
    /// Plan size used when the host does not pass one.
    pub default_plan_size: Size,
    /// Container the plan is placed in.
    pub container_size: Size,
    /// Most neighbours an object may touch at once.
    pub max_touches: usize,
    /// Edge distance that still counts as touching.
    pub touch_epsilon: f64,
    /// Fraction of the remaining distance covered per animation tick.
    pub smoothing_factor: f64,
    /// Per-axis distance at which animation stops.
    pub animation_epsilon: f64,
    /// Window (ms) in which repeated primary activations chain.
    pub multi_activate_window_ms: f64,
    /// Hit slop around resize handles.
    pub handle_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: consts::GRID_SIZE,
            snap_to_grid: true,
            desk_size: Size::new(consts::DESK_WIDTH, consts::DESK_HEIGHT),
            wall_min_size: Size::new(consts::WALL_MIN_WIDTH, consts::WALL_MIN_HEIGHT),
            default_wall_size: Size::new(consts::WALL_DEFAULT_WIDTH, consts::WALL_DEFAULT_HEIGHT),
            plan_min_size: Size::new(consts::PLAN_MIN_WIDTH, consts::PLAN_MIN_HEIGHT),
            default_plan_size: Size::new(consts::PLAN_DEFAULT_WIDTH, consts::PLAN_DEFAULT_HEIGHT),
            container_size: Size::new(consts::CONTAINER_WIDTH, consts::CONTAINER_HEIGHT),
            max_touches: consts::MAX_TOUCHES,
            touch_epsilon: consts::TOUCH_EPSILON,
            smoothing_factor: consts::SMOOTHING_FACTOR,
            animation_epsilon: consts::ANIMATION_EPSILON,
            multi_activate_window_ms: consts::MULTI_ACTIVATE_WINDOW_MS,
            handle_radius: consts::HANDLE_RADIUS_PX,
        }
    }
}

impl EditorConfig {
    /// Defaults overlaid with `DESKPLAN_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Overlay `DESKPLAN_*` environment variables on `self`.
    #[must_use]
    pub fn overlay_env(self) -> Self {
        self.overlay_with(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Overlay values produced by `lookup` (keyed by environment variable name).
    ///
    /// Unparseable values are ignored and the current value kept.
    #[must_use]
    pub fn overlay_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.grid_size = parse_or(&lookup, "DESKPLAN_GRID_SIZE", self.grid_size);
        self.snap_to_grid = parse_or(&lookup, "DESKPLAN_SNAP_TO_GRID", self.snap_to_grid);
        self.max_touches = parse_or(&lookup, "DESKPLAN_MAX_TOUCHES", self.max_touches);
        self.touch_epsilon = parse_or(&lookup, "DESKPLAN_TOUCH_EPSILON", self.touch_epsilon);
        self.smoothing_factor = parse_or(&lookup, "DESKPLAN_SMOOTHING_FACTOR", self.smoothing_factor);
        self.animation_epsilon = parse_or(&lookup, "DESKPLAN_ANIMATION_EPSILON", self.animation_epsilon);
        self.container_size.width = parse_or(&lookup, "DESKPLAN_CONTAINER_WIDTH", self.container_size.width);
        self.container_size.height = parse_or(&lookup, "DESKPLAN_CONTAINER_HEIGHT", self.container_size.height);
        self.multi_activate_window_ms =
            parse_or(&lookup, "DESKPLAN_MULTI_ACTIVATE_WINDOW_MS", self.multi_activate_window_ms);
        self
    }

    /// Repair values that would make the geometry degenerate.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.grid_size.is_nan() || self.grid_size < 1.0 {
            self.grid_size = defaults.grid_size;
        }
        if self.smoothing_factor.is_nan() || self.smoothing_factor <= 0.0 || self.smoothing_factor > 1.0 {
            self.smoothing_factor = defaults.smoothing_factor;
        }
        if self.animation_epsilon.is_nan() || self.animation_epsilon <= 0.0 {
            self.animation_epsilon = defaults.animation_epsilon;
        }
        if self.touch_epsilon.is_nan() || self.touch_epsilon < 0.0 {
            self.touch_epsilon = defaults.touch_epsilon;
        }
        if self.container_size.width.is_nan()
            || self.container_size.height.is_nan()
            || self.container_size.width <= 0.0
            || self.container_size.height <= 0.0
        {
            self.container_size = defaults.container_size;
        }
        self
    }

    /// The container as a rectangle at the origin.
    #[must_use]
    pub fn container(&self) -> Rect {
        Rect::new(0.0, 0.0, self.container_size.width, self.container_size.height)
    }

    /// Unit that sizes and positions are rounded to: the grid when snapping, else 1.
    #[must_use]
    pub fn active_grid(&self) -> f64 {
        if self.snap_to_grid { self.grid_size } else { 1.0 }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or(default),
        None => default,
    }
}
