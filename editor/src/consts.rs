//! Shared numeric constants for the editor crate.
//!
//! These are the defaults behind [`crate::config::EditorConfig`]; code that
//! needs a tunable value reads it from the config, not from here.

// ── Container ───────────────────────────────────────────────────

/// Width of the container the plan lives in.
pub const CONTAINER_WIDTH: f64 = 1200.0;

/// Height of the container the plan lives in.
pub const CONTAINER_HEIGHT: f64 = 650.0;

// ── Grid ────────────────────────────────────────────────────────

/// Grid step used for snapping and for the placement scan.
pub const GRID_SIZE: f64 = 10.0;

// ── Object sizes ────────────────────────────────────────────────

/// Fixed nominal desk width.
pub const DESK_WIDTH: f64 = 15.0;

/// Fixed nominal desk height.
pub const DESK_HEIGHT: f64 = 50.0;

/// Smallest width a wall can be resized to.
pub const WALL_MIN_WIDTH: f64 = 20.0;

/// Smallest height a wall can be resized to.
pub const WALL_MIN_HEIGHT: f64 = 20.0;

/// Nominal size of a freshly added wall.
pub const WALL_DEFAULT_WIDTH: f64 = 100.0;
pub const WALL_DEFAULT_HEIGHT: f64 = 20.0;

/// Smallest plan the resize handles allow.
pub const PLAN_MIN_WIDTH: f64 = 100.0;
pub const PLAN_MIN_HEIGHT: f64 = 100.0;

/// Size of a plan created without explicit dimensions.
pub const PLAN_DEFAULT_WIDTH: f64 = 600.0;
pub const PLAN_DEFAULT_HEIGHT: f64 = 400.0;

// ── Collision ───────────────────────────────────────────────────

/// Most neighbours an object may touch at once.
pub const MAX_TOUCHES: usize = 2;

/// Two edges closer than this count as touching.
pub const TOUCH_EPSILON: f64 = 1.0;

// ── Animation ───────────────────────────────────────────────────

/// Fraction of the remaining distance covered per tick.
pub const SMOOTHING_FACTOR: f64 = 0.2;

/// Per-axis distance below which an object is considered settled.
pub const ANIMATION_EPSILON: f64 = 0.1;

// ── Input ───────────────────────────────────────────────────────

/// Primary activations closer together than this (ms) chain into a double or triple.
pub const MULTI_ACTIVATE_WINDOW_MS: f64 = 400.0;

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 6.0;
