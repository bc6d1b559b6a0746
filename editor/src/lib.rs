//! Floor-plan editing core.
//!
//! This crate owns a single bounded plan surface and the desks and walls
//! placed on it. It translates abstract pointer input into validated scene
//! mutations: every drag, resize, and placement candidate is run through the
//! collision engine before it is committed, and accepted positions are eased
//! into place by an externally driven animation tick. Hosts (a browser shell,
//! a TUI, the `deskplan` script runner) feed input events in and consume the
//! returned [`engine::Action`]s and [`snapshot::Snapshot`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller: [`engine::EngineCore`] and [`engine::Action`] |
//! | [`doc`] | Scene model: plan, placed objects, selection |
//! | [`geometry`] | Points, rectangles, rotation-aware bounds, clamping, grid snapping |
//! | [`collision`] | Touch/overlap counting against the rest of the scene |
//! | [`placement`] | Row-major free-slot search for new objects |
//! | [`input`] | Gesture state machine and multi-activation tracking |
//! | [`hit`] | Input targets, resize anchors, point hit-testing |
//! | [`animation`] | Per-object position smoothing scheduler |
//! | [`snapshot`] | Read-only scene snapshot and status line |
//! | [`config`] | Editor configuration knobs |
//! | [`error`] | Scene error taxonomy |
//! | [`consts`] | Shared numeric defaults |

pub mod animation;
pub mod collision;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod placement;
pub mod snapshot;
