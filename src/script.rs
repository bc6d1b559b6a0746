//! JSON Lines editor scripts.
//!
//! Each non-blank line is one [`Command`], tagged by `cmd`:
//!
//! ```text
//! {"cmd":"create_plan","width":400,"height":300}
//! {"cmd":"add_desk","x":0,"y":0}
//! {"cmd":"pointer_down","x":5,"y":5}
//! {"cmd":"pointer_move","x":105,"y":55}
//! {"cmd":"pointer_up"}
//! {"cmd":"primary","target":{"object":0},"at_ms":0}
//! ```
//!
//! Objects are referenced by creation order (`{"object": 0}` is the first
//! object the script created). Pointer commands without a `target` resolve
//! one by hit-testing the point.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use editor::config::EditorConfig;
use editor::doc::{ObjectId, Selection};
use editor::engine::{Action, EngineCore};
use editor::error::SceneError;
use editor::geometry::{Point, Size};
use editor::hit::{ResizeAnchor, Target};
use editor::input::Key;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid command: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no object #{0} has been created")]
    UnknownObject(usize),
    #[error("nothing under ({x}, {y})")]
    NoTarget { x: f64, y: f64 },
    #[error("no deletion is awaiting confirmation")]
    NothingPending,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// What a script command points at.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTarget {
    Plan,
    PlanHandle(ResizeAnchor),
    Object(usize),
    ObjectHandle(usize, ResizeAnchor),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    CreatePlan {
        width: Option<f64>,
        height: Option<f64>,
    },
    DeletePlan,
    Confirm,
    Unconfirm,
    AddDesk {
        x: f64,
        y: f64,
    },
    AddWall {
        x: f64,
        y: f64,
    },
    /// Select a target; omit it to clear the selection.
    Select {
        target: Option<ScriptTarget>,
    },
    PointerDown {
        x: f64,
        y: f64,
        target: Option<ScriptTarget>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Primary {
        target: ScriptTarget,
        #[serde(default)]
        at_ms: f64,
    },
    Secondary {
        x: f64,
        y: f64,
        target: Option<ScriptTarget>,
    },
    /// Accept the pending deletion request.
    ConfirmDelete,
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
    Key {
        key: String,
    },
}

fn one() -> u32 {
    1
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns `Parse` for malformed JSON or unknown commands.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Drives an [`EngineCore`] from script commands.
#[derive(Debug, Default)]
pub struct Replay {
    engine: EngineCore,
    created: Vec<ObjectId>,
}

impl Replay {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { engine: EngineCore::with_config(config), created: Vec::new() }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// Ids of every object created so far, in creation order.
    #[must_use]
    pub fn created(&self) -> &[ObjectId] {
        &self.created
    }

    /// Run one command and return the engine's actions.
    ///
    /// # Errors
    ///
    /// Unknown object references, unresolvable points, and engine failures.
    pub fn apply(&mut self, command: Command) -> Result<Vec<Action>, ScriptError> {
        let actions = match command {
            Command::CreatePlan { width, height } => {
                let size = match (width, height) {
                    (None, None) => None,
                    (w, h) => {
                        let default = self.engine.config.default_plan_size;
                        Some(Size::new(w.unwrap_or(default.width), h.unwrap_or(default.height)))
                    }
                };
                self.engine.create_plan(size)?
            }
            Command::DeletePlan => self.engine.delete_plan()?,
            Command::Confirm => self.engine.confirm_plan()?,
            Command::Unconfirm => self.engine.unconfirm_plan()?,
            Command::AddDesk { x, y } => self.engine.add_desk(Point::new(x, y))?,
            Command::AddWall { x, y } => self.engine.add_wall(Point::new(x, y))?,
            Command::Select { target } => {
                let selection = match target {
                    None => Selection::None,
                    Some(t) => match self.resolve(t)?.object_id() {
                        Some(id) => Selection::Object(id),
                        None => Selection::Plan,
                    },
                };
                self.engine.select(selection)?
            }
            Command::PointerDown { x, y, target } => {
                let pt = Point::new(x, y);
                let target = self.resolve_at(target, pt)?;
                self.engine.on_pointer_down(target, pt)?
            }
            Command::PointerMove { x, y } => self.engine.on_pointer_move(Point::new(x, y)),
            Command::PointerUp => self.engine.on_pointer_up(),
            Command::Primary { target, at_ms } => {
                let target = self.resolve(target)?;
                self.engine.on_primary_activate(target, at_ms)?
            }
            Command::Secondary { x, y, target } => {
                let pt = Point::new(x, y);
                let target = self.resolve_at(target, pt)?;
                self.engine.on_secondary_activate(target, pt)?
            }
            Command::ConfirmDelete => {
                let id = self.engine.ui.pending_delete.ok_or(ScriptError::NothingPending)?;
                self.engine.confirm_delete(&id)?
            }
            Command::Tick { count } => (0..count).flat_map(|_| self.engine.tick()).collect(),
            Command::Key { key } => self.engine.on_key_down(&Key(key)),
        };
        self.record(&actions);
        Ok(actions)
    }

    /// Tick until every animation has settled or `max_ticks` have run. Returns the ticks used.
    pub fn settle(&mut self, max_ticks: u32) -> u32 {
        let mut used = 0;
        while used < max_ticks && self.engine.is_animating() {
            self.engine.tick();
            used += 1;
        }
        used
    }

    fn record(&mut self, actions: &[Action]) {
        for action in actions {
            if let Action::ObjectCreated { id, .. } = action {
                self.created.push(*id);
            }
        }
    }

    fn object_ref(&self, index: usize) -> Result<ObjectId, ScriptError> {
        self.created.get(index).copied().ok_or(ScriptError::UnknownObject(index))
    }

    fn resolve(&self, target: ScriptTarget) -> Result<Target, ScriptError> {
        Ok(match target {
            ScriptTarget::Plan => Target::Plan,
            ScriptTarget::PlanHandle(anchor) => Target::PlanHandle(anchor),
            ScriptTarget::Object(i) => Target::Object(self.object_ref(i)?),
            ScriptTarget::ObjectHandle(i, anchor) => Target::ObjectHandle(self.object_ref(i)?, anchor),
        })
    }

    fn resolve_at(&self, target: Option<ScriptTarget>, pt: Point) -> Result<Target, ScriptError> {
        match target {
            Some(t) => self.resolve(t),
            None => self.engine.hit_test(pt).ok_or(ScriptError::NoTarget { x: pt.x, y: pt.y }),
        }
    }
}
