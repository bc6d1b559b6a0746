//! Position smoothing for placed objects.
//!
//! When the interaction controller accepts a new target for an object, the
//! object is scheduled here. Each [`AnimationScheduler::tick`] moves every
//! scheduled object's rendered position a fixed fraction of the remaining
//! distance toward its target, and unschedules it once both axes are within
//! epsilon (snapping the last sliver). The host drives ticks from its frame
//! loop; nothing here owns a timer.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::collections::BTreeSet;

use crate::doc::{ObjectId, Scene};

/// One interpolation step from `current` toward `target`.
#[must_use]
pub fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Set of objects whose rendered position is still catching up.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    active: BTreeSet<ObjectId>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or keep) easing `id` toward its target.
    pub fn schedule(&mut self, id: ObjectId) {
        self.active.insert(id);
    }

    /// Stop easing `id`, leaving its rendered position where it is.
    pub fn cancel(&mut self, id: &ObjectId) {
        self.active.remove(id);
    }

    /// Drop every scheduled object.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[must_use]
    pub fn is_scheduled(&self, id: &ObjectId) -> bool {
        self.active.contains(id)
    }

    /// Whether any object is still animating.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every scheduled object by one step. Returns the ids whose
    /// rendered position changed.
    ///
    /// Objects that no longer exist are silently unscheduled.
    pub fn tick(&mut self, scene: &mut Scene, factor: f64, epsilon: f64) -> Vec<ObjectId> {
        let mut moved = Vec::new();
        let mut settled = Vec::new();

        for id in &self.active {
            let Some(obj) = scene.get_rendered_mut(id) else {
                settled.push(*id);
                continue;
            };
            if !obj.is_animating(epsilon) {
                obj.place_at(obj.target());
                moved.push(*id);
                settled.push(*id);
                continue;
            }

            obj.x = ease_toward(obj.x, obj.target_x, factor);
            obj.y = ease_toward(obj.y, obj.target_y, factor);
            if !obj.is_animating(epsilon) {
                obj.place_at(obj.target());
                settled.push(*id);
            }
            moved.push(*id);
        }

        for id in settled {
            self.active.remove(&id);
        }
        moved
    }
}
