//! Error taxonomy for scene operations.
//!
//! Constraint violations during a gesture are not errors: they are reported
//! as [`crate::engine::Action::Blocked`] and the frame is discarded. What
//! remains here are the outcomes a caller has to handle explicitly.

use crate::doc::{ObjectId, ObjectKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("no plan exists")]
    NoPlan,
    #[error("a plan already exists")]
    PlanExists,
    #[error("plan is confirmed; unconfirm it before editing")]
    PlanConfirmed,
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("no space available for a new {kind}")]
    NoSpaceAvailable { kind: ObjectKind },
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl SceneError {
    /// Whether the error carries a message meant for the end user rather than
    /// signalling a caller precondition failure.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NoSpaceAvailable { .. } | Self::PlanConfirmed)
    }

    /// Stable code for hosts that map errors to UI strings.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoPlan => "E_NO_PLAN",
            Self::PlanExists => "E_PLAN_EXISTS",
            Self::PlanConfirmed => "E_PLAN_CONFIRMED",
            Self::ObjectNotFound(_) => "E_OBJECT_NOT_FOUND",
            Self::NoSpaceAvailable { .. } => "E_NO_SPACE",
            Self::InvalidSnapshot(_) => "E_INVALID_SNAPSHOT",
        }
    }
}
