//! Failures surfaced by click and commit paths.
//!
//! Hover paths never fail: an invalid hover target is ignored. A click is
//! only offered for targets the view already validated, so an invalid click
//! target is a contract violation reported to the caller.
use game_core::{Cell, CreatureId, PartTarget, Rejection};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InteractionError>;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("{cell} is not a valid target in {mode} mode")]
    InvalidTarget { mode: &'static str, cell: Cell },

    #[error("{0} does not exist")]
    UnknownCreature(CreatureId),

    #[error("{0} does not exist")]
    UnknownPart(PartTarget),

    #[error("the turn cannot end while in {mode} mode")]
    Busy { mode: &'static str },

    #[error("engine rejected the action: {0}")]
    Rejected(#[from] Rejection),
}
