//! Built-in interaction modes for a skirmish board.
//!
//! - [`IdleMode`] is the bootstrap mode: hover throbs creatures, clicking a
//!   friendly creature selects it.
//! - [`SelectedMode`] shows the selected creature's reach and previews moves
//!   and strikes while hovering.
//! - [`AnimatingMode`] plays a resolved action and commits it when done.
mod animating;
mod idle;
mod selected;

pub use animating::AnimatingMode;
pub use idle::IdleMode;
pub use selected::SelectedMode;

use game_core::{CreatureId, Event};

/// Pop payload announcing that an action was committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed {
    /// Creature that acted, `None` for turn-level actions.
    pub actor: Option<CreatureId>,
    /// Events the engine applied.
    pub events: Vec<Event>,
}
