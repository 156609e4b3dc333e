//! Player intents submitted to the simulation.
use crate::{Cell, CreatureId, PartTarget};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Walk to `to`; the engine picks the path and emits one `Moved` per hop.
    Move { creature: CreatureId, to: Cell },
    Strike {
        creature: CreatureId,
        target: PartTarget,
    },
    EndTurn,
}

impl Action {
    pub fn actor(&self) -> Option<CreatureId> {
        match self {
            Action::Move { creature, .. } | Action::Strike { creature, .. } => Some(*creature),
            Action::EndTurn => None,
        }
    }
}
