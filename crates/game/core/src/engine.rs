//! The simulation boundary consumed by clients.
//!
//! Clients never mutate world state directly. They query the read model,
//! ask the engine to [`resolve`](Simulation::resolve) a proposed [`Action`],
//! and later [`commit`](Simulation::commit) the returned [`Resolution`] once
//! the presentation layer is done showing it.
use crate::{Action, Cell, CreatureId, CreatureView, Event, Rejection, Tile};

/// A resolved but not yet committed action.
///
/// `revision` is the engine revision the resolution was computed against;
/// committing it after the world moved on yields [`Rejection::Stale`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub action: Action,
    pub events: Vec<Event>,
    pub revision: u64,
}

/// Authoritative game logic as seen from the client.
pub trait Simulation: Send {
    /// Static tile at `cell`, `None` when off the board.
    fn tile(&self, cell: Cell) -> Option<Tile>;

    fn creature_at(&self, cell: Cell) -> Option<CreatureView>;

    fn creature(&self, id: CreatureId) -> Option<CreatureView>;

    /// Cells `id` may legally move to this turn.
    fn legal_range(&self, id: CreatureId) -> Vec<Cell>;

    /// Current engine revision; bumps on every commit.
    fn revision(&self) -> u64;

    /// Validates `action` and computes its consequences without applying them.
    fn resolve(&self, action: &Action) -> Result<Resolution, Rejection>;

    /// Applies a previously resolved action.
    fn commit(&mut self, resolution: Resolution) -> Result<Vec<Event>, Rejection>;

    /// Hypothetical events for `action`, never committed.
    fn simulate(&self, action: &Action) -> Result<Vec<Event>, Rejection> {
        self.resolve(action).map(|resolution| resolution.events)
    }

    fn contains(&self, cell: Cell) -> bool {
        self.tile(cell).is_some()
    }
}
