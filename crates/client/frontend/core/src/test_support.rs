//! Fixtures shared by unit tests.
use game_core::{
    Action, Cell, CreatureId, CreatureView, Event, Rejection, Resolution, Simulation, Subject,
    Tile,
};

use crate::config::InteractionConfig;
use crate::mode::ModeContext;
use crate::render::{Point, Renderer};
use crate::store::DataStore;

/// Board with nothing on it; every action is rejected.
#[derive(Debug, Default)]
pub struct EmptyWorld;

impl Simulation for EmptyWorld {
    fn tile(&self, _cell: Cell) -> Option<Tile> {
        None
    }

    fn creature_at(&self, _cell: Cell) -> Option<CreatureView> {
        None
    }

    fn creature(&self, _id: CreatureId) -> Option<CreatureView> {
        None
    }

    fn legal_range(&self, _id: CreatureId) -> Vec<Cell> {
        Vec::new()
    }

    fn revision(&self) -> u64 {
        0
    }

    fn resolve(&self, action: &Action) -> Result<Resolution, Rejection> {
        Err(Rejection::UnknownCreature(
            action.actor().unwrap_or(CreatureId(0)),
        ))
    }

    fn commit(&mut self, resolution: Resolution) -> Result<Vec<Event>, Rejection> {
        Err(Rejection::Stale {
            expected: resolution.revision,
            actual: 0,
        })
    }
}

/// Renderer that places every subject on a fixed grid, except hidden ones.
#[derive(Debug, Default)]
pub struct GridAnchors {
    hidden: Vec<Subject>,
}

impl GridAnchors {
    pub fn without(mut self, subject: Subject) -> Self {
        self.hidden.push(subject);
        self
    }
}

impl Renderer for GridAnchors {
    fn anchor(&self, subject: Subject, _world: &dyn Simulation) -> Option<Point> {
        if self.hidden.contains(&subject) {
            return None;
        }
        Some(match subject {
            Subject::Creature(id) => Point::new(id.0 as f32, 0.0),
            Subject::Part(target) => {
                Point::new(target.creature.0 as f32, target.part.0 as f32 + 0.5)
            }
            Subject::Cell(cell) => Point::new(cell.q as f32, cell.r as f32),
        })
    }
}

/// Store plus collaborators for driving modes outside a session.
#[derive(Default)]
pub struct Harness {
    pub store: DataStore,
    pub world: EmptyWorld,
    pub anchors: GridAnchors,
    pub config: InteractionConfig,
}

impl Harness {
    pub fn run<R>(&mut self, f: impl FnOnce(&mut ModeContext<'_>) -> R) -> R {
        let Self {
            store,
            world,
            anchors,
            config,
        } = self;
        store.update(|data| {
            let mut ctx = ModeContext::new(data, world, &*anchors, &*config);
            f(&mut ctx)
        })
    }
}
