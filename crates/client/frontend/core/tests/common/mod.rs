//! Small deterministic world shared by the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use client_frontend_core::{InteractionConfig, Point, Renderer, Session};
use game_core::{
    Action, Cell, CreatureId, CreatureView, Event, Faction, FloatStyle, Note, PartId, PartTarget,
    PartView, Rejection, Resolution, Simulation, Stat, Subject, Terrain, Tile,
};

pub const HERO: CreatureId = CreatureId(1);
pub const GOBLIN: CreatureId = CreatureId(5);
pub const HEAD: PartId = PartId(0);

/// Radius-2 board with one hero at the origin and one goblin two hexes east.
///
/// Moves take a greedy straight line and cost 1 AP per hop. Strikes need an
/// adjacent target, cost 2 AP and deal 1 damage.
pub struct TinyWorld {
    creatures: BTreeMap<CreatureId, CreatureView>,
    revision: u64,
    sealed: Option<Cell>,
}

impl Default for TinyWorld {
    fn default() -> Self {
        let mut creatures = BTreeMap::new();
        creatures.insert(HERO, creature(HERO, "hero", Faction::Player, Cell::ORIGIN, 3));
        creatures.insert(
            GOBLIN,
            creature(GOBLIN, "goblin", Faction::Enemy, Cell::new(2, 0), 2),
        );
        Self {
            creatures,
            revision: 0,
            sealed: None,
        }
    }
}

fn creature(id: CreatureId, name: &str, faction: Faction, cell: Cell, ap: i32) -> CreatureView {
    CreatureView {
        id,
        name: name.to_string(),
        faction,
        cell,
        stats: BTreeMap::from([(Stat::ActionPoints, ap), (Stat::Armor, 0)]),
        parts: vec![PartView {
            id: HEAD,
            name: "head".to_string(),
            hp: 3,
            max_hp: 3,
        }],
    }
}

impl TinyWorld {
    /// Same world, but every move onto `cell` is refused even though the
    /// cell stays in the hero's legal range.
    pub fn sealing(cell: Cell) -> Self {
        Self {
            sealed: Some(cell),
            ..Self::default()
        }
    }

    /// Something outside the session changed the world.
    pub fn touch(&mut self) {
        self.revision += 1;
    }

    fn path(from: Cell, to: Cell) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut at = from;
        while at != to {
            at = at
                .neighbors()
                .min_by_key(|next| next.distance(to))
                .expect("hexes have neighbors");
            path.push(at);
        }
        path
    }

    fn actor(&self, id: CreatureId) -> Result<&CreatureView, Rejection> {
        self.creatures.get(&id).ok_or(Rejection::UnknownCreature(id))
    }
}

impl Simulation for TinyWorld {
    fn tile(&self, cell: Cell) -> Option<Tile> {
        (cell.distance(Cell::ORIGIN) <= 2).then_some(Tile {
            cell,
            terrain: Terrain::Floor,
        })
    }

    fn creature_at(&self, cell: Cell) -> Option<CreatureView> {
        self.creatures.values().find(|c| c.cell == cell).cloned()
    }

    fn creature(&self, id: CreatureId) -> Option<CreatureView> {
        self.creatures.get(&id).cloned()
    }

    fn legal_range(&self, id: CreatureId) -> Vec<Cell> {
        let Some(view) = self.creatures.get(&id) else {
            return Vec::new();
        };
        let reach = view.stat(Stat::ActionPoints).max(0) as u32;
        view.cell
            .within(reach)
            .filter(|cell| *cell != view.cell)
            .filter(|cell| self.contains(*cell) && self.creature_at(*cell).is_none())
            .collect()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn resolve(&self, action: &Action) -> Result<Resolution, Rejection> {
        let events = match action {
            Action::Move { creature, to } => {
                let view = self.actor(*creature)?;
                if !self.contains(*to) {
                    return Err(Rejection::OutOfBounds { cell: *to });
                }
                if self.creature_at(*to).is_some() || self.sealed == Some(*to) {
                    return Err(Rejection::Blocked { cell: *to });
                }
                let path = Self::path(view.cell, *to);
                let available = view.stat(Stat::ActionPoints);
                if path.len() as i32 > available {
                    return Err(Rejection::Insufficient {
                        creature: *creature,
                        stat: Stat::ActionPoints,
                        required: path.len() as i32,
                        available,
                    });
                }
                let mut from = view.cell;
                let mut events = Vec::new();
                for hop in path {
                    events.push(Event::moved(*creature, from, hop));
                    events.push(Event::stat_changed(*creature, Stat::ActionPoints, -1));
                    from = hop;
                }
                events
            }
            Action::Strike { creature, target } => {
                let view = self.actor(*creature)?;
                let victim = self
                    .creatures
                    .get(&target.creature)
                    .ok_or(Rejection::UnknownPart(*target))?;
                if view.cell.distance(victim.cell) > 1 {
                    return Err(Rejection::OutOfReach { target: *target });
                }
                vec![
                    Event::stat_changed(*creature, Stat::ActionPoints, -2)
                        .with_note(Note::styled("-2 AP", FloatStyle::Cost)),
                    Event::part_hp_changed(target.creature, target.part, -1)
                        .with_note(Note::styled("-1", FloatStyle::Damage)),
                ]
            }
            Action::EndTurn => self
                .creatures
                .values()
                .map(|c| {
                    let refill = 3 - c.stat(Stat::ActionPoints);
                    Event::stat_changed(c.id, Stat::ActionPoints, refill)
                })
                .collect(),
        };

        Ok(Resolution {
            action: action.clone(),
            events,
            revision: self.revision,
        })
    }

    fn commit(&mut self, resolution: Resolution) -> Result<Vec<Event>, Rejection> {
        if resolution.revision != self.revision {
            return Err(Rejection::Stale {
                expected: resolution.revision,
                actual: self.revision,
            });
        }
        for event in &resolution.events {
            match event {
                Event::Moved { creature, to, .. } => {
                    if let Some(view) = self.creatures.get_mut(creature) {
                        view.cell = *to;
                    }
                }
                Event::StatChanged {
                    creature,
                    stat,
                    delta,
                    ..
                } => {
                    if let Some(view) = self.creatures.get_mut(creature) {
                        *view.stats.entry(*stat).or_insert(0) += delta;
                    }
                }
                Event::PartHpChanged {
                    creature,
                    part,
                    delta,
                    ..
                } => {
                    if let Some(part) = self
                        .creatures
                        .get_mut(creature)
                        .and_then(|view| view.parts.iter_mut().find(|p| p.id == *part))
                    {
                        part.hp += delta;
                    }
                }
                Event::Destroyed { .. } | Event::Message { .. } => {}
            }
        }
        self.revision += 1;
        Ok(resolution.events)
    }
}

/// Lays cells out on a unit grid; creatures and parts anchor at their cell.
#[derive(Default)]
pub struct GridRenderer;

impl Renderer for GridRenderer {
    fn anchor(&self, subject: Subject, world: &dyn Simulation) -> Option<Point> {
        let cell = match subject {
            Subject::Creature(id) => world.creature(id)?.cell,
            Subject::Part(PartTarget { creature, .. }) => world.creature(creature)?.cell,
            Subject::Cell(cell) => cell,
        };
        Some(Point::new(cell.q as f32, cell.r as f32))
    }
}

pub fn session_with<M>(initial: M) -> Session<TinyWorld, GridRenderer>
where
    M: client_frontend_core::Mode + 'static,
{
    session_in(TinyWorld::default(), initial)
}

pub fn session_in<M>(world: TinyWorld, initial: M) -> Session<TinyWorld, GridRenderer>
where
    M: client_frontend_core::Mode + 'static,
{
    Session::bootstrap(initial, world, GridRenderer, InteractionConfig::default())
}
