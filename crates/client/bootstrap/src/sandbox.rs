//! In-process rules engine for local play and tests.
//!
//! A hex board of a given radius with walls and rubble. Creatures spend
//! action points to walk (1 per floor hop, 2 per rubble hop) and to strike an
//! adjacent enemy part. Dropping a creature's vital part to zero destroys it.
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};

use anyhow::{Context, Result};
use game_core::{
    Action, Cell, CreatureId, CreatureView, Event, Faction, FloatStyle, Note, PartId, PartTarget,
    PartView, Rejection, Resolution, Simulation, Stat, Terrain, Tile,
};
use tracing::debug;

pub const FULL_AP: i32 = 4;
pub const STRIKE_COST: i32 = 2;
pub const BASE_DAMAGE: i32 = 4;

/// Part whose loss destroys its creature.
pub const VITAL_PART: PartId = PartId(0);

#[derive(Clone, Debug)]
pub struct SandboxEngine {
    radius: u32,
    terrain: BTreeMap<Cell, Terrain>,
    creatures: BTreeMap<CreatureId, CreatureView>,
    revision: u64,
}

/// Cheapest known way to reach a cell.
#[derive(Clone, Copy, Debug)]
struct Reach {
    cost: i32,
    prev: Option<Cell>,
}

impl SandboxEngine {
    /// Empty floor board of `radius` hexes around the origin.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            terrain: BTreeMap::new(),
            creatures: BTreeMap::new(),
            revision: 0,
        }
    }

    /// The default two-versus-two skirmish.
    pub fn skirmish(radius: u32) -> Result<Self> {
        let mut engine = Self::new(radius)
            .with_terrain(Cell::new(0, -1), Terrain::Wall)
            .with_terrain(Cell::new(0, -2), Terrain::Wall)
            .with_terrain(Cell::new(0, 1), Terrain::Rubble)
            .with_terrain(Cell::new(-1, 2), Terrain::Rubble);

        let roster = [
            warrior(1, "knight", Faction::Player, Cell::new(-1, 0), 1, (4, 8)),
            warrior(2, "archer", Faction::Player, Cell::new(-2, 2), 0, (3, 5)),
            warrior(5, "goblin", Faction::Enemy, Cell::new(1, 0), 0, (3, 4)),
            warrior(6, "ogre", Faction::Enemy, Cell::new(2, -2), 2, (6, 12)),
        ];
        for creature in roster {
            let name = creature.name.clone();
            engine
                .spawn(creature)
                .with_context(|| format!("failed to place {name} on a radius {radius} board"))?;
        }
        Ok(engine)
    }

    pub fn with_terrain(mut self, cell: Cell, terrain: Terrain) -> Self {
        self.terrain.insert(cell, terrain);
        self
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn creatures(&self) -> impl Iterator<Item = &CreatureView> {
        self.creatures.values()
    }

    /// Places `creature` on the board.
    pub fn spawn(&mut self, creature: CreatureView) -> Result<(), Rejection> {
        let cell = creature.cell;
        match self.tile(cell) {
            None => return Err(Rejection::OutOfBounds { cell }),
            Some(tile) if !tile.terrain.is_passable() => return Err(Rejection::Blocked { cell }),
            Some(_) => {}
        }
        if self.occupant(cell).is_some() {
            return Err(Rejection::Blocked { cell });
        }
        self.creatures.insert(creature.id, creature);
        Ok(())
    }

    fn occupant(&self, cell: Cell) -> Option<&CreatureView> {
        self.creatures.values().find(|creature| creature.cell == cell)
    }

    fn actor(&self, id: CreatureId) -> Result<&CreatureView, Rejection> {
        self.creatures.get(&id).ok_or(Rejection::UnknownCreature(id))
    }

    /// AP needed to step onto `cell`, `None` if it cannot be entered.
    fn step_cost(&self, cell: Cell) -> Option<i32> {
        let tile = self.tile(cell)?;
        if self.occupant(cell).is_some() {
            return None;
        }
        match tile.terrain {
            Terrain::Floor => Some(1),
            Terrain::Rubble => Some(2),
            Terrain::Wall => None,
        }
    }

    /// Cheapest routes from `start`, bounded by `budget`.
    fn reach(&self, start: Cell, budget: i32) -> HashMap<Cell, Reach> {
        let mut best = HashMap::from([(start, Reach { cost: 0, prev: None })]);
        let mut frontier = BinaryHeap::from([Reverse((0, start))]);

        while let Some(Reverse((cost, cell))) = frontier.pop() {
            if best.get(&cell).is_some_and(|known| known.cost < cost) {
                continue;
            }
            for next in cell.neighbors() {
                let Some(step) = self.step_cost(next) else {
                    continue;
                };
                let total = cost + step;
                if total > budget {
                    continue;
                }
                if best.get(&next).is_none_or(|known| total < known.cost) {
                    best.insert(
                        next,
                        Reach {
                            cost: total,
                            prev: Some(cell),
                        },
                    );
                    frontier.push(Reverse((total, next)));
                }
            }
        }
        best
    }

    fn resolve_move(&self, id: CreatureId, to: Cell) -> Result<Vec<Event>, Rejection> {
        let mover = self.actor(id)?;
        if !self.contains(to) {
            return Err(Rejection::OutOfBounds { cell: to });
        }
        if self.step_cost(to).is_none() {
            return Err(Rejection::Blocked { cell: to });
        }

        let routes = self.reach(mover.cell, i32::MAX);
        let Some(target) = routes.get(&to) else {
            return Err(Rejection::Blocked { cell: to });
        };
        let available = mover.stat(Stat::ActionPoints);
        if target.cost > available {
            return Err(Rejection::Insufficient {
                creature: id,
                stat: Stat::ActionPoints,
                required: target.cost,
                available,
            });
        }

        let mut path = vec![to];
        let mut at = to;
        while let Some(prev) = routes.get(&at).and_then(|reach| reach.prev) {
            path.push(prev);
            at = prev;
        }
        path.reverse();

        let mut events = Vec::new();
        for hop in path.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let cost = self.step_cost(to).unwrap_or(1);
            events.push(Event::moved(id, from, to));
            events.push(
                Event::stat_changed(id, Stat::ActionPoints, -cost)
                    .with_note(Note::styled(format!("-{cost} AP"), FloatStyle::Cost)),
            );
        }
        Ok(events)
    }

    fn resolve_strike(&self, id: CreatureId, target: PartTarget) -> Result<Vec<Event>, Rejection> {
        let striker = self.actor(id)?;
        let victim = self.actor(target.creature)?;
        let part = victim.part(target.part).ok_or(Rejection::UnknownPart(target))?;

        if !striker.faction.is_hostile_to(victim.faction) {
            return Err(Rejection::FriendlyTarget {
                creature: victim.id,
            });
        }
        if striker.cell.distance(victim.cell) > 1 {
            return Err(Rejection::OutOfReach { target });
        }
        let available = striker.stat(Stat::ActionPoints);
        if available < STRIKE_COST {
            return Err(Rejection::Insufficient {
                creature: id,
                stat: Stat::ActionPoints,
                required: STRIKE_COST,
                available,
            });
        }

        let damage = (BASE_DAMAGE - victim.stat(Stat::Armor)).max(1);
        let mut events = vec![
            Event::stat_changed(id, Stat::ActionPoints, -STRIKE_COST)
                .with_note(Note::styled(format!("-{STRIKE_COST} AP"), FloatStyle::Cost)),
            Event::part_hp_changed(victim.id, part.id, -damage)
                .with_note(Note::styled(format!("-{damage}"), FloatStyle::Damage)),
        ];
        if part.id == VITAL_PART && part.hp - damage <= 0 {
            events.push(Event::Destroyed {
                creature: victim.id,
                note: Some(Note::styled(format!("{} falls", victim.name), FloatStyle::Info)),
            });
        }
        Ok(events)
    }

    fn resolve_end_turn(&self) -> Vec<Event> {
        self.creatures
            .values()
            .filter_map(|creature| {
                let missing = FULL_AP - creature.stat(Stat::ActionPoints);
                (missing > 0).then(|| {
                    Event::stat_changed(creature.id, Stat::ActionPoints, missing)
                        .with_note(Note::styled(format!("+{missing} AP"), FloatStyle::Heal))
                })
            })
            .collect()
    }

    fn apply(&mut self, event: &Event) {
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
                let part = self
                    .creatures
                    .get_mut(creature)
                    .and_then(|view| view.parts.iter_mut().find(|p| p.id == *part));
                if let Some(part) = part {
                    part.hp = (part.hp + delta).clamp(0, part.max_hp);
                }
            }
            Event::Destroyed { creature, .. } => {
                self.creatures.remove(creature);
            }
            Event::Message { .. } => {}
        }
    }
}

impl Simulation for SandboxEngine {
    fn tile(&self, cell: Cell) -> Option<Tile> {
        if cell.distance(Cell::ORIGIN) > self.radius {
            return None;
        }
        let terrain = self.terrain.get(&cell).copied().unwrap_or_default();
        Some(Tile { cell, terrain })
    }

    fn creature_at(&self, cell: Cell) -> Option<CreatureView> {
        self.occupant(cell).cloned()
    }

    fn creature(&self, id: CreatureId) -> Option<CreatureView> {
        self.creatures.get(&id).cloned()
    }

    fn legal_range(&self, id: CreatureId) -> Vec<Cell> {
        let Some(creature) = self.creatures.get(&id) else {
            return Vec::new();
        };
        let cells: BTreeSet<Cell> = self
            .reach(creature.cell, creature.stat(Stat::ActionPoints))
            .into_keys()
            .filter(|cell| *cell != creature.cell)
            .collect();
        cells.into_iter().collect()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn resolve(&self, action: &Action) -> Result<Resolution, Rejection> {
        let events = match action {
            Action::Move { creature, to } => self.resolve_move(*creature, *to)?,
            Action::Strike { creature, target } => self.resolve_strike(*creature, *target)?,
            Action::EndTurn => self.resolve_end_turn(),
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
            self.apply(event);
        }
        self.revision += 1;
        debug!(
            target: "bootstrap::sandbox",
            action = ?resolution.action,
            events = resolution.events.len(),
            revision = self.revision,
            "committed"
        );
        Ok(resolution.events)
    }
}

/// Two-part creature with a full AP pool: a vital head and a torso.
pub fn warrior(
    id: u32,
    name: &str,
    faction: Faction,
    cell: Cell,
    armor: i32,
    (head, torso): (i32, i32),
) -> CreatureView {
    CreatureView {
        id: CreatureId(id),
        name: name.to_string(),
        faction,
        cell,
        stats: BTreeMap::from([
            (Stat::ActionPoints, FULL_AP),
            (Stat::Armor, armor),
            (Stat::Initiative, 10 - armor),
        ]),
        parts: vec![
            PartView {
                id: VITAL_PART,
                name: "head".to_string(),
                hp: head,
                max_hp: head,
            },
            PartView {
                id: PartId(1),
                name: "torso".to_string(),
                hp: torso,
                max_hp: torso,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNIGHT: CreatureId = CreatureId(1);
    const ARCHER: CreatureId = CreatureId(2);
    const GOBLIN: CreatureId = CreatureId(5);

    fn engine() -> SandboxEngine {
        SandboxEngine::skirmish(4).expect("default layout fits radius 4")
    }

    fn walk(engine: &mut SandboxEngine, creature: CreatureId, to: Cell) {
        let resolution = engine
            .resolve(&Action::Move { creature, to })
            .expect("move should resolve");
        engine.commit(resolution).expect("move should commit");
    }

    #[test]
    fn skirmish_rejects_boards_too_small_for_the_roster() {
        let err = SandboxEngine::skirmish(1).unwrap_err();
        assert!(err.to_string().contains("radius 1"));
    }

    #[test]
    fn move_emits_one_hop_per_step() {
        let engine = engine();
        let events = engine
            .simulate(&Action::Move {
                creature: KNIGHT,
                to: Cell::new(-1, -2),
            })
            .unwrap();

        let hops: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::Moved { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(hops.len(), 2);
        assert_eq!(hops[0].0, Cell::new(-1, 0));
        assert_eq!(hops[1].1, Cell::new(-1, -2));
        assert_eq!(hops[0].1, hops[1].0);
    }

    #[test]
    fn rubble_costs_double() {
        let engine = engine();
        let events = engine
            .simulate(&Action::Move {
                creature: ARCHER,
                to: Cell::new(-1, 2),
            })
            .unwrap();
        assert_eq!(
            events[1],
            Event::stat_changed(ARCHER, Stat::ActionPoints, -2)
                .with_note(Note::styled("-2 AP", FloatStyle::Cost))
        );
    }

    #[test]
    fn walls_and_creatures_block() {
        let engine = engine();
        for cell in [Cell::new(0, -1), Cell::new(1, 0)] {
            let rejection = engine
                .resolve(&Action::Move {
                    creature: KNIGHT,
                    to: cell,
                })
                .unwrap_err();
            assert_eq!(rejection, Rejection::Blocked { cell });
        }
        let rejection = engine
            .resolve(&Action::Move {
                creature: KNIGHT,
                to: Cell::new(9, 0),
            })
            .unwrap_err();
        assert!(matches!(rejection, Rejection::OutOfBounds { .. }));
    }

    #[test]
    fn legal_range_respects_action_points() {
        let engine = engine();
        let range = engine.legal_range(KNIGHT);
        assert!(range.contains(&Cell::ORIGIN));
        assert!(!range.contains(&Cell::new(-1, 0)), "own cell is excluded");
        assert!(!range.contains(&Cell::new(0, -1)), "walls are excluded");
        assert!(range.iter().all(|cell| cell.distance(Cell::new(-1, 0)) <= FULL_AP as u32));
    }

    #[test]
    fn strike_needs_adjacency_and_hostility() {
        let engine = engine();
        let far = engine
            .resolve(&Action::Strike {
                creature: KNIGHT,
                target: PartTarget::new(GOBLIN, VITAL_PART),
            })
            .unwrap_err();
        assert!(matches!(far, Rejection::OutOfReach { .. }));

        let ally = engine
            .resolve(&Action::Strike {
                creature: KNIGHT,
                target: PartTarget::new(ARCHER, VITAL_PART),
            })
            .unwrap_err();
        assert_eq!(ally, Rejection::FriendlyTarget { creature: ARCHER });

        let missing = engine
            .resolve(&Action::Strike {
                creature: KNIGHT,
                target: PartTarget::new(GOBLIN, PartId(7)),
            })
            .unwrap_err();
        assert!(matches!(missing, Rejection::UnknownPart(_)));
    }

    #[test]
    fn lethal_strike_destroys_the_target() {
        let mut engine = engine();
        walk(&mut engine, KNIGHT, Cell::ORIGIN);

        let resolution = engine
            .resolve(&Action::Strike {
                creature: KNIGHT,
                target: PartTarget::new(GOBLIN, VITAL_PART),
            })
            .unwrap();
        assert!(matches!(
            resolution.events.last(),
            Some(Event::Destroyed { creature, .. }) if *creature == GOBLIN
        ));

        engine.commit(resolution).unwrap();
        assert!(engine.creature(GOBLIN).is_none());
        assert_eq!(
            engine.creature(KNIGHT).unwrap().stat(Stat::ActionPoints),
            FULL_AP - 1 - STRIKE_COST
        );
    }

    #[test]
    fn stale_resolutions_are_refused() {
        let mut engine = engine();
        let early = engine
            .resolve(&Action::Move {
                creature: ARCHER,
                to: Cell::new(-3, 2),
            })
            .unwrap();
        walk(&mut engine, KNIGHT, Cell::ORIGIN);

        assert_eq!(
            engine.commit(early),
            Err(Rejection::Stale {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn end_turn_restores_spent_points() {
        let mut engine = engine();
        walk(&mut engine, KNIGHT, Cell::ORIGIN);
        let resolution = engine.resolve(&Action::EndTurn).unwrap();
        assert_eq!(resolution.events.len(), 1);
        engine.commit(resolution).unwrap();
        assert_eq!(engine.creature(KNIGHT).unwrap().stat(Stat::ActionPoints), FULL_AP);
    }
}
