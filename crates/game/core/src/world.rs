//! Read model of the board exposed by the simulation.
use std::collections::BTreeMap;

use crate::{Cell, CreatureId, PartId};

/// Named creature statistic.
///
/// The display names are the short labels the UI shows next to deltas.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Stat {
    /// Action points spent by moving and striking.
    #[strum(serialize = "AP")]
    ActionPoints,
    /// Movement allowance.
    #[strum(serialize = "MP")]
    Movement,
    #[strum(serialize = "ARMOR")]
    Armor,
    /// Initiative used for turn order.
    #[strum(serialize = "INIT")]
    Initiative,
}

/// Allegiance of a creature.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    #[default]
    Player,
    Enemy,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        self != other
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    #[default]
    Floor,
    Rubble,
    Wall,
}

impl Terrain {
    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }
}

/// Static description of a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub cell: Cell,
    pub terrain: Terrain,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartView {
    pub id: PartId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
}

/// Snapshot of a creature as the simulation currently sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureView {
    pub id: CreatureId,
    pub name: String,
    pub faction: Faction,
    pub cell: Cell,
    pub stats: BTreeMap<Stat, i32>,
    pub parts: Vec<PartView>,
}

impl CreatureView {
    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    pub fn part(&self, id: PartId) -> Option<&PartView> {
        self.parts.iter().find(|part| part.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_names_round_trip_through_strum() {
        assert_eq!(Stat::ActionPoints.to_string(), "AP");
        assert_eq!("ap".parse::<Stat>().unwrap(), Stat::ActionPoints);
        assert_eq!("ARMOR".parse::<Stat>().unwrap(), Stat::Armor);
        assert!("hp".parse::<Stat>().is_err());
    }

    #[test]
    fn walls_block_movement() {
        assert!(Terrain::Floor.is_passable());
        assert!(Terrain::Rubble.is_passable());
        assert!(!Terrain::Wall.is_passable());
    }
}
