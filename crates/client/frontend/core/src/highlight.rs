//! Aggregated highlight state for the board.
//!
//! Two counted layers coexist: `statics` for rule-driven marks (the selected
//! creature) and `throb` for hover-driven marks (a possible target). Each
//! layer is a pair of [`RefCountSet`]s, so independent reasons to mark the same
//! creature or part never clear each other.
//!
//! `range` and `shade` are plain overlays. Only the active mode writes them,
//! so the last write wins.
use bitflags::bitflags;
use game_core::{Cell, CreatureId, Edge, PartTarget, boundary};

use crate::refcount::RefCountSet;

bitflags! {
    /// How a creature, part or cell should currently be drawn.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HighlightFlags: u8 {
        const STATIC = 1 << 0;
        const THROB = 1 << 1;
        const SHADED = 1 << 2;
        const OUTLINED = 1 << 3;
    }
}

/// One counted layer of creature and part marks.
#[derive(Clone, Debug, Default)]
pub struct Marks {
    pub creatures: RefCountSet<CreatureId>,
    pub parts: RefCountSet<PartTarget>,
}

impl Marks {
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty() && self.parts.is_empty()
    }
}

/// Store chunk describing everything highlighted on the board.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
    pub throb: Marks,
    pub statics: Marks,
    range: Vec<Edge>,
    shade: Vec<Cell>,
}

impl Highlight {
    pub fn range(&self) -> &[Edge] {
        &self.range
    }

    pub fn shade(&self) -> &[Cell] {
        &self.shade
    }

    pub fn set_range(&mut self, edges: Vec<Edge>) {
        self.range = edges;
    }

    pub fn set_shade(&mut self, cells: Vec<Cell>) {
        self.shade = cells;
    }

    /// Shades `cells` and outlines their boundary.
    pub fn set_region(&mut self, cells: &[Cell]) {
        self.range = boundary(cells);
        self.shade = cells.to_vec();
    }

    pub fn clear_overlay(&mut self) {
        self.range.clear();
        self.shade.clear();
    }

    pub fn creature_flags(&self, id: CreatureId) -> HighlightFlags {
        let mut flags = HighlightFlags::empty();
        flags.set(HighlightFlags::STATIC, self.statics.creatures.has(&id));
        flags.set(HighlightFlags::THROB, self.throb.creatures.has(&id));
        flags
    }

    pub fn part_flags(&self, target: PartTarget) -> HighlightFlags {
        let mut flags = HighlightFlags::empty();
        flags.set(HighlightFlags::STATIC, self.statics.parts.has(&target));
        flags.set(HighlightFlags::THROB, self.throb.parts.has(&target));
        flags
    }

    pub fn cell_flags(&self, cell: Cell) -> HighlightFlags {
        let mut flags = HighlightFlags::empty();
        flags.set(HighlightFlags::SHADED, self.shade.contains(&cell));
        flags.set(
            HighlightFlags::OUTLINED,
            self.range.iter().any(|edge| edge.cell == cell),
        );
        flags
    }

    pub fn is_empty(&self) -> bool {
        self.throb.is_empty()
            && self.statics.is_empty()
            && self.range.is_empty()
            && self.shade.is_empty()
    }
}
