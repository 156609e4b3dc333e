//! Axial hex-grid coordinates and boundary geometry.
//!
//! The board uses axial `(q, r)` coordinates with the implicit third cube
//! coordinate `s = -q - r`. Distances are measured in hex steps.
use std::collections::HashSet;
use std::fmt;

/// A single hex on the board in axial coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub q: i32,
    pub r: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate.
    ///
    /// Widened so that every pair of `i32` axial coordinates has one.
    #[inline]
    pub const fn s(self) -> i64 {
        -(self.q as i64) - self.r as i64
    }

    /// Number of hex steps between two cells, saturating at `u32::MAX`.
    pub fn distance(self, other: Cell) -> u32 {
        let dq = (self.q as i64 - other.q as i64).unsigned_abs();
        let dr = (self.r as i64 - other.r as i64).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        u32::try_from(dq.max(dr).max(ds)).unwrap_or(u32::MAX)
    }

    pub fn neighbor(self, side: HexSide) -> Cell {
        let (dq, dr) = side.offset();
        Cell::new(self.q + dq, self.r + dr)
    }

    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        HexSide::ALL.into_iter().map(move |side| self.neighbor(side))
    }

    /// All cells within `radius` steps of `self`, including `self`.
    ///
    /// Cells are yielded in row-major order (`q` outer, `r` inner).
    pub fn within(self, radius: u32) -> impl Iterator<Item = Cell> {
        let radius = radius as i32;
        (-radius..=radius).flat_map(move |dq| {
            let lo = (-radius).max(-dq - radius);
            let hi = radius.min(-dq + radius);
            (lo..=hi).map(move |dr| Cell::new(self.q + dq, self.r + dr))
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// One of the six sides of a hex, clockwise from east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HexSide {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl HexSide {
    pub const ALL: [HexSide; 6] = [
        HexSide::East,
        HexSide::SouthEast,
        HexSide::SouthWest,
        HexSide::West,
        HexSide::NorthWest,
        HexSide::NorthEast,
    ];

    const fn offset(self) -> (i32, i32) {
        match self {
            HexSide::East => (1, 0),
            HexSide::SouthEast => (0, 1),
            HexSide::SouthWest => (-1, 1),
            HexSide::West => (-1, 0),
            HexSide::NorthWest => (0, -1),
            HexSide::NorthEast => (1, -1),
        }
    }

    pub const fn opposite(self) -> HexSide {
        match self {
            HexSide::East => HexSide::West,
            HexSide::SouthEast => HexSide::NorthWest,
            HexSide::SouthWest => HexSide::NorthEast,
            HexSide::West => HexSide::East,
            HexSide::NorthWest => HexSide::SouthEast,
            HexSide::NorthEast => HexSide::SouthWest,
        }
    }
}

/// A boundary segment: the `side` of `cell` that borders a cell outside the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub cell: Cell,
    pub side: HexSide,
}

/// Computes the outline of a region of cells.
///
/// Every side of a member cell whose neighbor is not a member yields one
/// [`Edge`]. Duplicate input cells are ignored. The output follows the input
/// order, sides clockwise from east.
pub fn boundary<'a, I>(cells: I) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut ordered = Vec::new();
    let mut members = HashSet::new();
    for cell in cells {
        if members.insert(*cell) {
            ordered.push(*cell);
        }
    }

    let mut edges = Vec::new();
    for cell in ordered {
        for side in HexSide::ALL {
            if !members.contains(&cell.neighbor(side)) {
                edges.push(Edge { cell, side });
            }
        }
    }
    edges
}
