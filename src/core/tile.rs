//! Tile value types: kinds, grid positions and tile snapshots.
//!
//! The board stores only a `TileKind` per cell. A `Tile` is a snapshot the
//! board hands out, carrying the position it was read from, so a tile's
//! coordinates can never drift from the cell that holds it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Contents of an occupied cell.
///
/// Two families: five *regular* kinds matched by flood fill, and four
/// *super* kinds created from large matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Blue,
    Green,
    Purple,
    Red,
    Yellow,

    /// Clears its whole row, wave by wave outward.
    SuperRow,
    /// Clears its whole column, wave by wave outward.
    SuperColumn,
    /// Clears a square neighborhood around itself.
    SuperBomb,
    /// Clears the whole board in Chebyshev shells.
    SuperTnt,
}

impl TileKind {
    /// All regular kinds, in declaration order.
    pub const REGULAR: [TileKind; 5] = [
        TileKind::Blue,
        TileKind::Green,
        TileKind::Purple,
        TileKind::Red,
        TileKind::Yellow,
    ];

    /// All super kinds, in declaration order.
    pub const SUPER: [TileKind; 4] = [
        TileKind::SuperRow,
        TileKind::SuperColumn,
        TileKind::SuperBomb,
        TileKind::SuperTnt,
    ];

    /// Check if this is one of the regular (matchable) kinds.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        !self.is_super()
    }

    /// Check if this is one of the super kinds.
    #[must_use]
    pub const fn is_super(self) -> bool {
        matches!(
            self,
            TileKind::SuperRow | TileKind::SuperColumn | TileKind::SuperBomb | TileKind::SuperTnt
        )
    }

    /// Uniformly random regular kind.
    pub fn random_regular(rng: &mut GameRng) -> Self {
        Self::REGULAR[rng.gen_range_usize(0..Self::REGULAR.len())]
    }

    /// Uniformly random super kind.
    pub fn random_super(rng: &mut GameRng) -> Self {
        Self::SUPER[rng.gen_range_usize(0..Self::SUPER.len())]
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileKind::Blue => "blue",
            TileKind::Green => "green",
            TileKind::Purple => "purple",
            TileKind::Red => "red",
            TileKind::Yellow => "yellow",
            TileKind::SuperRow => "super-row",
            TileKind::SuperColumn => "super-column",
            TileKind::SuperBomb => "super-bomb",
            TileKind::SuperTnt => "super-tnt",
        };
        f.write_str(name)
    }
}

/// Grid coordinates. Signed so callers can pass out-of-range values,
/// which every board query treats as "no tile".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The four orthogonal neighbors (up, right, down, left). May be off-board.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Position; 4]> {
        SmallVec::from_buf([
            Position::new(self.row - 1, self.col),
            Position::new(self.row, self.col + 1),
            Position::new(self.row + 1, self.col),
            Position::new(self.row, self.col - 1),
        ])
    }

    /// Chebyshev distance (max of the row and column offsets).
    #[must_use]
    pub fn chebyshev(self, other: Position) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Snapshot of an occupied cell.
///
/// Produced by the board on every read; `row`/`col` are the cell the kind
/// was read from and `selected` mirrors the board's swap selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub row: i32,
    pub col: i32,
    pub selected: bool,
}

impl Tile {
    #[must_use]
    pub const fn new(kind: TileKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            row,
            col,
            selected: false,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    #[must_use]
    pub const fn is_regular(&self) -> bool {
        self.kind.is_regular()
    }

    #[must_use]
    pub const fn is_super(&self) -> bool {
        self.kind.is_super()
    }

    /// Same regular kind. Super tiles never match anything.
    #[must_use]
    pub fn matches(&self, other: &Tile) -> bool {
        self.is_regular() && other.is_regular() && self.kind == other.kind
    }
}

/// Single-use boosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoosterKind {
    /// Area detonation that destroys every tile in range, super tiles included.
    Bomb,
    /// Swap two regular tiles.
    Teleport,
}

impl std::fmt::Display for BoosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoosterKind::Bomb => f.write_str("bomb"),
            BoosterKind::Teleport => f.write_str("teleport"),
        }
    }
}
