//! Super-tile activation, explosion waves and the area booster.
//!
//! Line and board-wide explosions are revealed shell by shell: the epicenter
//! is wave 0, then every further wave holds the tiles at the next distance.
//! Super tiles caught in a blast are marked processed but never destroyed.

use rustc_hash::FxHashSet;

use crate::core::{Position, Tile, TileKind};

use super::Board;

/// Shape of a wave explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExplosionKind {
    /// Whole board, shells by Chebyshev distance.
    Area,
    /// The epicenter's row, by column offset.
    Row,
    /// The epicenter's column, by row offset.
    Column,
}

impl ExplosionKind {
    /// Wave shape for a super kind, `None` for kinds that don't explode in waves.
    #[must_use]
    pub fn for_tile(kind: TileKind) -> Option<Self> {
        match kind {
            TileKind::SuperTnt => Some(ExplosionKind::Area),
            TileKind::SuperRow => Some(ExplosionKind::Row),
            TileKind::SuperColumn => Some(ExplosionKind::Column),
            _ => None,
        }
    }
}

/// Result of [`Board::compute_explosion_waves`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplosionWaves {
    waves: Vec<Vec<Tile>>,
    processed: FxHashSet<Position>,
}

impl ExplosionWaves {
    /// Waves in reveal order. Wave 0 is the epicenter.
    #[must_use]
    pub fn waves(&self) -> &[Vec<Tile>] {
        &self.waves
    }

    /// Consume into the wave list.
    #[must_use]
    pub fn into_waves(self) -> Vec<Vec<Tile>> {
        self.waves
    }

    /// Every tile to remove, in wave order.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.waves.iter().flatten().copied().collect()
    }

    /// Number of tiles to remove.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells the blast consumed, spared super tiles included.
    #[must_use]
    pub fn processed(&self) -> &FxHashSet<Position> {
        &self.processed
    }

    #[must_use]
    pub fn is_processed(&self, pos: Position) -> bool {
        self.processed.contains(&pos)
    }
}

impl Board {
    /// On-board cells of the square of `radius` around `center`.
    fn square(&self, center: Position, radius: usize) -> impl Iterator<Item = Position> + '_ {
        let r = radius as i32;
        (center.row - r..=center.row + r)
            .flat_map(move |row| (center.col - r..=center.col + r).map(move |col| Position::new(row, col)))
            .filter(move |pos| self.is_valid_position(pos.row, pos.col))
    }

    /// Tiles destroyed by activating the super tile at `(row, col)`.
    ///
    /// The activated tile comes first, followed by every non-super tile in
    /// its row (`SuperRow`), column (`SuperColumn`) or bomb-radius square
    /// (`SuperBomb`). `SuperTnt` explodes in waves only and yields nothing
    /// here, as do regular tiles and empty cells.
    #[must_use]
    pub fn activate_super_tile(&self, row: i32, col: i32) -> Vec<Tile> {
        let Some(tile) = self.get(row, col) else {
            return Vec::new();
        };

        let area: Vec<Position> = match tile.kind {
            TileKind::SuperRow => (0..self.cols).map(|c| Position::new(row, c as i32)).collect(),
            TileKind::SuperColumn => (0..self.rows).map(|r| Position::new(r as i32, col)).collect(),
            TileKind::SuperBomb => self.square(tile.position(), self.bomb_radius).collect(),
            _ => return Vec::new(),
        };

        let mut tiles = vec![tile];
        tiles.extend(
            area.into_iter()
                .filter_map(|pos| self.tile_at(pos))
                .filter(|t| !t.is_super()),
        );
        tiles
    }

    /// Shell-by-shell reveal order of an explosion centered on `(row, col)`.
    ///
    /// Wave 0 is the tile at the epicenter. Each later wave holds the
    /// unclaimed regular tiles at the next distance (Chebyshev for `Area`,
    /// 1-D offset along the line for `Row`/`Column`); distances increase
    /// strictly and empty shells are skipped. Super tiles in range are
    /// recorded as processed and left out of every wave.
    #[must_use]
    pub fn compute_explosion_waves(&self, row: i32, col: i32, kind: ExplosionKind) -> ExplosionWaves {
        if !self.is_valid_position(row, col) {
            return ExplosionWaves::default();
        }

        let center = Position::new(row, col);
        let mut result = ExplosionWaves::default();
        result.processed.insert(center);
        if let Some(epicenter) = self.tile_at(center) {
            result.waves.push(vec![epicenter]);
        }

        let scope: Vec<Position> = match kind {
            ExplosionKind::Area => self.positions().collect(),
            ExplosionKind::Row => (0..self.cols).map(|c| Position::new(row, c as i32)).collect(),
            ExplosionKind::Column => (0..self.rows).map(|r| Position::new(r as i32, col)).collect(),
        };

        // Within a line the Chebyshev distance is the 1-D offset.
        let max_distance = scope.iter().map(|p| center.chebyshev(*p)).max().unwrap_or(0) as usize;
        let mut shells: Vec<Vec<Tile>> = vec![Vec::new(); max_distance + 1];

        for pos in scope {
            if pos == center {
                continue;
            }
            let Some(tile) = self.tile_at(pos) else {
                continue;
            };
            result.processed.insert(pos);
            if !tile.is_super() {
                shells[center.chebyshev(pos) as usize].push(tile);
            }
        }

        result
            .waves
            .extend(shells.into_iter().filter(|shell| !shell.is_empty()));
        result
    }

    /// Every tile, super tiles included, within the square of `radius`
    /// around `(row, col)`, clipped to the board.
    ///
    /// Empty for off-board centers.
    #[must_use]
    pub fn activate_area_booster(&self, row: i32, col: i32, radius: usize) -> Vec<Tile> {
        if !self.is_valid_position(row, col) {
            return Vec::new();
        }
        self.square(Position::new(row, col), radius)
            .filter_map(|pos| self.tile_at(pos))
            .collect()
    }
}
