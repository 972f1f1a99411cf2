//! The tile grid and every grid-local algorithm.
//!
//! The `Board` owns a `rows × cols` grid of optional tile kinds, the swap
//! selection and the RNG used for refills and shuffles. It has no notion of
//! score, moves or turns; the model layers those on top.
//!
//! Cells are stored row-major in a flat vector. Row 0 is the top of the
//! board, so gravity moves tiles toward higher row indices.
//!
//! ## Submodules
//!
//! - `region`: connected-region search and deadlock detection
//! - `explosion`: super-tile activation, explosion waves, area booster

mod explosion;
mod region;

pub use explosion::{ExplosionKind, ExplosionWaves};

use crate::core::config::{BOMB_RADIUS, MIN_BLAST_SIZE};
use crate::core::{GameConfig, GameRng, Position, Tile, TileKind};
use crate::error::GameError;

/// The game grid.
///
/// ## Usage
///
/// ```
/// use tile_blast::board::Board;
/// use tile_blast::core::{GameRng, TileKind::*};
///
/// let board = Board::from_layout(
///     &[[Blue, Blue, Red], [Blue, Green, Red], [Green, Green, Red]],
///     GameRng::new(1),
/// )
/// .unwrap();
///
/// assert_eq!(board.find_connected_region(0, 0).len(), 3);
/// assert!(board.get(5, 5).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells (row * cols + col). `None` only between removal and refill.
    cells: Vec<Option<TileKind>>,
    /// Cell picked as the first half of a swap.
    selected: Option<Position>,
    min_blast_size: usize,
    bomb_radius: usize,
    rng: GameRng,
}

impl Board {
    /// Create a board of the configured size filled with random regular tiles.
    #[must_use]
    pub fn new(config: &GameConfig, mut rng: GameRng) -> Self {
        let cells = (0..config.rows * config.cols)
            .map(|_| Some(TileKind::random_regular(&mut rng)))
            .collect();

        Self {
            rows: config.rows,
            cols: config.cols,
            cells,
            selected: None,
            min_blast_size: config.min_blast_size,
            bomb_radius: config.bomb_radius,
            rng,
        }
    }

    /// Create a board from a fixed layout, top row first.
    ///
    /// Uses the standard blast size and bomb radius; call [`Board::with_rules`]
    /// to apply a different configuration.
    pub fn from_layout<R: AsRef<[TileKind]>>(layout: &[R], rng: GameRng) -> Result<Self, GameError> {
        let rows = layout.len();
        let cols = layout.first().map_or(0, |r| r.as_ref().len());
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidLayout("layout has no cells"));
        }
        if layout.iter().any(|r| r.as_ref().len() != cols) {
            return Err(GameError::InvalidLayout("rows differ in length"));
        }

        let cells = layout
            .iter()
            .flat_map(|r| r.as_ref().iter().copied().map(Some))
            .collect();

        Ok(Self {
            rows,
            cols,
            cells,
            selected: None,
            min_blast_size: MIN_BLAST_SIZE,
            bomb_radius: BOMB_RADIUS,
            rng,
        })
    }

    /// Take blast size and bomb radius from `config`. Grid size is unaffected.
    #[must_use]
    pub fn with_rules(mut self, config: &GameConfig) -> Self {
        self.min_blast_size = config.min_blast_size;
        self.bomb_radius = config.bomb_radius;
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Seed of the board's RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    #[inline]
    fn position_of(&self, idx: usize) -> Position {
        Position::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Check if coordinates are on the board.
    #[must_use]
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Tile at `(row, col)`, or `None` if the cell is empty or off the board.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        let idx = self.index(row, col)?;
        self.cells[idx].map(|kind| self.snapshot(kind, row, col))
    }

    /// Tile at `pos`.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.get(pos.row, pos.col)
    }

    fn snapshot(&self, kind: TileKind, row: i32, col: i32) -> Tile {
        Tile {
            kind,
            row,
            col,
            selected: self.selected == Some(Position::new(row, col)),
        }
    }

    /// Every board position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |idx| self.position_of(idx))
    }

    /// Every occupied cell, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.positions().filter_map(move |pos| self.tile_at(pos))
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Check if every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    // === Removal, gravity, refill ===

    /// Empty the cells of the listed tiles.
    ///
    /// Entries that are off the board or already empty are ignored.
    /// Returns how many cells were actually emptied.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> usize {
        let mut removed = 0;
        for tile in tiles {
            let Some(idx) = self.index(tile.row, tile.col) else {
                continue;
            };
            if self.cells[idx].take().is_some() {
                removed += 1;
                if self.selected == Some(tile.position()) {
                    self.selected = None;
                }
            }
        }
        removed
    }

    /// Compact every column downward, keeping the relative order of its tiles.
    ///
    /// Empty cells end up at the top. A selected tile keeps its selection
    /// while it falls.
    pub fn apply_gravity(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for row in (0..self.rows).rev() {
                let idx = row * self.cols + col;
                if self.cells[idx].is_none() {
                    continue;
                }
                write -= 1;
                if write != row {
                    let target = write * self.cols + col;
                    self.cells[target] = self.cells[idx].take();

                    let from = Position::new(row as i32, col as i32);
                    if self.selected == Some(from) {
                        self.selected = Some(Position::new(write as i32, col as i32));
                    }
                }
            }
        }
    }

    /// Fill every empty cell with a random regular tile.
    ///
    /// Returns how many tiles were created.
    pub fn fill_empty_cells(&mut self) -> usize {
        let mut filled = 0;
        for cell in &mut self.cells {
            if cell.is_none() {
                *cell = Some(TileKind::random_regular(&mut self.rng));
                filled += 1;
            }
        }
        filled
    }

    /// Permute the kinds of all regular tiles among their cells.
    ///
    /// Super tiles stay where they are and occupancy does not change.
    pub fn shuffle(&mut self) {
        let slots: Vec<usize> = (0..self.cells.len())
            .filter(|&idx| matches!(self.cells[idx], Some(kind) if kind.is_regular()))
            .collect();

        let mut kinds: Vec<TileKind> = slots.iter().filter_map(|&idx| self.cells[idx]).collect();
        self.rng.shuffle(&mut kinds);

        for (idx, kind) in slots.into_iter().zip(kinds) {
            self.cells[idx] = Some(kind);
        }
    }

    /// Overwrite the cell with a random super tile.
    ///
    /// Returns `None` for coordinates off the board.
    pub fn create_super_tile(&mut self, row: i32, col: i32) -> Option<Tile> {
        let idx = self.index(row, col)?;
        let kind = TileKind::random_super(&mut self.rng);
        self.cells[idx] = Some(kind);

        if self.selected == Some(Position::new(row, col)) {
            self.selected = None;
        }

        Some(Tile::new(kind, row, col))
    }

    // === Swap selection ===

    /// Currently selected tile, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Tile> {
        self.selected.and_then(|pos| self.tile_at(pos))
    }

    /// Mark a regular tile as the first half of a swap.
    ///
    /// Replaces any previous selection. Fails on empty cells and super tiles.
    pub fn select_for_swap(&mut self, row: i32, col: i32) -> bool {
        match self.get(row, col) {
            Some(tile) if tile.is_regular() => {
                self.selected = Some(tile.position());
                true
            }
            _ => false,
        }
    }

    /// Drop the selection, if any.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Exchange the selected tile with the tile at `(row, col)`.
    ///
    /// Fails if nothing is selected, the target is empty or super, or the
    /// target is the selected cell itself. Clears the selection on success.
    pub fn swap_selected(&mut self, row: i32, col: i32) -> bool {
        let Some(from) = self.selected else {
            return false;
        };
        if from == Position::new(row, col) {
            return false;
        }
        let (Some(a), Some(b)) = (self.index(from.row, from.col), self.index(row, col)) else {
            return false;
        };
        match (self.cells[a], self.cells[b]) {
            (Some(first), Some(second)) if first.is_regular() && second.is_regular() => {
                self.cells.swap(a, b);
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = match self.cells[row * self.cols + col] {
                    None => '.',
                    Some(TileKind::Blue) => 'B',
                    Some(TileKind::Green) => 'G',
                    Some(TileKind::Purple) => 'P',
                    Some(TileKind::Red) => 'R',
                    Some(TileKind::Yellow) => 'Y',
                    Some(TileKind::SuperRow) => '-',
                    Some(TileKind::SuperColumn) => '|',
                    Some(TileKind::SuperBomb) => '*',
                    Some(TileKind::SuperTnt) => '#',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
