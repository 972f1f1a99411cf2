//! Game configuration.
//!
//! The rules run on a fixed set of constants. `GameConfig::default()` is the
//! shipped rule set; the builder methods exist so hosts can script small
//! sessions (tutorial boards, tests) without touching the engine.

use serde::{Deserialize, Serialize};

/// Default grid height.
pub const GRID_ROWS: usize = 9;
/// Default grid width.
pub const GRID_COLS: usize = 9;
/// Score needed to win.
pub const TARGET_SCORE: u32 = 5000;
/// Moves available per session.
pub const MAX_MOVES: u32 = 30;
/// Bomb boosters available per session.
pub const BOMB_BOOSTERS: u32 = 5;
/// Teleport boosters available per session.
pub const TELEPORT_BOOSTERS: u32 = 5;
/// Smallest region that may be blasted.
pub const MIN_BLAST_SIZE: usize = 2;
/// Automatic deadlock shuffles before the game is lost.
pub const MAX_SHUFFLES: u32 = 3;
/// Radius of the bomb booster and the super bomb.
pub const BOMB_RADIUS: usize = 2;
/// Region size that leaves a super tile behind.
pub const SUPER_TILE_THRESHOLD: usize = 4;
/// Points per removed tile.
pub const SCORE_PER_TILE: u32 = 10;

/// Complete rule configuration for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Reaching this score wins the game.
    pub target_score: u32,
    /// Moves at session start.
    pub max_moves: u32,
    /// Bomb boosters at session start.
    pub bomb_boosters: u32,
    /// Teleport boosters at session start.
    pub teleport_boosters: u32,
    /// Minimum region size for a match.
    pub min_blast_size: usize,
    /// Deadlock shuffles allowed before a loss.
    pub max_shuffles: u32,
    /// Square radius of bomb effects.
    pub bomb_radius: usize,
    /// Region size at which the clicked cell becomes a super tile.
    pub super_tile_threshold: usize,
    /// Points awarded per removed tile.
    pub score_per_tile: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            target_score: TARGET_SCORE,
            max_moves: MAX_MOVES,
            bomb_boosters: BOMB_BOOSTERS,
            teleport_boosters: TELEPORT_BOOSTERS,
            min_blast_size: MIN_BLAST_SIZE,
            max_shuffles: MAX_SHUFFLES,
            bomb_radius: BOMB_RADIUS,
            super_tile_threshold: SUPER_TILE_THRESHOLD,
            score_per_tile: SCORE_PER_TILE,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    #[must_use]
    pub fn with_max_moves(mut self, moves: u32) -> Self {
        self.max_moves = moves;
        self
    }

    #[must_use]
    pub fn with_bomb_boosters(mut self, count: u32) -> Self {
        self.bomb_boosters = count;
        self
    }

    #[must_use]
    pub fn with_teleport_boosters(mut self, count: u32) -> Self {
        self.teleport_boosters = count;
        self
    }

    #[must_use]
    pub fn with_max_shuffles(mut self, count: u32) -> Self {
        self.max_shuffles = count;
        self
    }

    /// Points for removing `tiles` tiles. Uniform across every removal source.
    #[must_use]
    pub fn score_for(&self, tiles: usize) -> u32 {
        (tiles as u32).saturating_mul(self.score_per_tile)
    }
}
