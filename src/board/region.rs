//! Connected-region search and deadlock detection.

use crate::core::Tile;

use super::Board;

impl Board {
    /// Maximal 4-connected set of same-kind regular tiles containing `(row, col)`.
    ///
    /// Empty for empty cells, off-board coordinates and super tiles. An
    /// isolated regular tile yields a region of exactly one. Order is
    /// unspecified.
    #[must_use]
    pub fn find_connected_region(&self, row: i32, col: i32) -> Vec<Tile> {
        let Some(start) = self.get(row, col) else {
            return Vec::new();
        };
        if !start.is_regular() {
            return Vec::new();
        }

        let mut visited = vec![false; self.cells.len()];
        let mut region = Vec::new();
        let mut stack = vec![start.position()];

        while let Some(pos) = stack.pop() {
            let Some(idx) = self.index(pos.row, pos.col) else {
                continue;
            };
            if visited[idx] {
                continue;
            }
            let Some(tile) = self.tile_at(pos) else {
                continue;
            };
            if !start.matches(&tile) {
                continue;
            }

            visited[idx] = true;
            region.push(tile);
            stack.extend(pos.neighbors());
        }

        region
    }

    /// Check if the player has anything to click.
    ///
    /// True when some regular region reaches the minimum blast size or any
    /// super tile is on the board.
    #[must_use]
    pub fn has_valid_moves(&self) -> bool {
        let mut visited = vec![false; self.cells.len()];

        for idx in 0..self.cells.len() {
            let Some(kind) = self.cells[idx] else {
                continue;
            };
            if kind.is_super() {
                return true;
            }
            if visited[idx] {
                continue;
            }

            let pos = self.position_of(idx);
            let region = self.find_connected_region(pos.row, pos.col);
            if region.len() >= self.min_blast_size {
                return true;
            }
            for tile in &region {
                if let Some(i) = self.index(tile.row, tile.col) {
                    visited[i] = true;
                }
            }
        }

        false
    }
}
