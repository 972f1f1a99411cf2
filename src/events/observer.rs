//! Observer trait implemented by the presentation layer.

use crate::core::{BoosterKind, Tile};

/// Receives session notifications.
///
/// Score, moves and the two terminal outcomes are required for a playable
/// session; every other callback defaults to a no-op.
///
/// Callbacks receive data only. Completion calls (`complete_remove_tiles`,
/// `detonate_bomb`, ...) go back to the model once the host's animation for
/// the event has finished, never from inside the callback.
///
/// A deadlock shuffle (`on_shuffled` outside an explicit reshuffle) is not
/// followed by another check. If the shuffled board still has no valid
/// move, nothing the player can click will be accepted; the host should
/// call `GameModel::check_game_state` again, which shuffles once more or
/// ends the game when the shuffle limit is reached.
pub trait GameObserver {
    fn on_score_changed(&mut self, score: u32);
    fn on_moves_changed(&mut self, moves_left: u32);
    fn on_game_won(&mut self);
    fn on_game_lost(&mut self);

    fn on_tiles_removed(&mut self, _tiles: &[Tile]) {}
    fn on_chain_explosion(&mut self, _waves: &[Vec<Tile>]) {}
    fn on_tiles_fell(&mut self) {}
    fn on_new_tiles_added(&mut self) {}
    fn on_shuffled(&mut self) {}
    fn on_tile_selected(&mut self, _tile: &Tile) {}
    fn on_tile_deselected(&mut self) {}
    fn on_booster_activated(&mut self, _kind: BoosterKind) {}
    fn on_booster_hint_cleared(&mut self) {}
    fn on_super_tile_created(&mut self, _tile: &Tile) {}
    fn on_teleport_second_selection(&mut self) {}
    fn on_teleport_animation(&mut self, _row1: i32, _col1: i32, _row2: i32, _col2: i32) {}
    fn on_bomb_placed(&mut self, _row: i32, _col: i32) {}
    fn on_bomb_boosters_changed(&mut self, _count: u32) {}
    fn on_teleport_boosters_changed(&mut self, _count: u32) {}
}
