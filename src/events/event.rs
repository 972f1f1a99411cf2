//! Notification values.
//!
//! The model records one `GameEvent` per change while it mutates. Events are
//! plain data so hosts can log, serialize or replay them; [`GameEvent::dispatch`]
//! turns one into the matching [`GameObserver`] callback.

use serde::{Deserialize, Serialize};

use crate::core::{BoosterKind, Position, Tile};

use super::observer::GameObserver;

/// Something that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    MovesChanged { moves_left: u32 },
    GameWon,
    GameLost,

    /// Flat removal. The host animates it, then calls `complete_remove_tiles`.
    TilesRemoved { tiles: Vec<Tile> },
    /// Wave removal (row, column and TNT super tiles). Wave 0 is the epicenter.
    /// Completed the same way as `TilesRemoved`.
    ChainExplosion { waves: Vec<Vec<Tile>> },
    /// Gravity applied. The host animates it, then calls `complete_tiles_fall`.
    TilesFell,
    /// Empty cells refilled. The host animates it, then calls `complete_new_tiles_added`.
    NewTilesAdded,
    Shuffled,

    TileSelected { tile: Tile },
    TileDeselected,
    BoosterActivated { kind: BoosterKind },
    BoosterHintCleared,
    SuperTileCreated { tile: Tile },

    TeleportSecondSelection,
    TeleportAnimation { from: Position, to: Position },
    /// Bomb placed. The host calls `detonate_bomb` with the same position when ready.
    BombPlaced { position: Position },
    BombBoostersChanged { count: u32 },
    TeleportBoostersChanged { count: u32 },
}

impl GameEvent {
    /// Deliver this event to the matching observer callback.
    pub fn dispatch(&self, observer: &mut dyn GameObserver) {
        match self {
            GameEvent::ScoreChanged { score } => observer.on_score_changed(*score),
            GameEvent::MovesChanged { moves_left } => observer.on_moves_changed(*moves_left),
            GameEvent::GameWon => observer.on_game_won(),
            GameEvent::GameLost => observer.on_game_lost(),
            GameEvent::TilesRemoved { tiles } => observer.on_tiles_removed(tiles),
            GameEvent::ChainExplosion { waves } => observer.on_chain_explosion(waves),
            GameEvent::TilesFell => observer.on_tiles_fell(),
            GameEvent::NewTilesAdded => observer.on_new_tiles_added(),
            GameEvent::Shuffled => observer.on_shuffled(),
            GameEvent::TileSelected { tile } => observer.on_tile_selected(tile),
            GameEvent::TileDeselected => observer.on_tile_deselected(),
            GameEvent::BoosterActivated { kind } => observer.on_booster_activated(*kind),
            GameEvent::BoosterHintCleared => observer.on_booster_hint_cleared(),
            GameEvent::SuperTileCreated { tile } => observer.on_super_tile_created(tile),
            GameEvent::TeleportSecondSelection => observer.on_teleport_second_selection(),
            GameEvent::TeleportAnimation { from, to } => {
                observer.on_teleport_animation(from.row, from.col, to.row, to.col)
            }
            GameEvent::BombPlaced { position } => observer.on_bomb_placed(position.row, position.col),
            GameEvent::BombBoostersChanged { count } => observer.on_bomb_boosters_changed(*count),
            GameEvent::TeleportBoostersChanged { count } => {
                observer.on_teleport_boosters_changed(*count)
            }
        }
    }

    /// Check if the host must answer this event with a completion call.
    #[must_use]
    pub fn awaits_completion(&self) -> bool {
        matches!(
            self,
            GameEvent::TilesRemoved { .. }
                | GameEvent::ChainExplosion { .. }
                | GameEvent::TilesFell
                | GameEvent::NewTilesAdded
        )
    }
}
