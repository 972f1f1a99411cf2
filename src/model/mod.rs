//! Game session: score, moves, boosters and the mode state machine.
//!
//! [`GameModel`] wraps a [`Board`](crate::board::Board) and is the only
//! thing a host talks to. Clicks, booster activation and cascade completions
//! go in; [`GameEvent`](crate::events::GameEvent)s come out through
//! [`GameModel::drain_events`] or [`GameModel::flush_to`].
//!
//! ## Example Usage
//!
//! ```
//! use tile_blast::board::Board;
//! use tile_blast::core::{GameConfig, GameRng, TileKind::*};
//! use tile_blast::model::{CascadePhase, GameModel};
//!
//! let board = Board::from_layout(
//!     &[[Blue, Blue, Red], [Blue, Green, Red], [Green, Green, Red]],
//!     GameRng::new(7),
//! )
//! .unwrap();
//! let mut model = GameModel::with_board(GameConfig::default(), board);
//!
//! assert!(model.handle_click(0, 2));
//! assert_eq!(model.score(), 30);
//! assert_eq!(model.cascade_phase(), CascadePhase::AwaitingRemoval);
//!
//! // Drive the cascade to the end, as a host does after each animation
//! assert!(model.complete_remove_tiles());
//! assert!(model.complete_tiles_fall());
//! assert!(model.complete_new_tiles_added());
//! assert!(model.board().is_full());
//! ```

mod game;
mod mode;

pub use game::GameModel;
pub use mode::{CascadePhase, GameMode, GameOutcome};
