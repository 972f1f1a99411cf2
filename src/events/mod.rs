//! Session notifications.
//!
//! The model never calls into the presentation layer while it is mutating.
//! It records [`GameEvent`]s into a queue; the host drains the queue after
//! each call returns and delivers the events to its [`GameObserver`].
//!
//! ## Example Usage
//!
//! ```
//! use tile_blast::core::{GameConfig, Tile};
//! use tile_blast::events::GameObserver;
//! use tile_blast::model::GameModel;
//!
//! #[derive(Default)]
//! struct Hud {
//!     score: u32,
//!     removed: usize,
//! }
//!
//! impl GameObserver for Hud {
//!     fn on_score_changed(&mut self, score: u32) { self.score = score; }
//!     fn on_moves_changed(&mut self, _moves_left: u32) {}
//!     fn on_game_won(&mut self) {}
//!     fn on_game_lost(&mut self) {}
//!     fn on_tiles_removed(&mut self, tiles: &[Tile]) { self.removed += tiles.len(); }
//! }
//!
//! let mut model = GameModel::new(GameConfig::default(), 42);
//! let mut hud = Hud::default();
//!
//! // Find any clickable cell and play it
//! let board = model.board();
//! let target = board
//!     .positions()
//!     .find(|p| board.find_connected_region(p.row, p.col).len() >= 2);
//!
//! if let Some(pos) = target {
//!     assert!(model.handle_click(pos.row, pos.col));
//!     model.flush_to(&mut hud);
//!     assert_eq!(hud.score, model.score());
//! }
//! ```

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::GameObserver;
