//! Core value types: tiles, positions, RNG, configuration.
//!
//! Everything here is plain data. The board and the model build on these
//! types; nothing in this module knows about turns or notifications.

pub mod config;
pub mod rng;
pub mod tile;

pub use config::GameConfig;
pub use rng::GameRng;
pub use tile::{BoosterKind, Position, Tile, TileKind};
