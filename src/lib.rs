//! # tile-blast
//!
//! Rules engine for a "blast" tile-matching puzzle: click a connected group
//! of same-colored tiles to clear it, let the column fall, refill from the
//! top. Large matches leave super tiles behind; bomb and teleport boosters
//! add two more ways to act on the board.
//!
//! ## Design Principles
//!
//! 1. **Model Only**: No rendering, timing or input. The host animates each
//!    step and reports back through completion calls.
//!
//! 2. **Deterministic**: Every random choice goes through a seeded
//!    [`GameRng`], so a seed plus a click sequence replays a session exactly.
//!
//! 3. **Queued Notifications**: The model records [`GameEvent`]s and never
//!    calls out while it mutates. Hosts drain the queue after each call.
//!
//! ## Modules
//!
//! - `core`: Tiles, positions, RNG, configuration
//! - `board`: Grid, regions, gravity, refill, explosions, swap selection
//! - `events`: Event values and the observer trait
//! - `model`: The game session and its state machine
//! - `error`: Rejection reasons

pub mod board;
pub mod core;
pub mod error;
pub mod events;
pub mod model;

// Re-export commonly used types
pub use crate::core::{BoosterKind, GameConfig, GameRng, Position, Tile, TileKind};

pub use crate::board::{Board, ExplosionKind, ExplosionWaves};

pub use crate::error::GameError;

pub use crate::events::{GameEvent, GameObserver};

pub use crate::model::{CascadePhase, GameMode, GameModel, GameOutcome};
