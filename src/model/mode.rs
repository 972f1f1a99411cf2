//! State-machine values.

use serde::{Deserialize, Serialize};

use crate::core::BoosterKind;

/// What a click means right now.
///
/// ```text
/// Playing ──► SelectingTeleport ──► Playing | GameOver
///    │    ──► UsingBomb         ──► Playing | GameOver
///    │    ──► AnimationRunning  ──► Playing | GameOver
///    └──────► GameOver (terminal)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Clicks match regions and activate super tiles.
    #[default]
    Playing,
    /// Clicks pick the two tiles of a teleport swap.
    SelectingTeleport,
    /// The next click places the bomb.
    UsingBomb,
    /// The session has ended.
    GameOver,
    /// An explicit reshuffle is being shown; clicks are ignored.
    AnimationRunning,
}

impl GameMode {
    /// Booster mode a booster kind enters.
    #[must_use]
    pub fn for_booster(kind: BoosterKind) -> Self {
        match kind {
            BoosterKind::Bomb => GameMode::UsingBomb,
            BoosterKind::Teleport => GameMode::SelectingTeleport,
        }
    }

    /// Check if this mode blocks clicks and booster activation outright.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, GameMode::GameOver | GameMode::AnimationRunning)
    }
}

/// Where a removal cascade stands.
///
/// Each phase waits for one completion call from the host:
///
/// ```text
/// Idle ─(removal)─► AwaitingRemoval ─complete_remove_tiles─► AwaitingFall
///      ◄─complete_new_tiles_added── AwaitingRefill ◄─complete_tiles_fall─┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadePhase {
    #[default]
    Idle,
    /// Tiles were removed; waiting for `complete_remove_tiles`.
    AwaitingRemoval,
    /// Gravity was applied; waiting for `complete_tiles_fall`.
    AwaitingFall,
    /// Cells were refilled; waiting for `complete_new_tiles_added`.
    AwaitingRefill,
}

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}
