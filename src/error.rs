//! Rejection reasons.
//!
//! Every caller entry point on the model has a `try_*` form returning
//! `Result<(), GameError>` and a `bool` form. A rejected call leaves the
//! session untouched and queues no events.

use crate::core::BoosterKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Coordinates outside the board, or a cell with nothing in it.
    #[error("no tile at ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    /// Action not allowed in the current mode or cascade phase.
    #[error("illegal action: {0}")]
    IllegalAction(&'static str),

    /// Booster counter is exhausted.
    #[error("no {0} boosters left")]
    InsufficientResource(BoosterKind),

    /// A fixed layout that is empty or has rows of different lengths.
    #[error("invalid board layout: {0}")]
    InvalidLayout(&'static str),
}
