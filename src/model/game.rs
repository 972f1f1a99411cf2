//! The game model: one board plus score, moves, boosters and mode.
//!
//! All mutation goes through the model's entry points. Each entry point
//! validates first, then mutates and queues events; a rejected call leaves
//! the session untouched.
//!
//! ## Cascades
//!
//! Removal, gravity and refill are staged by the host. After a removal the
//! model waits in [`CascadePhase::AwaitingRemoval`] until
//! [`GameModel::complete_remove_tiles`], then in `AwaitingFall` until
//! [`GameModel::complete_tiles_fall`], then in `AwaitingRefill` until
//! [`GameModel::complete_new_tiles_added`], which evaluates the end of the game.
//!
//! The mode stays `Playing` while a cascade is in flight; only the explicit
//! reshuffle enters `AnimationRunning`. Hosts gate their own input during a
//! cascade, using [`GameModel::is_cascade_pending`].

use crate::board::{Board, ExplosionKind};
use crate::core::{BoosterKind, GameConfig, GameRng, Position, Tile};
use crate::error::GameError;
use crate::events::{GameEvent, GameObserver};

use super::mode::{CascadePhase, GameMode, GameOutcome};

/// A single game session.
#[derive(Clone, Debug)]
pub struct GameModel {
    config: GameConfig,
    board: Board,

    // === Resources ===
    score: u32,
    moves_left: u32,
    bomb_boosters_left: u32,
    teleport_boosters_left: u32,
    shuffles_used: u32,

    // === State machine ===
    mode: GameMode,
    active_booster: Option<BoosterKind>,
    cascade: CascadePhase,
    outcome: Option<GameOutcome>,
    /// Clicked cell of a large match, turned into a super tile on `complete_remove_tiles`.
    pending_super_tile: Option<Position>,
    /// Bombs placed and not yet detonated.
    placed_bombs: Vec<Position>,

    events: Vec<GameEvent>,
}

impl GameModel {
    /// Start a session on a random board drawn from `seed`.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let board = Board::new(&config, GameRng::new(seed));
        Self::with_board(config, board)
    }

    /// Start a session on a random board with an entropy seed.
    ///
    /// The seed is available from `board().seed()`.
    #[must_use]
    pub fn from_entropy(config: GameConfig) -> Self {
        let board = Board::new(&config, GameRng::from_entropy());
        Self::with_board(config, board)
    }

    /// Start a session on a prepared board.
    ///
    /// The board keeps its own dimensions; blast size and bomb radius are
    /// taken from `config`.
    #[must_use]
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        Self {
            board: board.with_rules(&config),
            score: 0,
            moves_left: config.max_moves,
            bomb_boosters_left: config.bomb_boosters,
            teleport_boosters_left: config.teleport_boosters,
            shuffles_used: 0,
            mode: GameMode::Playing,
            active_booster: None,
            cascade: CascadePhase::Idle,
            outcome: None,
            pending_super_tile: None,
            placed_bombs: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    #[must_use]
    pub fn bomb_boosters_left(&self) -> u32 {
        self.bomb_boosters_left
    }

    #[must_use]
    pub fn teleport_boosters_left(&self) -> u32 {
        self.teleport_boosters_left
    }

    /// Deadlock shuffles performed so far.
    #[must_use]
    pub fn shuffles_used(&self) -> u32 {
        self.shuffles_used
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn active_booster(&self) -> Option<BoosterKind> {
        self.active_booster
    }

    /// Cell reserved for a super tile by the current cascade.
    #[must_use]
    pub fn pending_super_tile_position(&self) -> Option<Position> {
        self.pending_super_tile
    }

    /// Bombs placed and waiting for `detonate_bomb`.
    #[must_use]
    pub fn placed_bombs(&self) -> &[Position] {
        &self.placed_bombs
    }

    #[must_use]
    pub fn cascade_phase(&self) -> CascadePhase {
        self.cascade
    }

    /// Check if a cascade is waiting for a completion call.
    #[must_use]
    pub fn is_cascade_pending(&self) -> bool {
        self.cascade != CascadePhase::Idle
    }

    /// `Some` once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    // === Events ===

    /// Events queued since the last drain, oldest first.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver every queued event to `observer`, oldest first.
    pub fn flush_to(&mut self, observer: &mut dyn GameObserver) {
        for event in self.drain_events() {
            event.dispatch(observer);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // === Clicks ===

    /// Interpret a click on `(row, col)` in the current mode.
    ///
    /// Returns `false` if the click was rejected; nothing changed then.
    pub fn handle_click(&mut self, row: i32, col: i32) -> bool {
        accepted("click", self.try_handle_click(row, col))
    }

    /// [`GameModel::handle_click`] with the rejection reason.
    pub fn try_handle_click(&mut self, row: i32, col: i32) -> Result<(), GameError> {
        match self.mode {
            GameMode::GameOver => return Err(GameError::IllegalAction("game is over")),
            GameMode::AnimationRunning => {
                return Err(GameError::IllegalAction("reshuffle animation is running"))
            }
            _ => {}
        }
        if self.moves_left == 0 {
            return Err(GameError::IllegalAction("no moves left"));
        }
        let tile = self
            .board
            .get(row, col)
            .ok_or(GameError::InvalidPosition { row, col })?;

        match self.mode {
            GameMode::Playing => self.play_tile(tile),
            GameMode::SelectingTeleport => self.teleport_click(tile),
            GameMode::UsingBomb => self.place_bomb(tile),
            GameMode::GameOver | GameMode::AnimationRunning => {
                Err(GameError::IllegalAction("clicks are blocked"))
            }
        }
    }

    fn play_tile(&mut self, tile: Tile) -> Result<(), GameError> {
        if tile.is_super() {
            self.activate_super_tile(tile);
            return Ok(());
        }

        let mut region = self.board.find_connected_region(tile.row, tile.col);
        if region.len() < self.config.min_blast_size {
            return Err(GameError::IllegalAction("region is below the minimum blast size"));
        }

        self.consume_move();
        self.add_score(region.len());

        let matched = region.len();
        if matched >= self.config.super_tile_threshold {
            // The clicked cell is held back and becomes the super tile later.
            region.retain(|t| t.position() != tile.position());
            self.pending_super_tile = Some(tile.position());
        }

        log::debug!("matched {} {} tiles at {}", matched, tile.kind, tile.position());

        self.board.remove_tiles(&region);
        self.emit(GameEvent::TilesRemoved { tiles: region });
        self.cascade = CascadePhase::AwaitingRemoval;
        Ok(())
    }

    fn activate_super_tile(&mut self, tile: Tile) {
        self.consume_move();

        match ExplosionKind::for_tile(tile.kind) {
            Some(kind) => {
                let waves = self.board.compute_explosion_waves(tile.row, tile.col, kind);
                let tiles = waves.tiles();
                log::debug!(
                    "{} at {} exploded in {} waves, {} tiles",
                    tile.kind,
                    tile.position(),
                    waves.waves().len(),
                    tiles.len()
                );

                self.add_score(tiles.len());
                self.board.remove_tiles(&tiles);
                self.emit(GameEvent::ChainExplosion {
                    waves: waves.into_waves(),
                });
            }
            None => {
                let tiles = self.board.activate_super_tile(tile.row, tile.col);
                log::debug!("{} at {} cleared {} tiles", tile.kind, tile.position(), tiles.len());

                self.add_score(tiles.len());
                self.board.remove_tiles(&tiles);
                self.emit(GameEvent::TilesRemoved { tiles });
            }
        }

        self.cascade = CascadePhase::AwaitingRemoval;
    }

    fn consume_move(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.emit(GameEvent::MovesChanged {
            moves_left: self.moves_left,
        });
    }

    fn add_score(&mut self, tiles: usize) {
        self.score = self.score.saturating_add(self.config.score_for(tiles));
        self.emit(GameEvent::ScoreChanged { score: self.score });
    }

    // === Boosters ===

    /// Enter the booster mode for `kind`.
    ///
    /// Rejected after the game ends, during a reshuffle animation, or when
    /// the booster counter is zero.
    pub fn activate_booster_mode(&mut self, kind: BoosterKind) -> bool {
        accepted("booster activation", self.try_activate_booster_mode(kind))
    }

    /// [`GameModel::activate_booster_mode`] with the rejection reason.
    pub fn try_activate_booster_mode(&mut self, kind: BoosterKind) -> Result<(), GameError> {
        if self.mode.is_blocking() {
            return Err(GameError::IllegalAction("boosters are blocked in this mode"));
        }
        let left = match kind {
            BoosterKind::Bomb => self.bomb_boosters_left,
            BoosterKind::Teleport => self.teleport_boosters_left,
        };
        if left == 0 {
            return Err(GameError::InsufficientResource(kind));
        }

        if self.board.selected().is_some() {
            self.board.clear_selection();
            self.emit(GameEvent::TileDeselected);
        }

        self.active_booster = Some(kind);
        self.mode = GameMode::for_booster(kind);
        log::debug!("{} booster armed ({} left)", kind, left);
        self.emit(GameEvent::BoosterActivated { kind });
        Ok(())
    }

    fn teleport_click(&mut self, tile: Tile) -> Result<(), GameError> {
        let Some(first) = self.board.selected() else {
            if self.teleport_boosters_left == 0 {
                return Err(GameError::InsufficientResource(BoosterKind::Teleport));
            }
            if !self.board.select_for_swap(tile.row, tile.col) {
                return Err(GameError::IllegalAction("super tiles cannot be teleported"));
            }
            let selected = self.board.selected().unwrap_or(tile);
            self.emit(GameEvent::TileSelected { tile: selected });
            self.emit(GameEvent::TeleportSecondSelection);
            return Ok(());
        };

        if first.position() == tile.position() {
            return Err(GameError::IllegalAction("cannot teleport a tile onto itself"));
        }
        if !self.board.swap_selected(tile.row, tile.col) {
            return Err(GameError::IllegalAction("super tiles cannot be teleported"));
        }

        self.teleport_boosters_left -= 1;
        log::debug!(
            "teleported {} <-> {} ({} left)",
            first.position(),
            tile.position(),
            self.teleport_boosters_left
        );
        self.emit(GameEvent::TeleportBoostersChanged {
            count: self.teleport_boosters_left,
        });

        self.mode = GameMode::Playing;
        self.active_booster = None;
        self.emit(GameEvent::TileDeselected);
        self.emit(GameEvent::BoosterHintCleared);
        self.emit(GameEvent::TeleportAnimation {
            from: first.position(),
            to: tile.position(),
        });

        self.check_game_state();
        Ok(())
    }

    fn place_bomb(&mut self, tile: Tile) -> Result<(), GameError> {
        if tile.is_super() {
            return Err(GameError::IllegalAction("bombs cannot be placed on super tiles"));
        }
        if self.bomb_boosters_left == 0 {
            return Err(GameError::InsufficientResource(BoosterKind::Bomb));
        }

        self.bomb_boosters_left -= 1;
        self.emit(GameEvent::BombBoostersChanged {
            count: self.bomb_boosters_left,
        });

        let position = tile.position();
        self.placed_bombs.push(position);
        log::debug!("bomb placed at {} ({} left)", position, self.bomb_boosters_left);
        self.emit(GameEvent::BombPlaced { position });

        self.mode = GameMode::Playing;
        self.active_booster = None;
        self.emit(GameEvent::BoosterHintCleared);
        Ok(())
    }

    /// Explode a placed bomb, destroying every tile within the bomb radius.
    ///
    /// The host decides when; usually after its placement animation. Only
    /// positions of placed, not yet detonated bombs are accepted.
    pub fn detonate_bomb(&mut self, row: i32, col: i32) -> bool {
        accepted("detonation", self.try_detonate_bomb(row, col))
    }

    /// [`GameModel::detonate_bomb`] with the rejection reason.
    pub fn try_detonate_bomb(&mut self, row: i32, col: i32) -> Result<(), GameError> {
        if self.mode == GameMode::GameOver {
            return Err(GameError::IllegalAction("game is over"));
        }
        let target = Position::new(row, col);
        let Some(idx) = self.placed_bombs.iter().position(|p| *p == target) else {
            return Err(GameError::IllegalAction("no bomb placed at this position"));
        };
        self.placed_bombs.remove(idx);

        let tiles = self
            .board
            .activate_area_booster(row, col, self.config.bomb_radius);
        log::debug!("bomb at {} destroyed {} tiles", target, tiles.len());

        self.add_score(tiles.len());
        self.board.remove_tiles(&tiles);
        self.emit(GameEvent::TilesRemoved { tiles });
        self.cascade = CascadePhase::AwaitingRemoval;
        Ok(())
    }

    // === Cascade completion ===

    /// Host finished showing the removal: create the reserved super tile,
    /// then apply gravity.
    pub fn complete_remove_tiles(&mut self) -> bool {
        accepted("removal completion", self.try_complete_remove_tiles())
    }

    /// [`GameModel::complete_remove_tiles`] with the rejection reason.
    pub fn try_complete_remove_tiles(&mut self) -> Result<(), GameError> {
        if self.cascade != CascadePhase::AwaitingRemoval {
            return Err(GameError::IllegalAction("no removal awaiting completion"));
        }

        if let Some(pos) = self.pending_super_tile.take() {
            if let Some(tile) = self.board.create_super_tile(pos.row, pos.col) {
                log::debug!("created {} at {}", tile.kind, pos);
                self.emit(GameEvent::SuperTileCreated { tile });
            }
        }

        self.board.apply_gravity();
        self.emit(GameEvent::TilesFell);
        self.cascade = CascadePhase::AwaitingFall;
        Ok(())
    }

    /// Host finished showing the fall: refill empty cells.
    pub fn complete_tiles_fall(&mut self) -> bool {
        accepted("fall completion", self.try_complete_tiles_fall())
    }

    /// [`GameModel::complete_tiles_fall`] with the rejection reason.
    pub fn try_complete_tiles_fall(&mut self) -> Result<(), GameError> {
        if self.cascade != CascadePhase::AwaitingFall {
            return Err(GameError::IllegalAction("no fall awaiting completion"));
        }

        let filled = self.board.fill_empty_cells();
        log::trace!("refilled {} cells", filled);
        self.emit(GameEvent::NewTilesAdded);
        self.cascade = CascadePhase::AwaitingRefill;
        Ok(())
    }

    /// Host finished showing the refill: the cascade is over and the end of
    /// the game is evaluated.
    pub fn complete_new_tiles_added(&mut self) -> bool {
        accepted("refill completion", self.try_complete_new_tiles_added())
    }

    /// [`GameModel::complete_new_tiles_added`] with the rejection reason.
    pub fn try_complete_new_tiles_added(&mut self) -> Result<(), GameError> {
        if self.cascade != CascadePhase::AwaitingRefill {
            return Err(GameError::IllegalAction("no refill awaiting completion"));
        }

        self.cascade = CascadePhase::Idle;
        self.check_game_state();
        Ok(())
    }

    // === End of game ===

    /// Evaluate win, deadlock and move exhaustion, in that order.
    ///
    /// - score at or above target: win
    /// - no valid moves: shuffle while shuffles remain, otherwise lose
    /// - no moves left: lose
    ///
    /// A deadlock shuffle leaves the mode unchanged. Once the game is over
    /// this returns the recorded outcome without emitting anything.
    pub fn check_game_state(&mut self) -> Option<GameOutcome> {
        if self.mode == GameMode::GameOver {
            return self.outcome;
        }

        if self.score >= self.config.target_score {
            return Some(self.finish(GameOutcome::Won));
        }

        if !self.board.has_valid_moves() {
            if self.shuffles_used < self.config.max_shuffles {
                self.board.shuffle();
                self.shuffles_used += 1;
                log::info!(
                    "board deadlocked, shuffled ({}/{})",
                    self.shuffles_used,
                    self.config.max_shuffles
                );
                self.emit(GameEvent::Shuffled);
                return None;
            }
            log::info!("board deadlocked after {} shuffles", self.shuffles_used);
            return Some(self.finish(GameOutcome::Lost));
        }

        if self.moves_left == 0 {
            log::info!("out of moves");
            return Some(self.finish(GameOutcome::Lost));
        }

        None
    }

    fn finish(&mut self, outcome: GameOutcome) -> GameOutcome {
        self.mode = GameMode::GameOver;
        self.outcome = Some(outcome);
        self.active_booster = None;
        self.board.clear_selection();

        log::info!("game over: {:?} with score {}", outcome, self.score);
        self.emit(match outcome {
            GameOutcome::Won => GameEvent::GameWon,
            GameOutcome::Lost => GameEvent::GameLost,
        });
        outcome
    }

    // === Explicit reshuffle ===

    /// Player-requested reshuffle. Enters `AnimationRunning` until
    /// [`GameModel::restore_game_state`]. Does not count against the
    /// deadlock shuffle limit.
    pub fn shuffle_board_with_animation(&mut self) -> bool {
        accepted("reshuffle", self.try_shuffle_board_with_animation())
    }

    /// [`GameModel::shuffle_board_with_animation`] with the rejection reason.
    pub fn try_shuffle_board_with_animation(&mut self) -> Result<(), GameError> {
        if self.mode != GameMode::Playing {
            return Err(GameError::IllegalAction("reshuffle is only allowed while playing"));
        }

        self.mode = GameMode::AnimationRunning;
        self.board.shuffle();
        log::debug!("board reshuffled on request");
        self.emit(GameEvent::Shuffled);
        Ok(())
    }

    /// Leave `AnimationRunning` after the reshuffle animation.
    ///
    /// Does nothing (returns `false`) in any other mode, so a game that
    /// ended meanwhile stays over.
    pub fn restore_game_state(&mut self) -> bool {
        accepted("restore", self.try_restore_game_state())
    }

    /// [`GameModel::restore_game_state`] with the rejection reason.
    pub fn try_restore_game_state(&mut self) -> Result<(), GameError> {
        if self.mode != GameMode::AnimationRunning {
            return Err(GameError::IllegalAction("no reshuffle animation to finish"));
        }
        self.mode = GameMode::Playing;
        Ok(())
    }
}

fn accepted(action: &str, result: Result<(), GameError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::trace!("{} rejected: {}", action, err);
            false
        }
    }
}
