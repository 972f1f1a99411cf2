//! Game model integration tests.
//!
//! These tests drive full sessions through the public API: clicks,
//! boosters, cascade completions and end-of-game evaluation, checking the
//! events a host would receive.

use tile_blast::board::Board;
use tile_blast::core::{BoosterKind, GameConfig, GameRng, Position, Tile, TileKind::{self, *}};
use tile_blast::events::{GameEvent, GameObserver};
use tile_blast::model::{CascadePhase, GameMode, GameModel, GameOutcome};

fn board(layout: &[&[TileKind]]) -> Board {
    Board::from_layout(layout, GameRng::new(99)).unwrap()
}

fn scenario_board() -> Board {
    board(&[
        &[Blue, Blue, Red],
        &[Blue, Green, Red],
        &[Green, Green, Red],
    ])
}

fn run_cascade(model: &mut GameModel) {
    assert!(model.complete_remove_tiles());
    assert!(model.complete_tiles_fall());
    assert!(model.complete_new_tiles_added());
}

/// Records every callback as a short string.
#[derive(Default)]
struct Recorder {
    log: Vec<String>,
}

impl GameObserver for Recorder {
    fn on_score_changed(&mut self, score: u32) {
        self.log.push(format!("score {}", score));
    }
    fn on_moves_changed(&mut self, moves_left: u32) {
        self.log.push(format!("moves {}", moves_left));
    }
    fn on_game_won(&mut self) {
        self.log.push("won".into());
    }
    fn on_game_lost(&mut self) {
        self.log.push("lost".into());
    }
    fn on_tiles_removed(&mut self, tiles: &[Tile]) {
        self.log.push(format!("removed {}", tiles.len()));
    }
    fn on_tiles_fell(&mut self) {
        self.log.push("fell".into());
    }
    fn on_new_tiles_added(&mut self) {
        self.log.push("refilled".into());
    }
    fn on_booster_activated(&mut self, kind: BoosterKind) {
        self.log.push(format!("armed {}", kind));
    }
    fn on_booster_hint_cleared(&mut self) {
        self.log.push("hint cleared".into());
    }
    fn on_bomb_placed(&mut self, row: i32, col: i32) {
        self.log.push(format!("bomb at {},{}", row, col));
    }
    fn on_bomb_boosters_changed(&mut self, count: u32) {
        self.log.push(format!("bombs {}", count));
    }
}

// =============================================================================
// Matching
// =============================================================================

/// Clicking a region of three removes it, scores 30 and uses one move.
#[test]
fn test_click_scenario() {
    let mut model = GameModel::with_board(GameConfig::default(), scenario_board());

    assert!(model.handle_click(0, 0));
    assert_eq!(model.moves_left(), 29);
    assert_eq!(model.score(), 30);
    assert_eq!(model.pending_super_tile_position(), None);

    for (row, col) in [(0, 0), (0, 1), (1, 0)] {
        assert!(model.board().get(row, col).is_none());
    }
    assert_eq!(model.board().empty_count(), 3);
}

/// A lone tile is not a match.
#[test]
fn test_single_tile_rejected() {
    let mut model =
        GameModel::with_board(GameConfig::default(), board(&[&[Blue, Red], &[Green, Green]]));

    assert!(!model.handle_click(0, 0));
    assert!(!model.handle_click(0, 1));
    assert_eq!(model.moves_left(), 30);
    assert_eq!(model.score(), 0);
    assert!(model.drain_events().is_empty());
    assert_eq!(model.cascade_phase(), CascadePhase::Idle);
    assert_eq!(model.board().empty_count(), 0);
}

/// A region of four reserves the clicked cell, which becomes a super tile
/// only once the removal is completed.
#[test]
fn test_super_tile_created_after_removal() {
    let mut model = GameModel::with_board(
        GameConfig::default(),
        board(&[
            &[Red, Green, Yellow, Purple],
            &[Green, Yellow, Purple, Red],
            &[Blue, Blue, Blue, Blue],
        ]),
    );

    assert!(model.handle_click(2, 0));
    assert_eq!(model.score(), 40);
    assert_eq!(model.pending_super_tile_position(), Some(Position::new(2, 0)));

    let events = model.drain_events();
    match events.last() {
        Some(GameEvent::TilesRemoved { tiles }) => {
            assert_eq!(tiles.len(), 3);
            assert!(tiles.iter().all(|t| t.position() != Position::new(2, 0)));
        }
        other => panic!("expected removal, got {:?}", other),
    }
    // Not yet a super tile
    assert_eq!(model.board().get(2, 0).map(|t| t.kind), Some(Blue));

    assert!(model.complete_remove_tiles());
    let created = model.board().get(2, 0).unwrap();
    assert!(created.is_super());
    assert_eq!(
        model.drain_events(),
        vec![GameEvent::SuperTileCreated { tile: created }, GameEvent::TilesFell]
    );

    // Columns 1..3 fell onto the bottom row
    assert_eq!(model.board().get(2, 1).map(|t| t.kind), Some(Yellow));
    assert!(model.board().get(0, 1).is_none());
    assert_eq!(model.pending_super_tile_position(), None);
}

/// A TNT tile clears the whole board in waves.
#[test]
fn test_tnt_chain_explosion() {
    let mut model = GameModel::with_board(
        GameConfig::default(),
        board(&[
            &[Blue, Blue, Blue],
            &[Blue, SuperTnt, Blue],
            &[Blue, Blue, Blue],
        ]),
    );

    assert!(model.handle_click(1, 1));
    assert_eq!(model.score(), 90);
    assert_eq!(model.moves_left(), 29);
    assert_eq!(model.board().empty_count(), 9);

    let events = model.drain_events();
    assert_eq!(events[0], GameEvent::MovesChanged { moves_left: 29 });
    assert_eq!(events[1], GameEvent::ScoreChanged { score: 90 });
    match &events[2] {
        GameEvent::ChainExplosion { waves } => {
            assert_eq!(waves.len(), 2);
            assert_eq!(waves[0], vec![Tile::new(SuperTnt, 1, 1)]);
            assert_eq!(waves[1].len(), 8);
        }
        other => panic!("expected chain explosion, got {:?}", other),
    }
}

/// A full cascade ends with a full board and the model idle.
#[test]
fn test_cascade_event_sequence() {
    let mut model = GameModel::with_board(GameConfig::default(), scenario_board());
    let mut recorder = Recorder::default();

    assert!(model.handle_click(0, 2));
    assert!(model.is_cascade_pending());
    assert_eq!(model.mode(), GameMode::Playing);
    run_cascade(&mut model);
    model.flush_to(&mut recorder);

    assert_eq!(
        &recorder.log[..5],
        &["moves 29", "score 30", "removed 3", "fell", "refilled"]
    );
    assert!(model.board().is_full());
    assert!(!model.is_cascade_pending());
    assert!(model.pending_events().is_empty());
}

// =============================================================================
// Boosters
// =============================================================================

/// Teleport with a single charge swaps two tiles, then cannot be re-armed.
#[test]
fn test_teleport_scenario() {
    let config = GameConfig::default().with_teleport_boosters(1);
    let mut model = GameModel::with_board(config, scenario_board());

    assert!(model.activate_booster_mode(BoosterKind::Teleport));
    assert_eq!(model.mode(), GameMode::SelectingTeleport);
    assert!(model.handle_click(0, 0));
    assert_eq!(
        model.drain_events(),
        vec![
            GameEvent::BoosterActivated { kind: BoosterKind::Teleport },
            GameEvent::TileSelected {
                tile: Tile { kind: Blue, row: 0, col: 0, selected: true },
            },
            GameEvent::TeleportSecondSelection,
        ]
    );

    assert!(model.handle_click(2, 2));
    assert_eq!(model.teleport_boosters_left(), 0);
    assert_eq!(model.mode(), GameMode::Playing);
    assert_eq!(model.active_booster(), None);
    assert_eq!(model.moves_left(), 30);
    assert_eq!(model.board().get(0, 0).map(|t| t.kind), Some(Red));
    assert_eq!(model.board().get(2, 2).map(|t| t.kind), Some(Blue));
    assert_eq!(
        model.drain_events(),
        vec![
            GameEvent::TeleportBoostersChanged { count: 0 },
            GameEvent::TileDeselected,
            GameEvent::BoosterHintCleared,
            GameEvent::TeleportAnimation {
                from: Position::new(0, 0),
                to: Position::new(2, 2),
            },
        ]
    );

    assert!(!model.activate_booster_mode(BoosterKind::Teleport));
    assert_eq!(model.mode(), GameMode::Playing);
}

/// The second teleport click cannot be the first cell or a super tile.
#[test]
fn test_teleport_rejects_self_and_super_targets() {
    let mut model = GameModel::with_board(
        GameConfig::default(),
        board(&[&[Blue, SuperRow], &[Green, Red]]),
    );

    assert!(model.activate_booster_mode(BoosterKind::Teleport));
    assert!(!model.handle_click(0, 1));
    assert!(model.handle_click(0, 0));
    model.drain_events();

    assert!(!model.handle_click(0, 0));
    assert!(!model.handle_click(0, 1));
    assert!(model.drain_events().is_empty());
    assert_eq!(model.teleport_boosters_left(), 5);
    assert_eq!(model.mode(), GameMode::SelectingTeleport);

    assert!(model.handle_click(1, 1));
    assert_eq!(model.teleport_boosters_left(), 4);
}

/// A swap that leaves nothing to click triggers a deadlock shuffle.
#[test]
fn test_teleport_runs_end_of_game_check() {
    let mut model =
        GameModel::with_board(GameConfig::default(), board(&[&[Blue, Blue], &[Red, Green]]));

    assert!(model.activate_booster_mode(BoosterKind::Teleport));
    assert!(model.handle_click(0, 1));
    assert!(model.handle_click(1, 1));

    assert_eq!(model.teleport_boosters_left(), 4);
    assert_eq!(model.shuffles_used(), 1);
    assert_eq!(model.mode(), GameMode::Playing);
    assert_eq!(model.drain_events().last(), Some(&GameEvent::Shuffled));
}

/// A teleport that reaches the target score ends the game.
#[test]
fn test_teleport_can_win() {
    let config = GameConfig::default().with_target_score(0);
    let mut model = GameModel::with_board(config, scenario_board());

    assert!(model.activate_booster_mode(BoosterKind::Teleport));
    assert!(model.handle_click(0, 0));
    assert!(model.handle_click(2, 2));

    assert_eq!(model.outcome(), Some(GameOutcome::Won));
    assert_eq!(model.drain_events().last(), Some(&GameEvent::GameWon));
}

/// A bomb still waiting when the game ends can no longer go off.
#[test]
fn test_detonate_rejected_after_game_over() {
    let config = GameConfig::default().with_max_shuffles(0);
    let mut model = GameModel::with_board(config, board(&[&[Blue, Green], &[Red, Yellow]]));

    assert!(model.activate_booster_mode(BoosterKind::Bomb));
    assert!(model.handle_click(0, 0));
    assert_eq!(model.check_game_state(), Some(GameOutcome::Lost));
    model.drain_events();

    assert!(!model.detonate_bomb(0, 0));
    assert_eq!(model.placed_bombs(), &[Position::new(0, 0)]);
    assert_eq!(model.score(), 0);
    assert_eq!(model.board().empty_count(), 0);
    assert!(model.drain_events().is_empty());
}

/// A bomb placed at the center of a 9×9 board destroys a 5×5 block on detonation.
#[test]
fn test_bomb_scenario() {
    let mut model = GameModel::new(GameConfig::default(), 2024);
    let mut recorder = Recorder::default();

    assert!(model.activate_booster_mode(BoosterKind::Bomb));
    assert!(model.handle_click(4, 4));
    assert_eq!(model.mode(), GameMode::Playing);
    assert_eq!(model.bomb_boosters_left(), 4);
    assert_eq!(model.moves_left(), 30);
    assert_eq!(model.score(), 0);
    model.flush_to(&mut recorder);
    assert_eq!(
        recorder.log,
        vec!["armed bomb", "bombs 4", "bomb at 4,4", "hint cleared"]
    );

    assert!(model.detonate_bomb(4, 4));
    assert_eq!(model.score(), 250);
    assert_eq!(model.moves_left(), 30);
    for row in 2..=6 {
        for col in 2..=6 {
            assert!(model.board().get(row, col).is_none());
        }
    }
    assert_eq!(model.board().empty_count(), 25);
    assert_eq!(model.cascade_phase(), CascadePhase::AwaitingRemoval);

    run_cascade(&mut model);
    assert!(model.board().is_full());
}

/// Bombs near a corner are clipped and take super tiles with them.
#[test]
fn test_corner_bomb_clipped() {
    let mut model = GameModel::with_board(
        GameConfig::default(),
        board(&[
            &[Blue, Red, Green, Yellow],
            &[Red, SuperColumn, Yellow, Green],
            &[Green, Yellow, Purple, Blue],
            &[Yellow, Green, Blue, Red],
        ]),
    );

    assert!(model.activate_booster_mode(BoosterKind::Bomb));
    assert!(!model.handle_click(1, 1));
    assert!(model.handle_click(0, 0));
    assert!(model.detonate_bomb(0, 0));

    assert_eq!(model.score(), 90);
    assert!(model.board().get(1, 1).is_none());
    assert!(model.board().get(0, 3).is_some());
}

/// A booster cannot be armed with an empty counter, and armed boosters are
/// exhausted one placement at a time.
#[test]
fn test_booster_counters_never_go_negative() {
    let config = GameConfig::default().with_bomb_boosters(2);
    let mut model = GameModel::new(config, 5);

    for expected in [1, 0] {
        assert!(model.activate_booster_mode(BoosterKind::Bomb));
        assert!(model.handle_click(0, 0));
        assert_eq!(model.bomb_boosters_left(), expected);
    }
    assert!(!model.activate_booster_mode(BoosterKind::Bomb));
    assert_eq!(model.bomb_boosters_left(), 0);
    assert_eq!(model.placed_bombs().len(), 2);
}

// =============================================================================
// End of game
// =============================================================================

/// Reaching the target wins even on a deadlocked board.
#[test]
fn test_win_takes_precedence_over_deadlock() {
    let config = GameConfig::default().with_target_score(0);
    let mut model = GameModel::with_board(config, board(&[&[Blue, Green], &[Red, Yellow]]));

    assert_eq!(model.check_game_state(), Some(GameOutcome::Won));
    assert_eq!(model.mode(), GameMode::GameOver);
    assert_eq!(model.shuffles_used(), 0);
    assert_eq!(model.drain_events(), vec![GameEvent::GameWon]);
}

/// Three deadlock shuffles are allowed; the fourth check loses.
#[test]
fn test_shuffle_limit_then_loss() {
    let mut model =
        GameModel::with_board(GameConfig::default(), board(&[&[Blue, Green], &[Red, Yellow]]));

    for used in 1..=3 {
        assert_eq!(model.check_game_state(), None);
        assert_eq!(model.shuffles_used(), used);
        assert_eq!(model.mode(), GameMode::Playing);
        assert_eq!(model.drain_events(), vec![GameEvent::Shuffled]);
    }

    assert_eq!(model.check_game_state(), Some(GameOutcome::Lost));
    assert_eq!(model.shuffles_used(), 3);
    assert_eq!(model.drain_events(), vec![GameEvent::GameLost]);
}

/// A board still stuck after a deadlock shuffle accepts no click until the
/// host checks again.
#[test]
fn test_stuck_board_waits_for_host_check() {
    let config = GameConfig::default().with_max_shuffles(1);
    let mut model = GameModel::with_board(config, board(&[&[Blue, Green], &[Red, Yellow]]));

    assert_eq!(model.check_game_state(), None);
    assert_eq!(model.drain_events(), vec![GameEvent::Shuffled]);
    assert!(!model.board().has_valid_moves());

    for pos in model.board().positions().collect::<Vec<_>>() {
        assert!(!model.handle_click(pos.row, pos.col));
    }
    assert_eq!(model.mode(), GameMode::Playing);
    assert!(model.pending_events().is_empty());

    assert_eq!(model.check_game_state(), Some(GameOutcome::Lost));
}

/// Using the last move loses once the cascade settles.
#[test]
fn test_out_of_moves_loses() {
    let config = GameConfig::default().with_max_moves(1);
    let mut model = GameModel::with_board(
        config,
        board(&[
            &[Red, Red, Red],
            &[Red, Red, Red],
            &[Blue, Blue, Green],
        ]),
    );

    assert!(model.handle_click(2, 0));
    assert_eq!(model.moves_left(), 0);
    assert_eq!(model.mode(), GameMode::Playing);
    assert!(!model.handle_click(0, 0));

    run_cascade(&mut model);
    assert_eq!(model.outcome(), Some(GameOutcome::Lost));
    assert_eq!(model.drain_events().last(), Some(&GameEvent::GameLost));
}

/// Scoring past the target wins at the end of the cascade.
#[test]
fn test_target_reached_wins() {
    let config = GameConfig::default().with_target_score(30);
    let mut model = GameModel::with_board(config, scenario_board());

    assert!(model.handle_click(0, 2));
    assert_eq!(model.outcome(), None);
    run_cascade(&mut model);

    assert_eq!(model.outcome(), Some(GameOutcome::Won));
    assert!(!model.handle_click(2, 0));
    assert!(!model.complete_remove_tiles());
}

// =============================================================================
// Explicit reshuffle
// =============================================================================

/// The explicit reshuffle blocks input until restored and leaves the
/// deadlock counter alone.
#[test]
fn test_explicit_reshuffle_blocks_input() {
    let mut model = GameModel::new(GameConfig::default(), 77);

    assert!(model.shuffle_board_with_animation());
    assert_eq!(model.mode(), GameMode::AnimationRunning);
    assert_eq!(model.drain_events(), vec![GameEvent::Shuffled]);

    assert!(!model.handle_click(0, 0));
    assert!(!model.activate_booster_mode(BoosterKind::Bomb));
    assert!(!model.shuffle_board_with_animation());
    assert!(model.drain_events().is_empty());

    assert!(model.restore_game_state());
    assert_eq!(model.mode(), GameMode::Playing);
    assert_eq!(model.shuffles_used(), 0);
    assert!(!model.restore_game_state());
}

/// A game that ends during the reshuffle animation stays over.
#[test]
fn test_restore_keeps_game_over() {
    let config = GameConfig::default().with_target_score(0);
    let mut model = GameModel::new(config, 77);

    assert!(model.shuffle_board_with_animation());
    assert_eq!(model.check_game_state(), Some(GameOutcome::Won));
    assert!(!model.restore_game_state());
    assert_eq!(model.mode(), GameMode::GameOver);
}

/// The reshuffle is only available in the plain playing mode.
#[test]
fn test_reshuffle_rejected_in_booster_mode() {
    let mut model = GameModel::new(GameConfig::default(), 77);

    assert!(model.activate_booster_mode(BoosterKind::Teleport));
    assert!(!model.shuffle_board_with_animation());
    assert_eq!(model.mode(), GameMode::SelectingTeleport);
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed and clicks produce the same session.
#[test]
fn test_deterministic_replay() {
    fn play(seed: u64) -> (Vec<GameEvent>, String) {
        let mut model = GameModel::new(GameConfig::default(), seed);
        let mut events = Vec::new();

        for _ in 0..10 {
            let target = model
                .board()
                .positions()
                .find(|p| model.board().find_connected_region(p.row, p.col).len() >= 2);
            let Some(pos) = target else { break };
            assert!(model.handle_click(pos.row, pos.col));
            run_cascade(&mut model);
            events.extend(model.drain_events());
        }
        (events, model.board().to_string())
    }

    let (events_a, board_a) = play(31337);
    let (events_b, board_b) = play(31337);
    assert!(!events_a.is_empty());
    assert_eq!(events_a, events_b);
    assert_eq!(board_a, board_b);
}
