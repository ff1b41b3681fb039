//! Drives a full scripted session the way an external event loop would:
//! startup options in, commands through the state machine, winning time out
//! into the leaderboard.

use minegrid_core::*;
use web_time::{Duration, Instant};

#[test]
fn scripted_session_from_config_to_leaderboard() {
    let options = StartupOptions::parse("2 2 1 4").unwrap();
    assert_eq!(options.game_config(), GameConfig::new((2, 2), 1));

    // Fixed layout so the script below is deterministic.
    let board = Board::from_mine_coords((2, 2), &[(0, 0)]);
    let start = Instant::now();
    let at = |n| start + Duration::from_secs(n);
    let mut game = GameSession::new(board, start);
    let mut generator = RandomBoardGenerator::new(9);

    // Flag the suspected mine, think a while in pause, then clear the rest.
    game.apply(&mut generator, Command::ToggleFlag((0, 0)), at(2))
        .unwrap();
    assert_eq!(game.mines_left(), 0);

    game.apply(&mut generator, Command::Pause, at(10)).unwrap();
    assert_eq!(
        game.apply(&mut generator, Command::Reveal((1, 1)), at(12))
            .unwrap(),
        Applied::Revealed(RevealOutcome::NoChange)
    );
    game.apply(&mut generator, Command::Resume, at(40)).unwrap();

    game.apply(&mut generator, Command::Reveal((0, 1)), at(41))
        .unwrap();
    game.apply(&mut generator, Command::Reveal((1, 0)), at(42))
        .unwrap();
    let last = game
        .apply(&mut generator, Command::Reveal((1, 1)), at(45))
        .unwrap();

    assert_eq!(last, Applied::Revealed(RevealOutcome::Won));
    assert_eq!(game.state(), GameState::Win);
    // 10s before the pause plus 5s after the resume.
    assert_eq!(game.elapsed_secs(at(60)), 15);

    let mut leaderboard = Leaderboard::parse("00:08,Alice\n00:20,Bob\n");
    let won_secs = game.take_win_time().expect("first claim yields the time");
    leaderboard.insert(ScoreEntry::from_secs(won_secs, "Carl"));

    // The latch keeps a second tick from double-inserting.
    assert_eq!(game.take_win_time(), None);
    assert_eq!(
        leaderboard.render(),
        "00:08,Alice\n00:15,Carl\n00:20,Bob\n"
    );

    let rows = leaderboard.display_rows("Carl");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].rank, 2);
    assert!(rows[1].is_current);
    assert!(!rows[0].is_current);
}

#[test]
fn restart_starts_a_clean_session_on_a_new_board() {
    let start = Instant::now();
    let mut game = GameSession::new(Board::from_mine_coords((4, 4), &[(0, 0)]), start);
    let mut generator = RandomBoardGenerator::new(123);

    assert_eq!(
        game.reveal((0, 0), start + Duration::from_secs(3)),
        RevealOutcome::MineHit
    );
    assert_eq!(game.state(), GameState::Lose);

    let restart_at = start + Duration::from_secs(30);
    game.apply(&mut generator, Command::Restart, restart_at)
        .unwrap();

    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.total_mines(), 1);
    assert_eq!(game.revealed_count(), 0);
    assert_eq!(game.elapsed_secs(restart_at + Duration::from_secs(4)), 4);
}
