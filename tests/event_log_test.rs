//! Tests for the bounded event log.

use nusantara::{ClassKind, Direction, EventLog, GameSession, ScriptedDice, TurnOutcome};

#[test]
fn log_caps_at_thirty_entries_fifo() {
    let mut log = EventLog::new();
    for i in 0..35 {
        log.push(format!("entry {i}"));
    }
    assert_eq!(log.len(), 30);
    // The five oldest entries were evicted first.
    assert_eq!(log.iter().next(), Some("entry 5"));
    assert_eq!(log.iter().last(), Some("entry 34"));
}

#[test]
fn session_log_stays_bounded_under_play() {
    // Twenty forced encounter-and-flee cycles write 40 entries on top of
    // the creation line; only the newest 30 survive.
    let cycles = 20;
    let dice = ScriptedDice::new()
        .with_chances(std::iter::repeat(true).take(cycles * 2))
        .with_picks(std::iter::repeat(0).take(cycles))
        .with_jitters(std::iter::repeat(0).take(cycles));
    let mut session = GameSession::with_dice(dice);
    session.create_character(ClassKind::Ksatria).expect("creation");

    for i in 0..cycles {
        let direction = if i % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        session.move_player(direction).expect("move");
        assert_eq!(session.flee().expect("flee"), TurnOutcome::Escaped);
    }

    assert_eq!(session.log().len(), 30);
    // The creation entry was among the evicted.
    assert!(
        !session
            .log()
            .iter()
            .next()
            .expect("entry")
            .contains("Character created")
    );
}
