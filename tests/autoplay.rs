use std::time::Duration;

use cozy_chess::{Move, Square};
use mate_replay::board::{CozyRules, Position};
use mate_replay::timer::TimerQueue;
use mate_replay::{AutoStart, Playback, PlaybackState, StepOutcome};

const TICK: Duration = Duration::from_millis(800);

fn moves(list: &[&str]) -> Vec<Move> { list.iter().map(|s| s.parse().unwrap()).collect() }

fn scholars() -> Playback<CozyRules, TimerQueue> {
    let mut p = Playback::new(CozyRules, TimerQueue::new());
    p.load(moves(&["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"]), None).unwrap();
    p
}

/// Advance the fake clock by one period and deliver the firings.
fn run_tick(p: &mut Playback<CozyRules, TimerQueue>) -> usize {
    let due = p.scheduler_mut().advance_by(TICK);
    let mut delivered = 0;
    for id in due {
        if p.tick(id).is_some() { delivered += 1; }
    }
    delivered
}

#[test]
fn play_then_stop_before_first_tick_keeps_cursor() {
    let mut p = scholars();
    assert_eq!(p.play_auto(TICK), AutoStart::Started);
    assert_eq!(p.state(), PlaybackState::Running);
    p.stop_auto();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(run_tick(&mut p), 0);
    assert_eq!(p.cursor(), 0);
    assert_eq!(p.position().fen(), Position::startpos().fen());
}

#[test]
fn autoplay_runs_to_finish_one_move_per_tick() {
    let mut p = scholars();
    p.play_auto(TICK);
    for expected in 1..=7 {
        assert_eq!(run_tick(&mut p), 1);
        assert_eq!(p.cursor(), expected);
    }
    assert_eq!(p.state(), PlaybackState::Finished);
    assert_eq!(p.scheduler().armed_count(), 0);
    assert_eq!(run_tick(&mut p), 0);
    assert_eq!(p.cursor(), 7);
}

#[test]
fn nothing_happens_between_ticks() {
    let mut p = scholars();
    p.play_auto(TICK);
    let due = p.scheduler_mut().advance_by(TICK - Duration::from_millis(1));
    assert!(due.is_empty());
    assert_eq!(p.cursor(), 0);
}

#[test]
fn stop_between_ticks_is_honoured() {
    let mut p = scholars();
    p.play_auto(TICK);
    run_tick(&mut p);
    run_tick(&mut p);
    p.stop_auto();
    p.stop_auto();
    assert_eq!(p.state(), PlaybackState::Paused);
    for _ in 0..5 { run_tick(&mut p); }
    assert_eq!(p.cursor(), 2);

    // Manual stepping still works while paused, and autoplay resumes
    p.step().unwrap();
    assert_eq!(p.cursor(), 3);
    assert_eq!(p.play_auto(TICK), AutoStart::Started);
    run_tick(&mut p);
    assert_eq!(p.cursor(), 4);
}

#[test]
fn stale_timer_id_is_ignored() {
    let mut p = scholars();
    p.play_auto(TICK);
    let old = p.scheduler_mut().advance_by(TICK);
    p.play_auto(TICK);
    for id in old { assert!(p.tick(id).is_none()); }
    assert_eq!(p.cursor(), 0);
}

#[test]
fn play_auto_needs_remaining_moves() {
    let mut p = Playback::new(CozyRules, TimerQueue::new());
    assert_eq!(p.play_auto(TICK), AutoStart::NoScenarioLoaded);
    assert_eq!(p.scheduler().armed_count(), 0);

    p.load(moves(&["e2e4"]), None).unwrap();
    p.step().unwrap();
    assert_eq!(p.play_auto(TICK), AutoStart::AlreadyFinished);
    assert_eq!(p.state(), PlaybackState::Finished);
    assert_eq!(p.scheduler().armed_count(), 0);
}

#[test]
fn failing_tick_pauses_autoplay() {
    let mut p = Playback::new(CozyRules, TimerQueue::new());
    p.load(moves(&["e2e4", "e2e4"]), None).unwrap();
    p.play_auto(TICK);
    let due = p.scheduler_mut().advance_by(TICK);
    assert!(matches!(p.tick(due[0]), Some(Ok(StepOutcome::Applied(_)))));
    let due = p.scheduler_mut().advance_by(TICK);
    assert!(matches!(p.tick(due[0]), Some(Err(_))));
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.cursor(), 1);
    assert_eq!(p.scheduler().armed_count(), 0);
}

#[test]
fn reset_cancels_autoplay() {
    let mut p = scholars();
    p.play_auto(TICK);
    run_tick(&mut p);
    p.reset();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.scheduler().armed_count(), 0);
    assert_eq!(run_tick(&mut p), 0);
    assert_eq!(p.cursor(), 0);
}

#[test]
fn stalled_host_applies_one_move_per_dispatch() {
    let mut p = scholars();
    p.play_auto(TICK);
    let due = p.scheduler_mut().advance_by(Duration::from_millis(3300));
    assert_eq!(due.len(), 1);
    for id in due { p.tick(id); }
    assert_eq!(p.cursor(), 1);
    assert_eq!(p.state(), PlaybackState::Running);
    assert_eq!(p.scheduler().next_due(), Some(Duration::from_millis(4000)));
}

#[test]
fn bad_fen_load_while_running_keeps_autoplay() {
    let mut p = scholars();
    p.play_auto(TICK);
    assert!(p.load(moves(&["a2a3"]), Some("not/a/fen w - - 0 1")).is_err());
    assert_eq!(p.state(), PlaybackState::Running);
    assert_eq!(p.scheduler().armed_count(), 1);
    assert_eq!(p.len(), 7);

    assert_eq!(run_tick(&mut p), 1);
    assert_eq!(p.cursor(), 1);
    assert_eq!(p.last_move(), Some((Square::E2, Square::E4)));
}

#[test]
fn play_auto_on_empty_loaded_sequence() {
    let mut p = Playback::new(CozyRules, TimerQueue::new());
    p.load(Vec::new(), None).unwrap();
    assert_eq!(p.state(), PlaybackState::Loaded);
    assert_eq!(p.play_auto(TICK), AutoStart::NoScenarioLoaded);
    assert_eq!(p.state(), PlaybackState::Loaded);
    assert_eq!(p.scheduler().armed_count(), 0);
}
