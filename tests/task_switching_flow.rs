//! End-to-end task-switching games driven with explicit instants.

use mindgames::config::TaskSwitchingConfig;
use mindgames::task_switching::{ResponseKey, TaskPhase, TaskSwitchingEngine};
use mindgames::Outcome;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn engine(config: TaskSwitchingConfig, seed: u64) -> TaskSwitchingEngine<ChaCha8Rng> {
    TaskSwitchingEngine::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
}

fn answer(engine: &TaskSwitchingEngine<ChaCha8Rng>, correct: bool) -> (mindgames::TrialId, String) {
    let trial = engine.current_trial().unwrap();
    let expected = trial.stimulus.expected_key();
    let key = match (correct, expected) {
        (true, key) => key,
        (false, ResponseKey::EvenOrRound) => ResponseKey::OddOrAngular,
        (false, ResponseKey::OddOrAngular) => ResponseKey::EvenOrRound,
    };
    (trial.id, key.symbol().to_string())
}

#[test]
fn thirty_fast_correct_answers_score_full_accuracy() {
    let mut now = Instant::now();
    let mut engine = engine(TaskSwitchingConfig::default(), 1);
    engine.start(now).unwrap();

    while engine.phase() == TaskPhase::Running {
        let (id, symbol) = answer(&engine, true);
        now += ms(600);
        assert_eq!(engine.respond(id, &symbol.to_uppercase(), now), Some(Outcome::Correct));
        if let Some(wake) = engine.next_wake() {
            now = wake;
            engine.poll(now);
        }
    }

    let summary = engine.summary().unwrap();
    assert_eq!(summary.total_trials, 30);
    assert_eq!(summary.correct_trials, 30);
    assert_eq!(summary.accuracy_percent, 100.0);
    assert_eq!(summary.average_reaction_ms, 600);
    assert_eq!(summary.final_score, 30 * 70);
    assert_eq!(
        summary.to_string(),
        "Game Over! Final Score: 2100 | Accuracy: 100.0% | Avg Reaction: 600ms"
    );
}

#[test]
fn response_after_timeout_is_ignored() {
    let t0 = Instant::now();
    let mut engine = engine(TaskSwitchingConfig::default(), 2);
    engine.start(t0).unwrap();
    let (id, symbol) = answer(&engine, true);

    // The timeout wins even if nobody polled before the key press arrived.
    assert_eq!(engine.respond(id, &symbol, t0 + ms(2500)), Some(Outcome::Timeout));
    assert_eq!(engine.respond(id, &symbol, t0 + ms(2501)), None);
    assert!(engine.poll(t0 + ms(2600)).is_empty());

    assert_eq!(engine.stats().total_trials, 1);
    assert_eq!(engine.stats().score, 0);
}

#[test]
fn timeout_is_harsher_than_a_wrong_key() {
    let t0 = Instant::now();
    let mut engine = engine(TaskSwitchingConfig::default(), 3);
    engine.start(t0).unwrap();

    let (id, symbol) = answer(&engine, true);
    engine.respond(id, &symbol, t0 + ms(100));
    let banked = engine.stats().score;
    assert_eq!(banked, 95);

    engine.poll(t0 + ms(400));
    let (id, symbol) = answer(&engine, false);
    engine.respond(id, &symbol, t0 + ms(500));
    assert_eq!(engine.stats().score, banked - 5);

    engine.poll(t0 + ms(800));
    assert_eq!(engine.poll(t0 + ms(3300)), vec![Outcome::Timeout]);
    assert_eq!(engine.stats().score, banked - 15);
    assert_eq!(engine.stats().best_streak, 1);
}

#[test]
fn shorter_games_end_on_their_last_outcome() {
    let config = TaskSwitchingConfig::builder().trial_count(3).build().unwrap();
    let t0 = Instant::now();
    let mut engine = engine(config, 4);
    engine.start(t0).unwrap();

    // Nobody answers: three timeouts separated by feedback pauses.
    let outcomes = engine.poll(t0 + ms(60_000));
    assert_eq!(outcomes, vec![Outcome::Timeout; 3]);
    assert_eq!(engine.phase(), TaskPhase::Ended);
    assert_eq!(engine.summary().unwrap().accuracy_percent, 0.0);
    assert_eq!(
        engine.history().get_path(),
        vec![&TaskPhase::Idle, &TaskPhase::Running, &TaskPhase::Ended]
    );
}

#[test]
fn snapshot_tracks_countdown_in_display_ticks() {
    let t0 = Instant::now();
    let mut engine = engine(TaskSwitchingConfig::default(), 5);
    engine.start(t0).unwrap();

    assert_eq!(engine.snapshot(t0).time_left_ms, 2500);
    assert_eq!(engine.snapshot(t0 + ms(1)).time_left_ms, 2400);
    assert_eq!(engine.snapshot(t0 + ms(2450)).time_left_ms, 0);
    assert_eq!(engine.snapshot(t0 + ms(3000)).time_left_ms, 0);
}
