//! End-to-end math + memory games driven with explicit instants.

use mindgames::config::{MathMemoryConfig, LEVELS};
use mindgames::math_memory::{GamePhase, MathMemoryEngine, Stage};
use mindgames::Outcome;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

struct Player {
    engine: MathMemoryEngine<ChaCha8Rng>,
    now: Instant,
}

impl Player {
    fn new(seed: u64) -> Self {
        Self {
            engine: MathMemoryEngine::with_rng(
                MathMemoryConfig::default(),
                ChaCha8Rng::seed_from_u64(seed),
            ),
            now: Instant::now(),
        }
    }

    fn start(&mut self, level: u8) {
        self.engine.start_game(level, self.now).unwrap();
    }

    /// Jump to the engine's next wake-up and process it.
    fn wait(&mut self) {
        let wake = self.engine.next_wake().expect("engine has pending work");
        self.now = self.now.max(wake);
        self.engine.poll(self.now);
    }

    /// Play until recall, answering problems with `answer`. Returns
    /// (items shown, problems shown).
    fn play_round(&mut self, answer: impl Fn(u32) -> String) -> (usize, usize) {
        let mut problems = 0;
        while self.engine.phase() == GamePhase::Playing {
            if let Some((id, problem)) = self.engine.current_problem() {
                let text = answer(problem.answer);
                self.now += Duration::from_millis(250);
                self.engine.submit_answer(id, &text, self.now);
                problems += 1;
            } else {
                self.wait();
            }
        }
        assert_eq!(self.engine.phase(), GamePhase::Recall);
        assert_eq!(self.engine.stage(), &Stage::AwaitRecall);
        (self.engine.sequence().len(), problems)
    }

    fn recall(&mut self, correct: bool) -> Outcome {
        let text = if correct {
            self.engine.sequence().items().join(" ").to_lowercase()
        } else {
            "nothing".to_string()
        };
        let outcome = self.engine.submit_recall(&text, self.now).unwrap();
        self.wait();
        outcome
    }
}

#[test]
fn every_level_shows_items_then_one_fewer_problem() {
    for (idx, level) in LEVELS.iter().enumerate() {
        let mut player = Player::new(idx as u64);
        player.start(idx as u8 + 1);

        let (items, problems) = player.play_round(|answer| answer.to_string());
        assert_eq!(items, level.sequence_length, "{}", level.name);
        assert_eq!(problems, level.sequence_length - 1, "{}", level.name);
    }
}

#[test]
fn five_recalls_reach_level_two_with_all_lives() {
    let mut player = Player::new(21);
    player.start(1);

    for round in 1..=5 {
        assert_eq!(player.engine.progression().round(), round);
        player.play_round(|answer| answer.to_string());
        assert_eq!(player.recall(true), Outcome::Correct);
    }

    let snapshot = player.engine.snapshot(player.now);
    assert_eq!(snapshot.level, 2);
    assert_eq!(snapshot.level_name, "Easy");
    assert_eq!(snapshot.round, 1);
    assert_eq!(snapshot.lives, 3);
    assert_eq!(snapshot.streak, 5);
    assert_eq!(snapshot.sequence_length, 4);
    // 5 recalls * 50 + 10 correct problems * 10
    assert_eq!(snapshot.score, 350);
}

#[test]
fn three_failed_recalls_end_the_game() {
    let mut player = Player::new(22);
    player.start(2);

    for lives_left in [2, 1, 0] {
        player.play_round(|answer| answer.to_string());
        assert_eq!(player.recall(false), Outcome::Incorrect);
        assert_eq!(player.engine.stats().lives, lives_left);
    }

    assert_eq!(player.engine.phase(), GamePhase::GameOver);
    assert!(player.engine.next_wake().is_none());

    let summary = player.engine.summary().unwrap();
    let progress = summary.progress.as_ref().unwrap();
    assert_eq!((progress.level, progress.round), (2, 1));
    assert!(!progress.won);
    assert_eq!(summary.total_trials, 9);
    assert_eq!(summary.accuracy_percent, 100.0);
    assert!(summary.to_string().ends_with("| Level 2 (Easy) Round 1"));
}

#[test]
fn clearing_the_last_level_wins() {
    let mut player = Player::new(23);
    player.start(6);

    for _ in 0..5 {
        player.play_round(|answer| answer.to_string());
        player.recall(true);
    }

    assert_eq!(player.engine.phase(), GamePhase::GameOver);
    let progress = player.engine.summary().unwrap().progress.clone().unwrap();
    assert!(progress.won);
    assert_eq!(progress.level, 6);
    assert_eq!(progress.rounds_recalled, 5);
}

#[test]
fn wrong_math_does_not_break_the_recall_streak() {
    let mut player = Player::new(24);
    player.start(1);

    player.play_round(|answer| answer.to_string());
    player.recall(true);
    player.play_round(|answer| (answer + 1).to_string());

    let stats = player.engine.stats();
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.total_trials, 4);
    assert_eq!(stats.correct_trials, 2);
    // 50 + 2*10, then two wrong answers at -5 each
    assert_eq!(stats.score, 60);
}

#[test]
fn play_again_after_game_over_starts_fresh() {
    let mut player = Player::new(25);
    player.start(1);
    for _ in 0..3 {
        player.play_round(|answer| answer.to_string());
        player.recall(false);
    }
    let first = player.engine.session();

    player.start(3);

    assert_ne!(player.engine.session(), first);
    assert_eq!(player.engine.phase(), GamePhase::Playing);
    assert_eq!(player.engine.stats().lives, 3);
    assert_eq!(player.engine.stats().score, 0);
    assert!(player.engine.summary().is_none());
    assert_eq!(player.engine.level().name, "Medium");
}

#[test]
fn navigating_away_mid_problem_silences_the_clock() {
    let mut player = Player::new(26);
    player.start(1);
    while player.engine.current_problem().is_none() {
        player.wait();
    }

    player.engine.navigate_away();

    assert_eq!(player.engine.phase(), GamePhase::Menu);
    assert!(player.engine.poll(player.now + Duration::from_secs(60)).is_empty());
    assert_eq!(player.engine.stats().total_trials, 0);
}
