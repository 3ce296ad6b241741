//! Task-Switching Bot
//!
//! This example runs a task-switching game on the tokio driver against real
//! time, with a bot that answers after a random delay and is sometimes
//! wrong or too slow.
//!
//! Key concepts:
//! - The driver owns the engine and fires timeouts on its own
//! - Input goes in as commands, state comes out as snapshots
//! - Late answers are ignored by the engine
//!
//! Run with: RUST_LOG=mindgames=debug cargo run --example task_switching_bot

use mindgames::config::TaskSwitchingConfig;
use mindgames::driver;
use mindgames::task_switching::{ResponseKey, TaskPhase, TaskSwitchInput, TaskSwitchingEngine};
use rand::Rng;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TaskSwitchingConfig::builder()
        .trial_count(10)
        .response_window(Duration::from_millis(1500))
        .build()?;
    let session = driver::spawn(TaskSwitchingEngine::new(config));
    let mut updates = session.subscribe();
    let mut rng = rand::thread_rng();

    session.send(TaskSwitchInput::Start).await?;

    let mut last_answered = None;
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.phase == TaskPhase::Ended {
            if let Some(summary) = snapshot.summary {
                println!("{summary}");
            }
            break;
        }

        if let Some(feedback) = &snapshot.feedback {
            println!("  {} {} (score {})", feedback.mark(), feedback.message, snapshot.score);
        }

        let Some(trial) = snapshot.trial.filter(|t| t.awaiting_response) else {
            continue;
        };
        if last_answered == Some(trial.id) {
            continue;
        }
        last_answered = Some(trial.id);

        println!(
            "Trial {}: {:?} box, digit {}, {}",
            trial.id, trial.stimulus.side, trial.stimulus.digit, trial.stimulus.shape.name
        );

        let mut key = trial.stimulus.expected_key();
        if rng.gen_bool(0.15) {
            key = match key {
                ResponseKey::EvenOrRound => ResponseKey::OddOrAngular,
                ResponseKey::OddOrAngular => ResponseKey::EvenOrRound,
            };
        }
        tokio::time::sleep(Duration::from_millis(rng.gen_range(250..1800))).await;
        session
            .send(TaskSwitchInput::Respond {
                trial: trial.id,
                symbol: key.symbol().to_string(),
            })
            .await?;
    }

    session.shutdown().await?;
    Ok(())
}
