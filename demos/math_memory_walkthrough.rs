//! Math + Memory Walkthrough
//!
//! This example plays one round of the math-memory game on a simulated
//! clock. No real time passes: every call gets the instant it should
//! happen at, which is how the engines are tested too.
//!
//! Key concepts:
//! - Pure engine operations that take `now`
//! - `next_wake` tells the caller when something is due
//! - Snapshots serialize to JSON for a renderer
//!
//! Run with: cargo run --example math_memory_walkthrough

use mindgames::config::MathMemoryConfig;
use mindgames::math_memory::{GamePhase, MathMemoryEngine, Stage};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut engine = MathMemoryEngine::new(MathMemoryConfig::default());
    let mut now = Instant::now();
    engine.start_game(2, now)?;
    println!("Level {}: {}", engine.progression().level(), engine.level().name);

    while engine.phase() == GamePhase::Playing {
        match engine.stage().clone() {
            Stage::Memorize { item } => println!("Remember: {item}"),
            Stage::Compute { trial, problem } => {
                println!("Solve: {problem}");
                now += Duration::from_millis(1200);
                let answer = problem.answer.to_string();
                engine.submit_answer(trial, &answer, now);
                if let Some(feedback) = engine.feedback() {
                    println!("  {} {}", feedback.mark(), feedback.message);
                }
            }
            _ => {}
        }
        if let Some(wake) = engine.next_wake() {
            now = now.max(wake);
            engine.poll(now);
        }
    }

    let typed = engine.sequence().items().join(", ").to_lowercase();
    println!("Recall: {typed}");
    engine.submit_recall(&typed, now);
    if let Some(feedback) = engine.feedback() {
        println!("  {} {}", feedback.mark(), feedback.message);
    }

    let snapshot = engine.snapshot(now);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
