//! Tokio shell that runs an engine against real time.
//!
//! The engines are pure: every operation takes the current instant. The
//! driver owns one engine on a task, feeds it commands from an `mpsc`
//! channel, sleeps until the engine's next wake-up and publishes a
//! snapshot on a `watch` channel after every change.

use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// Commands buffered per session before senders wait.
const COMMAND_BUFFER: usize = 32;

/// Sleep used when the engine has nothing scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// A game engine the driver can run.
pub trait TimedGame {
    type Input: Send + 'static;
    type Snapshot: Clone + Send + Sync + 'static;

    fn handle(&mut self, input: Self::Input, now: Instant);

    /// Process everything due at `now`.
    fn poll(&mut self, now: Instant);

    fn next_wake(&self) -> Option<Instant>;

    /// Cancel the current trial and every pending deferred step.
    fn navigate_away(&mut self);

    fn snapshot(&self, now: Instant) -> Self::Snapshot;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<I> {
    Input(I),
    /// Refresh the published snapshot; display only
    Tick,
    /// Cancel all pending work and stop the session task
    NavigateAway,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Session task has stopped")]
    Closed,

    #[error("Session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Caller's end of a running session.
pub struct SessionHandle<G: TimedGame> {
    commands: mpsc::Sender<Command<G::Input>>,
    snapshots: watch::Receiver<G::Snapshot>,
    task: JoinHandle<G>,
}

impl<G: TimedGame> SessionHandle<G> {
    pub async fn send(&self, input: G::Input) -> Result<(), DriverError> {
        self.command(Command::Input(input)).await
    }

    pub async fn tick(&self) -> Result<(), DriverError> {
        self.command(Command::Tick).await
    }

    async fn command(&self, command: Command<G::Input>) -> Result<(), DriverError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Latest published snapshot.
    pub fn latest(&self) -> G::Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that can await snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<G::Snapshot> {
        self.snapshots.clone()
    }

    /// Leave the game and get the engine back.
    pub async fn navigate_away(self) -> Result<G, DriverError> {
        // A closed channel means the task already stopped; join it either way.
        let _ = self.commands.send(Command::NavigateAway).await;
        Ok(self.task.await?)
    }

    /// Close the command channel and get the engine back.
    pub async fn shutdown(self) -> Result<G, DriverError> {
        let Self { commands, task, .. } = self;
        drop(commands);
        Ok(task.await?)
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Run `game` on a new tokio task.
pub fn spawn<G>(game: G) -> SessionHandle<G>
where
    G: TimedGame + Send + 'static,
{
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
    let (publisher, snapshots) = watch::channel(game.snapshot(now()));
    let task = tokio::spawn(run(game, receiver, publisher));
    SessionHandle {
        commands,
        snapshots,
        task,
    }
}

async fn run<G: TimedGame>(
    mut game: G,
    mut commands: mpsc::Receiver<Command<G::Input>>,
    snapshots: watch::Sender<G::Snapshot>,
) -> G {
    debug!("session task started");
    loop {
        let wake = game.next_wake();
        let deadline = wake
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(|| tokio::time::Instant::now() + IDLE_WAIT);

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Input(input)) => game.handle(input, now()),
                Some(Command::Tick) => game.poll(now()),
                Some(Command::NavigateAway) | None => {
                    game.navigate_away();
                    snapshots.send_replace(game.snapshot(now()));
                    break;
                }
            },
            () = tokio::time::sleep_until(deadline), if wake.is_some() => game.poll(now()),
        }

        snapshots.send_replace(game.snapshot(now()));
    }
    debug!("session task stopped");
    game
}
