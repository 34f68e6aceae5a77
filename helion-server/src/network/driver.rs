//! Tick Driver
//!
//! Single owner of the [`ServerSession`]. Connection tasks never touch the
//! lag-compensation store directly: they push [`DriverCommand`]s through a
//! [`DriverHandle`], and the driver applies them in arrival order on its own
//! tick. Once a tick's writes are applied, the [`TickObserver`] (hit
//! validation) reads the session. Reads therefore never overlap writes.

use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::config::ServerConfig;
use crate::game::session::{PositionReport, ServerSession};

/// Work queued for the tick owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Record a decoded position report.
    Report(PositionReport),
    /// Start a new level (resets the store).
    ChangeLevel(String),
    /// Stop after the current tick.
    Shutdown,
}

/// Driver errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// The driver has stopped and dropped its receiver.
    #[error("tick driver closed")]
    Closed,
}

/// Reader run once per tick after all writes for that tick.
pub trait TickObserver: Send {
    /// Inspect the session for the tick just completed.
    fn on_tick(&mut self, session: &ServerSession);
}

impl<F> TickObserver for F
where
    F: FnMut(&ServerSession) + Send,
{
    fn on_tick(&mut self, session: &ServerSession) {
        self(session)
    }
}

/// Cloneable producer side of the driver queue.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    tx: mpsc::Sender<DriverCommand>,
}

impl DriverHandle {
    /// Queue a position report.
    pub async fn report(&self, report: PositionReport) -> Result<(), DriverError> {
        self.send(DriverCommand::Report(report)).await
    }

    /// Queue a level change.
    pub async fn change_level(&self, name: impl Into<String>) -> Result<(), DriverError> {
        self.send(DriverCommand::ChangeLevel(name.into())).await
    }

    /// Ask the driver to stop.
    pub async fn shutdown(&self) -> Result<(), DriverError> {
        self.send(DriverCommand::Shutdown).await
    }

    /// Queue any command, waiting for queue space.
    pub async fn send(&self, command: DriverCommand) -> Result<(), DriverError> {
        self.tx.send(command).await.map_err(|_| DriverError::Closed)
    }
}

/// Outcome of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep ticking.
    Continue,
    /// Shutdown requested or every handle dropped.
    Stop,
}

/// Tick-owning driver.
pub struct TickDriver<O: TickObserver> {
    session: ServerSession,
    rx: mpsc::Receiver<DriverCommand>,
    observer: O,
    tick_duration: Duration,
    /// Most commands taken from the queue in one tick.
    drain_limit: usize,
}

impl<O: TickObserver> TickDriver<O> {
    /// Create a driver around `session` and the handle that feeds it.
    pub fn new(session: ServerSession, config: &ServerConfig, observer: O) -> (Self, DriverHandle) {
        let capacity = config.report_queue_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);

        let driver = Self {
            session,
            rx,
            observer,
            tick_duration: config.tick_duration(),
            drain_limit: capacity,
        };
        (driver, DriverHandle { tx })
    }

    /// The owned session.
    pub fn session(&self) -> &ServerSession {
        &self.session
    }

    /// Run one tick: drain queued commands, advance, then notify the observer.
    ///
    /// At most one queue's worth of commands is taken per tick; anything
    /// beyond that waits for the next tick. After `Shutdown` the queue is
    /// closed and everything already accepted is applied before stopping.
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::Continue;
        let mut batch: Vec<PositionReport> = Vec::new();
        let mut budget = self.drain_limit;
        let mut after_shutdown = 0usize;

        while budget > 0 || outcome == StepOutcome::Stop {
            let command = match self.rx.try_recv() {
                Ok(command) => command,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    outcome = StepOutcome::Stop;
                    break;
                }
            };
            budget = budget.saturating_sub(1);
            if outcome == StepOutcome::Stop {
                after_shutdown += 1;
            }

            match command {
                DriverCommand::Report(report) => batch.push(report),
                DriverCommand::ChangeLevel(name) => {
                    self.flush(&mut batch);
                    self.session.begin_level(&name);
                }
                DriverCommand::Shutdown => {
                    if outcome == StepOutcome::Continue {
                        self.rx.close();
                        outcome = StepOutcome::Stop;
                    }
                }
            }
        }
        self.flush(&mut batch);

        if after_shutdown > 0 {
            debug!("Applied {} commands queued behind shutdown", after_shutdown);
        }

        self.session.advance_tick();
        self.observer.on_tick(&self.session);
        outcome
    }

    /// Tick at the configured rate until stopped, then hand the session back.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> ServerSession {
        let mut ticker = interval(self.tick_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Tick driver running every {:?}", self.tick_duration);

        loop {
            ticker.tick().await;
            if self.step() == StepOutcome::Stop {
                break;
            }
        }

        info!(
            "Tick driver stopped at level {} tick {}",
            self.session.level(),
            self.session.tick()
        );
        self.session
    }

    fn flush(&mut self, batch: &mut Vec<PositionReport>) {
        if batch.is_empty() {
            return;
        }
        let applied = self.session.apply_reports(batch);
        if applied < batch.len() {
            debug!("{} reports rejected this tick", batch.len() - applied);
        }
        batch.clear();
    }
}
