//! Tracker controller task
//!
//! One task owns the `TrackerState`. It waits on the ticker and on the command
//! channel; at most one fetch is in flight, and slider commands keep being
//! applied while it is pending.

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::state::{TrackerState, TrackerView};
use super::ticker::Ticker;
use crate::feed::{PriceFeed, QuoteSource};

/// Requests sent from the UI to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Manual refresh; ignored while a fetch is in flight
    Refresh,
    /// Slider moved to a new hypothetical price
    Simulate(Decimal),
    /// Stop the task and its timer
    Shutdown,
}

/// Tracker handle errors
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker task is no longer running
    #[error("Tracker stopped")]
    Stopped,
    /// The tracker task panicked
    #[error("Tracker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

enum Trigger {
    Fetch,
    Simulate(Decimal),
    Stop,
}

/// Controller owning the feed, the ticker and the state
pub struct TrackerService<S, T> {
    feed: PriceFeed<S>,
    ticker: T,
    state: TrackerState,
    commands: mpsc::Receiver<Command>,
    views: watch::Sender<TrackerView>,
}

impl<S, T> TrackerService<S, T>
where
    S: QuoteSource + 'static,
    T: Ticker + 'static,
{
    /// Spawn the controller on the current runtime
    pub fn spawn(feed: PriceFeed<S>, ticker: T, state: TrackerState) -> TrackerHandle {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (view_tx, view_rx) = watch::channel(state.view());

        let service = Self {
            feed,
            ticker,
            state,
            commands: command_rx,
            views: view_tx,
        };
        let task = tokio::spawn(service.run());

        TrackerHandle {
            commands: command_tx,
            views: view_rx,
            task,
        }
    }

    async fn run(mut self) {
        tracing::info!("Tracker started");

        loop {
            let trigger = tokio::select! {
                _ = self.ticker.tick() => Trigger::Fetch,
                command = self.commands.recv() => match command {
                    Some(Command::Refresh) => Trigger::Fetch,
                    Some(Command::Simulate(price)) => Trigger::Simulate(price),
                    Some(Command::Shutdown) | None => Trigger::Stop,
                },
            };

            match trigger {
                Trigger::Fetch => {
                    if !self.refresh().await {
                        break;
                    }
                }
                Trigger::Simulate(price) => {
                    self.state.set_hypothetical_price(price);
                    publish(&self.views, &self.state);
                }
                Trigger::Stop => break,
            }
        }

        tracing::info!("Tracker stopped");
    }

    /// Run one fetch cycle; returns false if shutdown was requested meanwhile
    async fn refresh(&mut self) -> bool {
        let Self {
            feed,
            state,
            commands,
            views,
            ..
        } = self;

        state.begin_fetch();
        publish(views, state);

        let fetch = feed.fetch_current_prices();
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                sample = &mut fetch => {
                    state.complete_fetch(sample);
                    publish(views, state);
                    return true;
                }
                command = commands.recv() => match command {
                    Some(Command::Refresh) => {
                        tracing::debug!("Refresh ignored, fetch already in flight");
                    }
                    Some(Command::Simulate(price)) => {
                        state.set_hypothetical_price(price);
                        publish(views, state);
                    }
                    Some(Command::Shutdown) | None => return false,
                },
            }
        }
    }
}

fn publish(views: &watch::Sender<TrackerView>, state: &TrackerState) {
    views.send_replace(state.view());
}

/// UI-side handle to a running tracker
pub struct TrackerHandle {
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<TrackerView>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Request an immediate refresh
    pub async fn refresh(&self) -> Result<(), TrackerError> {
        self.send(Command::Refresh).await
    }

    /// Move the simulation slider
    pub async fn simulate(&self, price: Decimal) -> Result<(), TrackerError> {
        self.send(Command::Simulate(price)).await
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<TrackerView> {
        self.views.clone()
    }

    /// Latest published view
    pub fn view(&self) -> TrackerView {
        self.views.borrow().clone()
    }

    /// Stop the tracker and wait for its task to finish
    pub async fn shutdown(self) -> Result<(), TrackerError> {
        // The task may already be gone; joining below reports how it ended
        let _ = self.commands.send(Command::Shutdown).await;
        self.task.await?;
        Ok(())
    }

    async fn send(&self, command: Command) -> Result<(), TrackerError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| TrackerError::Stopped)
    }
}
