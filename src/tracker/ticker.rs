//! Refresh schedulers

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Source of periodic refresh triggers
///
/// `tick` must be cancel safe: the tracker drops a pending tick whenever a
/// command arrives first.
#[async_trait]
pub trait Ticker: Send {
    /// Resolve when the next refresh is due
    async fn tick(&mut self);
}

/// Fixed-period ticker; the first tick completes immediately
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        // A tick missed during a slow fetch is dropped, not replayed
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticker driven by hand through a channel
///
/// Once every sender is dropped it never fires again.
pub struct ChannelTicker {
    rx: mpsc::Receiver<()>,
}

impl ChannelTicker {
    /// Returns the ticker and the sender that triggers it
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel(16);
        (Self { rx }, tx)
    }
}

#[async_trait]
impl Ticker for ChannelTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
