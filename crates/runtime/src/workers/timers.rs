//! Countdown and reveal timers.
//!
//! Each scheduled task is tagged with the session generation it was started
//! for. Dropping a [`ScheduledTask`] aborts it, so replacing a slot cancels
//! whatever was pending there.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval_at};

/// Signal sent by a timer task to the session worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerSignal {
    /// One second of the countdown elapsed.
    Tick { generation: u64 },
    /// The reveal delay elapsed.
    Reveal { generation: u64 },
}

impl TimerSignal {
    pub(crate) fn generation(&self) -> u64 {
        match self {
            TimerSignal::Tick { generation } | TimerSignal::Reveal { generation } => *generation,
        }
    }
}

struct ScheduledTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owns the pending ticker and reveal tasks. At most one of each runs.
pub(crate) struct Timers {
    signal_tx: mpsc::Sender<TimerSignal>,
    reveal_delay: Duration,
    ticker: Option<ScheduledTask>,
    reveal: Option<ScheduledTask>,
}

impl Timers {
    const TICK_PERIOD: Duration = Duration::from_secs(1);

    pub(crate) fn new(signal_tx: mpsc::Sender<TimerSignal>, reveal_delay: Duration) -> Self {
        Self {
            signal_tx,
            reveal_delay,
            ticker: None,
            reveal: None,
        }
    }

    pub(crate) fn abort_all(&mut self) {
        self.ticker = None;
        self.reveal = None;
    }

    /// Runs the countdown for `generation`, cancelling any pending reveal.
    pub(crate) fn ensure_ticker(&mut self, generation: u64) {
        self.reveal = None;
        if self.ticker.as_ref().is_some_and(|task| task.generation == generation) {
            return;
        }

        let tx = self.signal_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + Self::TICK_PERIOD, Self::TICK_PERIOD);
            loop {
                interval.tick().await;
                if tx.send(TimerSignal::Tick { generation }).await.is_err() {
                    break;
                }
            }
        });
        self.ticker = Some(ScheduledTask { generation, handle });
    }

    /// Schedules the advance for `generation`, stopping the countdown.
    pub(crate) fn ensure_reveal(&mut self, generation: u64) {
        self.ticker = None;
        if self.reveal.as_ref().is_some_and(|task| task.generation == generation) {
            return;
        }

        let tx = self.signal_tx.clone();
        let delay = self.reveal_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerSignal::Reveal { generation }).await;
        });
        self.reveal = Some(ScheduledTask { generation, handle });
    }

    #[cfg(test)]
    fn pending(&self) -> (Option<u64>, Option<u64>) {
        (
            self.ticker.as_ref().map(|task| task.generation),
            self.reveal.as_ref().map(|task| task.generation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticker_sends_once_per_second() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timers = Timers::new(tx, Duration::from_millis(1500));
        timers.ensure_ticker(3);

        assert_eq!(rx.recv().await, Some(TimerSignal::Tick { generation: 3 }));
        assert_eq!(rx.recv().await, Some(TimerSignal::Tick { generation: 3 }));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_replaces_ticker() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timers = Timers::new(tx, Duration::from_millis(1500));
        timers.ensure_ticker(1);
        timers.ensure_reveal(1);
        assert_eq!(timers.pending(), (None, Some(1)));

        assert_eq!(rx.recv().await, Some(TimerSignal::Reveal { generation: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn abort_all_cancels_pending_tasks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timers = Timers::new(tx, Duration::from_millis(10));
        timers.ensure_reveal(2);
        timers.abort_all();
        drop(timers);

        // Every sender is gone once the aborted task is dropped.
        assert_eq!(rx.recv().await, None);
    }
}
