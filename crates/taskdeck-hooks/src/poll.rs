//! Fixed-interval polling of an operation

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::AsyncOperation;

/// Shortest accepted polling interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Owner of a polling task.
///
/// The task is aborted when the handle is stopped or dropped, so the timer
/// never outlives the scope that started it.
#[derive(Debug)]
#[must_use = "dropping the handle stops polling"]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling.
    pub fn stop(self) {
        drop(self);
    }

    /// Whether the polling task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<A, T> AsyncOperation<A, T>
where
    A: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Execute now and then every `period` until the returned handle goes away.
    ///
    /// A tick that comes due while the previous invocation is still pending
    /// waits for it; ticks are delayed rather than bunched up. Periods below
    /// [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn poll_every(&self, period: Duration, args: A) -> PollHandle {
        let period = period.max(MIN_POLL_INTERVAL);
        let operation = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!(?period, "polling tick");
                operation.execute(args.clone()).await;
            }
        });
        PollHandle { task }
    }
}
