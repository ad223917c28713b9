use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Handle to a repeating timer task.
///
/// The timer stops when [`ProgressTicker::cancel`] is called or the handle is
/// dropped, whichever comes first. The first tick fires one full interval
/// after spawning.
#[derive(Debug)]
pub struct ProgressTicker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawns the timer on the current tokio runtime. `on_tick` returning
    /// `false` ends the timer early (the receiving side is gone).
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let period = interval.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => {
                        if cancelled.is_cancelled() || !on_tick() {
                            break;
                        }
                    }
                }
            }
        });
        Self { token, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.token.cancel();
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_at_interval_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let ticker = ProgressTicker::spawn(Duration::from_millis(300), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        ticker.cancel();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_cancelled());
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_timer() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let ticker = ProgressTicker::spawn(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(ticker);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_end_timer() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let ticker = ProgressTicker::spawn(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst) < 1
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(ticker.is_finished());
    }
}
