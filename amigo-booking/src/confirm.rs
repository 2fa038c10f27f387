use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Auto-dismiss timer for the confirmation screen. Fires once after the
/// configured delay; cancelling (or dropping) the handle aborts the timer so
/// no dismissal lands after the owner is gone.
pub struct AutoDismiss {
    task: JoinHandle<()>,
    dismissed: watch::Receiver<bool>,
}

impl AutoDismiss {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(5000);

    pub fn start(delay: Duration) -> Self {
        let (tx, dismissed) = watch::channel(false);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(true);
        });
        Self { task, dismissed }
    }

    /// Resolves when the delay elapses; never resolves if cancelled first.
    pub async fn wait(&mut self) {
        // A closed channel means the timer was aborted mid-flight; pending
        // forever is the correct behavior for a cancelled dismissal.
        while !*self.dismissed.borrow() {
            if self.dismissed.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    pub fn is_dismissed(&self) -> bool {
        *self.dismissed.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.dismissed.clone()
    }

    pub fn cancel(self) {
        // Drop does the abort.
    }
}

impl Drop for AutoDismiss {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut timer = AutoDismiss::start(Duration::from_millis(5000));
        assert!(!timer.is_dismissed());

        timer.wait().await;
        assert!(timer.is_dismissed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_dismissal() {
        let timer = AutoDismiss::start(Duration::from_millis(5000));
        let mut observer = timer.subscribe();
        timer.cancel();

        // Run well past the delay; the flag must never flip.
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert!(!*observer.borrow());
        assert!(observer.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_the_timer() {
        let observer = {
            let timer = AutoDismiss::start(Duration::from_millis(5000));
            timer.subscribe()
        };
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert!(!*observer.borrow());
    }
}
