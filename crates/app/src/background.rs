//! Fire-and-forget task tracking.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, error};

#[derive(Debug, Error)]
#[error("{remaining} background task(s) still running after {timeout:?}")]
pub struct DrainTimeout {
    pub remaining: usize,
    pub timeout: Duration,
}

/// Tracks detached tasks so shutdown can wait for them.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    inner: Arc<Tracker>,
}

#[derive(Debug, Default)]
struct Tracker {
    in_flight: AtomicUsize,
    idle: Notify,
}

struct InFlight(Arc<Tracker>);

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl BackgroundTasks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` detached from the caller.
    ///
    /// A panic inside `task` is logged and still releases its slot.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.in_flight.fetch_add(1, Ordering::AcqRel);

        let slot = InFlight(Arc::clone(&self.inner));

        tokio::spawn(async move {
            let _slot = slot;

            if let Err(join_error) = tokio::spawn(task).await {
                error!(task = name, "background task failed: {join_error}");
            }
        });
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Wait until every spawned task has finished, or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns [`DrainTimeout`] when tasks are still running at the deadline.
    pub async fn drain(&self, timeout: Duration) -> Result<(), DrainTimeout> {
        let wait_for_idle = async {
            loop {
                let idle = self.inner.idle.notified();

                if self.in_flight() == 0 {
                    return;
                }

                idle.await;
            }
        };

        if tokio::time::timeout(timeout, wait_for_idle).await.is_ok() {
            debug!("background tasks drained");

            Ok(())
        } else {
            Err(DrainTimeout {
                remaining: self.in_flight(),
                timeout,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn drain_waits_for_spawned_tasks() -> TestResult {
        let tasks = BackgroundTasks::new();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        tasks.spawn("sleepy", async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
        });

        tasks.drain(Duration::from_secs(5)).await?;

        assert!(finished.load(Ordering::SeqCst), "task should have completed");
        assert_eq!(tasks.in_flight(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn drain_with_nothing_in_flight_returns_immediately() -> TestResult {
        BackgroundTasks::new()
            .drain(Duration::from_millis(1))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn drain_gives_up_at_the_deadline() {
        let tasks = BackgroundTasks::new();

        tasks.spawn("stuck", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let result = tasks.drain(Duration::from_millis(20)).await;

        assert!(
            matches!(result, Err(DrainTimeout { remaining: 1, .. })),
            "expected a timeout with one task left, got {result:?}"
        );
    }

    #[tokio::test]
    async fn panicking_task_releases_its_slot() -> TestResult {
        let tasks = BackgroundTasks::new();

        tasks.spawn("boom", async {
            panic!("background failure");
        });

        tasks.drain(Duration::from_secs(5)).await?;

        assert_eq!(tasks.in_flight(), 0);

        Ok(())
    }
}
