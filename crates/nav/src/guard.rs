//! Input rate limiting.
//!
//! Every accepted input arms the guard; while it is armed further input is
//! dropped rather than queued, so a held-down key moves the cursor at a steady
//! pace. Release is a deferred task obtained from a [`Scheduler`]. Dropping
//! the guard cancels a pending release, so no timer outlives its navigator.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::trace;

/// Quiescence delay applied when none is configured.
pub const DEFAULT_GUARD_DELAY: Duration = Duration::from_millis(200);

/// Handle to a task scheduled with a [`Scheduler`]; cancels it when dropped.
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask").field("pending", &self.cancel.is_some()).finish()
    }
}

/// Runs a callback once after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> ScheduledTask;
}

/// [`Scheduler`] backed by a Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> ScheduledTask {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        let abort: AbortHandle = join.abort_handle();
        ScheduledTask::new(move || abort.abort())
    }
}

/// Observable state of a [`NavigationGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Guarded,
}

/// Busy flag with timed release.
pub struct NavigationGuard {
    busy: Arc<AtomicBool>,
    delay: Duration,
    scheduler: Arc<dyn Scheduler>,
    pending: Option<ScheduledTask>,
}

impl NavigationGuard {
    pub fn new(delay: Duration, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            delay,
            scheduler,
            pending: None,
        }
    }

    /// Guard using the default delay on the current Tokio runtime.
    ///
    /// Returns `None` outside a runtime.
    pub fn on_current_runtime(delay: Duration) -> Option<Self> {
        let scheduler = TokioScheduler::current()?;
        Some(Self::new(delay, Arc::new(scheduler)))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> GuardState {
        if self.busy.load(Ordering::Acquire) {
            GuardState::Guarded
        } else {
            GuardState::Idle
        }
    }

    /// Arm the guard. Returns `false`, without rescheduling anything, when it
    /// is already armed.
    pub fn try_acquire(&mut self) -> bool {
        if self.busy.swap(true, Ordering::AcqRel) {
            trace!("input dropped while guarded");
            return false;
        }
        let busy = Arc::clone(&self.busy);
        let release = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                busy.store(false, Ordering::Release);
            }),
        );
        // The previous release already fired; replacing it cancels nothing live.
        self.pending = Some(release);
        true
    }
}

impl fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("state", &self.state())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scheduler that stores callbacks until the test fires them.
    #[derive(Default)]
    struct ManualScheduler {
        queued: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    }

    impl ManualScheduler {
        fn fire_all(&self) {
            let tasks: Vec<_> = self.queued.lock().expect("queue lock").drain(..).collect();
            for task in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, _delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> ScheduledTask {
            self.queued.lock().expect("queue lock").push(task);
            ScheduledTask::new(|| {})
        }
    }

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let scheduler = Arc::new(ManualScheduler::default());
        let mut guard = NavigationGuard::new(DEFAULT_GUARD_DELAY, scheduler.clone());
        assert_eq!(guard.state(), GuardState::Idle);
        assert!(guard.try_acquire());
        assert_eq!(guard.state(), GuardState::Guarded);
        assert!(!guard.try_acquire());

        scheduler.fire_all();
        assert_eq!(guard.state(), GuardState::Idle);
        assert!(guard.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_releases_after_delay() {
        let mut guard = NavigationGuard::on_current_runtime(Duration::from_millis(200)).expect("runtime");
        assert!(guard.try_acquire());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(guard.state(), GuardState::Guarded);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(guard.state(), GuardState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_task_cancels_the_callback() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let scheduler = TokioScheduler::current().expect("runtime");
        let task = scheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        drop(task);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
