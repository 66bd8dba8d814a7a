//! Debounce as a cancellable scheduled task.
//!
//! Each call to [`Debounce::schedule`] cancels the previously scheduled task
//! before arming a new one, so a burst of calls inside the delay window
//! executes exactly once, with whatever the last call captured. The timer
//! itself sits behind the [`Scheduler`] seam: the browser implementation is
//! a `gloo_timers` timeout, tests drive a mock scheduler by hand.

use gloo_timers::callback::Timeout;

/// A handle to a scheduled task that can be revoked before it runs.
pub trait TaskHandle {
    fn cancel(self);
}

/// Arms delayed one-shot tasks.
pub trait Scheduler {
    type Handle: TaskHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

pub struct Debounce<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debounce<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self { scheduler, delay_ms, pending: None }
    }

    /// Schedules `task` behind the delay, dropping whatever was scheduled
    /// before. Only the most recent pending task ever fires.
    pub fn schedule(&mut self, task: impl FnOnce() + 'static) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(task)));
    }

    /// Revokes the pending task, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
    }
}

/// Browser scheduler over `setTimeout`.
pub struct TimeoutScheduler;

impl TaskHandle for Timeout {
    fn cancel(self) {
        Timeout::cancel(self);
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}
