//! Interval that tracks the actions it actually delivered
//!
//! The measured rate is for the HUD only. Game logic never reads it.

use super::Periodic;
use crate::consts::SAMPLE_WINDOW_MS;

/// What a due deadline on an interval stands for
///
/// Ordered so that an action due at the same instant as a sample runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntervalEvent {
    /// Run the task
    Action,
    /// Publish the action count for the last window and reset it
    Sample,
}

/// A task invoked at a target rate, with its achieved rate sampled once per second
#[derive(Debug, Clone)]
pub struct TrackedInterval<T> {
    name: String,
    task: T,
    /// Target actions per second
    aps: f64,
    /// Actions counted in the last full sample window
    rate: u32,
    /// Running number of actions in the current window
    actions: u32,
    action: Periodic,
    tracker: Periodic,
}

impl<T: Copy> TrackedInterval<T> {
    /// Create a stopped interval
    pub fn new(name: impl Into<String>, aps: f64, task: T) -> Self {
        Self {
            name: name.into(),
            task,
            aps,
            rate: 0,
            actions: 0,
            action: Periodic::new(aps),
            tracker: Periodic::new(1000.0 / SAMPLE_WINDOW_MS),
        }
    }

    /// Start both timers at `now_ms` with a zero action count
    pub fn start(&mut self, now_ms: f64) {
        self.actions = 0;
        self.action.start(now_ms);
        self.tracker.start(now_ms);
    }

    pub fn pause(&mut self) {
        self.action.stop();
        self.tracker.stop();
    }

    pub fn is_running(&self) -> bool {
        self.action.is_running()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task(&self) -> T {
        self.task
    }

    pub fn target_rate(&self) -> f64 {
        self.aps
    }

    /// Achieved actions per second over the last sample window
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Earliest pending deadline and what it is for
    pub fn next_event(&self) -> Option<(f64, IntervalEvent)> {
        let action = self.action.next_due().map(|at| (at, IntervalEvent::Action));
        let sample = self.tracker.next_due().map(|at| (at, IntervalEvent::Sample));
        match (action, sample) {
            (Some(a), Some(s)) => Some(if s.0 < a.0 { s } else { a }),
            (a, s) => a.or(s),
        }
    }

    /// Consume a due event; returns the task when it is time to run it
    pub fn fire(&mut self, event: IntervalEvent) -> Option<T> {
        match event {
            IntervalEvent::Action => {
                self.action.fire();
                self.actions += 1;
                Some(self.task)
            }
            IntervalEvent::Sample => {
                self.tracker.fire();
                self.rate = self.actions;
                self.actions = 0;
                None
            }
        }
    }

    /// Drop deadlines swallowed by a stall
    pub(crate) fn skip_to(&mut self, now_ms: f64) {
        self.action.skip_to(now_ms);
        self.tracker.skip_to(now_ms);
    }
}
