//! Cooperative fixed-rate scheduling over a virtual clock
//!
//! Every periodic job in the game (rendering, physics, targeting, spawning,
//! background color) is a [`TrackedInterval`] registered with one
//! [`Scheduler`]. The host drives time explicitly with
//! [`Scheduler::next_due`], so the same code runs under a browser timer, a
//! native sleep loop, or a test that jumps the clock by hand.
//!
//! Tasks run one at a time, in timestamp order. Interleaving between tasks
//! follows only from their rates; nothing synchronizes them further.

pub mod interval;
pub mod timer;

pub use interval::{IntervalEvent, TrackedInterval};
pub use timer::Timer;

/// A repeating deadline on the virtual clock
///
/// Deadlines are `anchor + n * 1000 / per_second` for n = 1, 2, ..., computed
/// from the count rather than accumulated, so long runs don't drift.
#[derive(Debug, Clone)]
pub(crate) struct Periodic {
    per_second: f64,
    anchor_ms: f64,
    fired: u64,
    running: bool,
}

impl Periodic {
    pub(crate) fn new(per_second: f64) -> Self {
        Self {
            per_second,
            anchor_ms: 0.0,
            fired: 0,
            running: false,
        }
    }

    pub(crate) fn start(&mut self, now_ms: f64) {
        self.anchor_ms = now_ms;
        self.fired = 0;
        self.running = true;
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    fn deadline(&self, n: u64) -> f64 {
        self.anchor_ms + (n as f64 * 1000.0) / self.per_second
    }

    /// Next deadline, or `None` while stopped (or for a non-positive rate)
    pub(crate) fn next_due(&self) -> Option<f64> {
        if !self.running || !(self.per_second > 0.0) {
            return None;
        }
        Some(self.deadline(self.fired + 1))
    }

    pub(crate) fn fire(&mut self) {
        self.fired += 1;
    }

    /// Drop every deadline at or before `now_ms` without firing it
    pub(crate) fn skip_to(&mut self, now_ms: f64) {
        if !self.running || !(self.per_second > 0.0) || now_ms <= self.anchor_ms {
            return;
        }
        let elapsed = ((now_ms - self.anchor_ms) * self.per_second / 1000.0).floor() as u64;
        self.fired = self.fired.max(elapsed);
        while self.deadline(self.fired + 1) <= now_ms {
            self.fired += 1;
        }
    }
}

/// Runs a fixed set of [`TrackedInterval`]s against a virtual clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    intervals: Vec<TrackedInterval<T>>,
    now_ms: f64,
}

impl<T: Copy> Scheduler<T> {
    /// Create an empty scheduler whose clock reads `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            intervals: Vec::new(),
            now_ms,
        }
    }

    /// Register a task and start it at the current time
    pub fn add(&mut self, name: impl Into<String>, rate: f64, task: T) {
        let mut interval = TrackedInterval::new(name, rate, task);
        interval.start(self.now_ms);
        self.intervals.push(interval);
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn intervals(&self) -> &[TrackedInterval<T>] {
        &self.intervals
    }

    /// Restart every interval from a fresh count at the current time
    pub fn start(&mut self) {
        for interval in &mut self.intervals {
            interval.start(self.now_ms);
        }
    }

    /// Stop every interval; nothing is handed out again until [`Self::start`]
    pub fn pause(&mut self) {
        for interval in &mut self.intervals {
            interval.pause();
        }
    }

    pub fn is_running(&self) -> bool {
        self.intervals.iter().any(|i| i.is_running())
    }

    /// Pop the next task due at or before `until_ms`
    ///
    /// Rate samples due on the way are applied internally. When nothing else
    /// is due the clock settles at `until_ms` and `None` is returned. Calling
    /// this in a loop and running each task delivers every tick in order;
    /// pausing from inside a task stops delivery immediately.
    pub fn next_due(&mut self, until_ms: f64) -> Option<T> {
        loop {
            let next = self
                .intervals
                .iter()
                .enumerate()
                .filter_map(|(idx, interval)| {
                    interval
                        .next_event()
                        .filter(|(at, _)| *at <= until_ms)
                        .map(|(at, event)| (at, event, idx))
                })
                .min_by(|a, b| {
                    a.0.total_cmp(&b.0)
                        .then(a.1.cmp(&b.1))
                        .then(a.2.cmp(&b.2))
                });

            let Some((at, event, idx)) = next else {
                self.now_ms = self.now_ms.max(until_ms);
                return None;
            };

            self.now_ms = self.now_ms.max(at);
            if let Some(task) = self.intervals[idx].fire(event) {
                return Some(task);
            }
        }
    }

    /// Jump the clock to `now_ms` as if the host had been stalled
    ///
    /// Ticks that fell inside the stall are lost, not replayed.
    pub fn stall_to(&mut self, now_ms: f64) {
        for interval in &mut self.intervals {
            interval.skip_to(now_ms);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }
}
