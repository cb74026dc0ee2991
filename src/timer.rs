//! Recurring timers for autoplay.
//!
//! The controller only arms and cancels timers; the host decides when time
//! passes. [`TimerQueue`] keeps its own virtual clock so tests can drive it
//! tick by tick and the CLI can feed it wall-clock time.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

pub trait Scheduler {
    /// Arm a timer that fires every `period` from now until cancelled.
    fn arm(&mut self, period: Duration) -> TimerId;

    /// Cancel `id`. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Debug)]
struct Armed {
    id: TimerId,
    period: Duration,
    due: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    armed: Vec<Armed>,
}

impl TimerQueue {
    pub fn new() -> Self { Self::default() }

    pub fn now(&self) -> Duration { self.now }

    pub fn is_armed(&self, id: TimerId) -> bool { self.armed.iter().any(|t| t.id == id) }

    pub fn armed_count(&self) -> usize { self.armed.len() }

    /// Earliest pending deadline, on the queue's clock.
    pub fn next_due(&self) -> Option<Duration> { self.armed.iter().map(|t| t.due).min() }

    /// Move the clock to `now` and return the due timers in deadline order.
    /// Each timer fires at most once per call; a timer that fell several
    /// periods behind skips to its first deadline after `now`.
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerId> {
        if now > self.now { self.now = now; }
        let mut fired: Vec<(Duration, TimerId)> = Vec::new();
        for t in &mut self.armed {
            if t.due > self.now { continue; }
            fired.push((t.due, t.id));
            while t.due <= self.now { t.due += t.period; }
        }
        fired.sort_by_key(|&(due, id)| (due, id.0));
        fired.into_iter().map(|(_, id)| id).collect()
    }

    pub fn advance_by(&mut self, dt: Duration) -> Vec<TimerId> {
        let target = self.now + dt;
        self.advance_to(target)
    }
}

impl Scheduler for TimerQueue {
    fn arm(&mut self, period: Duration) -> TimerId {
        // A zero period would never let advance_to terminate
        let period = period.max(Duration::from_millis(1));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.push(Armed { id, period, due: self.now + period });
        id
    }

    fn cancel(&mut self, id: TimerId) { self.armed.retain(|t| t.id != id); }
}
