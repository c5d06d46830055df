//! Timer seam between the session and whatever clock drives it.
//!
//! The session only keeps [`TimerId`]s. The host arms the real timer and
//! reports each fire back through `TouchSession::on_timer`.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::TimerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires repeatedly until cancelled.
    Countdown { every: Duration },
    /// Fires once.
    Restart { after: Duration },
}

impl TimerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimerKind::Countdown { .. } => "countdown",
            TimerKind::Restart { .. } => "restart",
        }
    }
}

pub trait Timers {
    fn schedule(&mut self, kind: TimerKind) -> Result<TimerId, TimerError>;
    /// Unknown or already-finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Duration,
    every: Option<Duration>,
}

/// Simulated clock. Nothing fires until [`ManualTimers::advance`] is called.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_id: i32,
    pending: BTreeMap<TimerId, Pending>,
    fail_next: bool,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Makes the next `schedule` call fail, as a browser refusing a timer would.
    pub fn fail_next_schedule(&mut self) {
        self.fail_next = true;
    }

    /// Moves the clock forward by `by`, handing every timer that comes due to
    /// `fire` in due order. `fire` may schedule or cancel timers; anything it
    /// schedules inside the window fires in the same call.
    pub fn advance<E>(
        &mut self,
        by: Duration,
        mut fire: impl FnMut(&mut Self, TimerId) -> Result<(), E>,
    ) -> Result<(), E> {
        let deadline = self.now + by;
        while let Some(id) = self.pop_due(deadline) {
            fire(self, id)?;
        }
        self.now = deadline;
        Ok(())
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        // Ties go to the lower id, i.e. the timer armed first.
        let (&id, &pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(id, p)| (p.due, **id))?;
        self.now = pending.due;
        match pending.every {
            Some(every) => {
                self.pending.insert(id, Pending { due: pending.due + every, every: Some(every) });
            }
            None => {
                self.pending.remove(&id);
            }
        }
        Some(id)
    }
}

impl Timers for ManualTimers {
    fn schedule(&mut self, kind: TimerKind) -> Result<TimerId, TimerError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(TimerError::Schedule {
                kind: kind.label(),
                reason: "simulated failure".to_string(),
            });
        }
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let pending = match kind {
            TimerKind::Countdown { every } => Pending { due: self.now + every, every: Some(every) },
            TimerKind::Restart { after } => Pending { due: self.now + after, every: None },
        };
        self.pending.insert(id, pending);
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn collect(timers: &mut ManualTimers, by: Duration) -> Vec<(TimerId, Duration)> {
        let mut fired = Vec::new();
        timers
            .advance(by, |t, id| {
                fired.push((id, t.now()));
                Ok::<(), Infallible>(())
            })
            .unwrap();
        fired
    }

    #[test]
    fn interval_repeats_and_timeout_fires_once() {
        let mut timers = ManualTimers::new();
        let tick = timers
            .schedule(TimerKind::Countdown { every: Duration::from_secs(1) })
            .unwrap();
        let once = timers
            .schedule(TimerKind::Restart { after: Duration::from_millis(2500) })
            .unwrap();

        let fired = collect(&mut timers, Duration::from_secs(3));
        assert_eq!(
            fired,
            vec![
                (tick, Duration::from_secs(1)),
                (tick, Duration::from_secs(2)),
                (once, Duration::from_millis(2500)),
                (tick, Duration::from_secs(3)),
            ]
        );
        assert!(timers.is_pending(tick));
        assert!(!timers.is_pending(once));
        assert_eq!(timers.now(), Duration::from_secs(3));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = ManualTimers::new();
        let id = timers
            .schedule(TimerKind::Restart { after: Duration::from_secs(1) })
            .unwrap();
        timers.cancel(id);
        assert!(collect(&mut timers, Duration::from_secs(5)).is_empty());
        // cancelling twice is harmless
        timers.cancel(id);
    }

    #[test]
    fn timers_armed_during_advance_fire_in_the_same_window() {
        let mut timers = ManualTimers::new();
        let first = timers
            .schedule(TimerKind::Restart { after: Duration::from_secs(1) })
            .unwrap();
        let mut seen = Vec::new();
        timers
            .advance(Duration::from_secs(4), |t, id| {
                seen.push(id);
                if id == first {
                    t.schedule(TimerKind::Restart { after: Duration::from_secs(2) })?;
                }
                Ok::<(), TimerError>(())
            })
            .unwrap();
        assert_eq!(seen, vec![first, TimerId(first.0 + 1)]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn simulated_schedule_failure_is_one_shot() {
        let mut timers = ManualTimers::new();
        timers.fail_next_schedule();
        let kind = TimerKind::Countdown { every: Duration::from_secs(1) };
        assert!(timers.schedule(kind).is_err());
        assert!(timers.schedule(kind).is_ok());
    }
}
