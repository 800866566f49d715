//! Trailing debounce for the search inputs.
//!
//! [`TrailingDebounce`] holds the timing rules; [`Debouncer`] wires them to
//! browser timers.  A callback fires only once `delay_ms` has passed since the
//! most recent trigger.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::utils::now_ms;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailingDebounce {
    delay_ms: u32,
    deadline: Option<f64>,
}

impl TrailingDebounce {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, deadline: None }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Record a trigger at `now`, pushing the deadline back.  Returns the new
    /// deadline.
    pub fn trigger(&mut self, now: f64) -> f64 {
        let deadline = now + f64::from(self.delay_ms);
        self.deadline = Some(deadline);
        deadline
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// `true` exactly once per quiet period: when `now` has reached the
    /// pending deadline.
    pub fn take_due(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Browser-side debouncer.  Each trigger replaces the pending [`Timeout`];
/// dropping the old handle cancels it.
#[derive(Clone)]
pub struct Debouncer {
    inner: Rc<RefCell<DebouncerInner>>,
}

struct DebouncerInner {
    timing: TrailingDebounce,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DebouncerInner {
                timing: TrailingDebounce::new(delay_ms),
                pending: None,
            })),
        }
    }

    /// Schedule `callback` for the end of the quiet period, superseding any
    /// callback scheduled by an earlier trigger.
    pub fn trigger<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let deadline = self.inner.borrow_mut().timing.trigger(now_ms());
        self.arm(deadline, callback);
    }

    fn arm<F>(&self, deadline: f64, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let wait = (deadline - now_ms()).max(0.0).ceil() as u32;
        let this = self.clone();
        let timeout = Timeout::new(wait, move || {
            let due = this.inner.borrow_mut().timing.take_due(now_ms());
            if due {
                callback();
                return;
            }
            let remaining = this.inner.borrow().timing.deadline();
            if let Some(deadline) = remaining {
                // Timer woke up early; wait out the remainder.
                this.arm(deadline, callback);
            }
        });
        self.inner.borrow_mut().pending = Some(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replay keystrokes against the timing rules with a 1 ms tick and
    /// collect the instants at which the callback would fire.
    fn fire_times(keystrokes: &[f64], delay_ms: u32, until: f64) -> Vec<f64> {
        let mut debounce = TrailingDebounce::new(delay_ms);
        let mut fired = Vec::new();
        let mut next = keystrokes.iter().peekable();
        let mut now = 0.0;
        while now <= until {
            while next.peek().map_or(false, |&&t| t <= now) {
                debounce.trigger(now);
                next.next();
            }
            if debounce.take_due(now) {
                fired.push(now);
            }
            now += 1.0;
        }
        fired
    }

    #[test]
    fn burst_within_quiet_period_fires_once() {
        assert_eq!(fire_times(&[0.0, 100.0, 300.0], 250, 2_000.0), vec![550.0]);
    }

    #[test]
    fn gap_longer_than_delay_fires_for_each_burst() {
        // 100 -> 400 is a 300 ms gap, so the first burst settles at 350.
        assert_eq!(fire_times(&[0.0, 100.0, 400.0], 250, 2_000.0), vec![350.0, 650.0]);
    }

    #[test]
    fn no_keystrokes_never_fires() {
        assert!(fire_times(&[], 250, 1_000.0).is_empty());
    }

    #[test]
    fn take_due_is_one_shot() {
        let mut d = TrailingDebounce::new(250);
        assert_eq!(d.trigger(10.0), 260.0);
        assert!(!d.take_due(259.0));
        assert!(d.take_due(260.0));
        assert!(!d.take_due(500.0));
        assert_eq!(d.deadline(), None);
    }
}
