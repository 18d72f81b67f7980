//! Cycle monitor
//!
//! Consumes motion and timer events, tracks the cycle state, and tells
//! the caller what to do about the single inactivity timer and whom to
//! notify. The monitor itself never touches hardware, which keeps the
//! whole transition table testable on the host.
//!
//! Both entry points are synchronous and bounded; the embedding task is
//! free to call them from any context.

use crate::state::{CycleEvent, CycleState};

/// What the caller must do with the inactivity timer after an event
///
/// `Arm` always means stop-then-start: any pending expiry is cancelled
/// before the new deadline is set, so at most one timer is ever live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerOp {
    /// Leave the timer alone
    None,
    /// Cancel any pending expiry and arm for the given duration
    Arm(u32),
    /// Cancel any pending expiry without re-arming
    Cancel,
}

/// Status-change notifications raised by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// A cycle started (Idle/Finished -> Running)
    Started,
    /// A cycle finished (Running -> Finished)
    Finished,
}

/// Side effects of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Effects {
    /// Timer operation to perform
    pub timer: TimerOp,
    /// Notification to deliver, if any
    pub notify: Option<Notification>,
}

impl Effects {
    const fn none() -> Self {
        Self {
            timer: TimerOp::None,
            notify: None,
        }
    }
}

/// Cycle monitor
///
/// Owns the current cycle state and the inactivity timeout setting.
/// A timeout of 0 disables auto-finish: motion still starts a cycle,
/// but no timer is armed and the cycle runs until reconfigured.
#[derive(Debug)]
pub struct CycleMonitor {
    state: CycleState,
    timeout_ms: u32,
}

impl CycleMonitor {
    /// Create a monitor in the `Idle` state
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            state: CycleState::Idle,
            timeout_ms,
        }
    }

    /// Get the current cycle state
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Get the configured inactivity timeout
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Change the inactivity timeout
    ///
    /// A live timer is cancelled but not restarted; the new value takes
    /// effect the next time the timer is armed.
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) -> TimerOp {
        self.timeout_ms = timeout_ms;
        if self.state.timer_expected() {
            TimerOp::Cancel
        } else {
            TimerOp::None
        }
    }

    /// Process an event and return the side effects to perform
    pub fn handle(&mut self, event: CycleEvent) -> Effects {
        let previous = self.state;
        self.state = previous.transition(event);

        match (previous, event) {
            (CycleState::Idle, CycleEvent::Motion)
            | (CycleState::Finished, CycleEvent::Motion) => Effects {
                timer: self.arm_op(),
                notify: Some(Notification::Started),
            },
            // Only the deadline moves; no duplicate "started"
            (CycleState::Running, CycleEvent::Motion) => Effects {
                timer: self.arm_op(),
                notify: None,
            },
            (CycleState::Running, CycleEvent::InactivityElapsed) => Effects {
                timer: TimerOp::None,
                notify: Some(Notification::Finished),
            },
            // Acknowledge and stale timer expiries carry no effects
            _ => Effects::none(),
        }
    }

    fn arm_op(&self) -> TimerOp {
        if self.timeout_ms == 0 {
            TimerOp::None
        } else {
            TimerOp::Arm(self.timeout_ms)
        }
    }
}
