//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// The accelerometer crossed the configured threshold for the
    /// configured duration (no payload; the crossing itself is the event)
    Motion,
    /// The one-shot inactivity timer expired
    InactivityElapsed,
    /// The application layer consumed a `Finished` notification
    Acknowledge,
}

impl CycleEvent {
    /// Check if this event originates from the motion sensor
    pub fn is_sensor_event(&self) -> bool {
        matches!(self, CycleEvent::Motion)
    }

    /// Check if this event originates from the timer service
    pub fn is_timer_event(&self) -> bool {
        matches!(self, CycleEvent::InactivityElapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sources() {
        assert!(CycleEvent::Motion.is_sensor_event());
        assert!(!CycleEvent::Motion.is_timer_event());
        assert!(CycleEvent::InactivityElapsed.is_timer_event());
        assert!(!CycleEvent::Acknowledge.is_sensor_event());
        assert!(!CycleEvent::Acknowledge.is_timer_event());
    }
}
