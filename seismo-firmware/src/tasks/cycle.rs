//! Cycle task
//!
//! Owns the cycle monitor and the single inactivity deadline. The
//! deadline is a future re-created on every event, so cancelling and
//! re-arming are one atomic step from the perspective of event
//! delivery: there is never a second live timer to double-fire.
//!
//! This task is the only writer of the shared status cell.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use seismo_core::cycle::{CycleMonitor, Notification, TimerOp};
use seismo_core::state::CycleEvent;

use crate::channels::{CycleMessage, CYCLE_CHANNEL, CYCLE_STATUS, STATUS_NOTIFY};

/// Cycle task - state machine plus retriggerable inactivity deadline
#[embassy_executor::task]
pub async fn cycle_task(inactivity_timeout_ms: u32) {
    info!(
        "Cycle task started, inactivity timeout {} ms",
        inactivity_timeout_ms
    );

    let mut monitor = CycleMonitor::new(inactivity_timeout_ms);
    let mut deadline: Option<Instant> = None;

    loop {
        let message = match deadline {
            Some(at) => match select(CYCLE_CHANNEL.receive(), Timer::at(at)).await {
                Either::First(message) => message,
                Either::Second(()) => {
                    deadline = None;
                    CycleMessage::Event(CycleEvent::InactivityElapsed)
                }
            },
            None => CYCLE_CHANNEL.receive().await,
        };

        match message {
            CycleMessage::SetTimeout(timeout_ms) => {
                debug!("Inactivity timeout set to {} ms", timeout_ms);
                // Effective on the next arm; a live deadline is dropped
                if monitor.set_timeout_ms(timeout_ms) == TimerOp::Cancel {
                    deadline = None;
                }
            }
            CycleMessage::Event(event) => {
                let effects = monitor.handle(event);

                match effects.timer {
                    TimerOp::Arm(timeout_ms) => {
                        deadline = Some(Instant::now() + Duration::from_millis(timeout_ms as u64));
                    }
                    TimerOp::Cancel => deadline = None,
                    TimerOp::None => {}
                }

                CYCLE_STATUS.set(monitor.state());

                if let Some(notification) = effects.notify {
                    match notification {
                        Notification::Started => info!("Cycle started"),
                        Notification::Finished => info!("Cycle finished"),
                    }
                    STATUS_NOTIFY.send(notification).await;

                    // The finished notification is on its way out; the
                    // cycle is consumed and the machine returns to rest
                    if notification == Notification::Finished {
                        monitor.handle(CycleEvent::Acknowledge);
                        CYCLE_STATUS.set(monitor.state());
                    }
                }
            }
        }
    }
}
