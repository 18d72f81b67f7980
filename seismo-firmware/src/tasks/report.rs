//! Report task
//!
//! Sends a telemetry report on the configured period and, out of
//! schedule, whenever the cycle status changes. A period of 0 means
//! no periodic timer is armed at all; status-change reports still go
//! out. Interval changes from the console restart the period.

use defmt::*;
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_time::Timer;
use portable_atomic::Ordering;

use seismo_core::cycle::Notification;
use seismo_core::report::{build_report, Reading};
use seismo_core::state::CycleState;
use seismo_protocol::frame::{Frame, PORT_EVENT, PORT_PERIODIC};

use crate::channels::{
    SharedAccel, BATTERY_MV, CYCLE_STATUS, REPORT_INTERVAL_CHANGED, STATUS_NOTIFY, UPLINK_CHANNEL,
};

/// Report task - periodic and event-driven telemetry
#[embassy_executor::task]
pub async fn report_task(sensor: &'static SharedAccel, report_interval_ms: u32) {
    info!(
        "Report task started, interval {} ms",
        report_interval_ms
    );

    let mut interval_ms = report_interval_ms;

    loop {
        if interval_ms == 0 {
            // Periodic reporting disabled; only events and config
            // changes wake us
            match select(STATUS_NOTIFY.receive(), REPORT_INTERVAL_CHANGED.wait()).await {
                Either::First(notification) => {
                    send_report(sensor, PORT_EVENT, notified_status(notification)).await;
                }
                Either::Second(new_interval) => {
                    info!("Report interval now {} ms", new_interval);
                    interval_ms = new_interval;
                }
            }
        } else {
            match select3(
                Timer::after_millis(interval_ms as u64),
                STATUS_NOTIFY.receive(),
                REPORT_INTERVAL_CHANGED.wait(),
            )
            .await
            {
                Either3::First(()) => {
                    send_report(sensor, PORT_PERIODIC, CYCLE_STATUS.get()).await;
                }
                Either3::Second(notification) => {
                    send_report(sensor, PORT_EVENT, notified_status(notification)).await;
                }
                Either3::Third(new_interval) => {
                    // Restart the period from now
                    info!("Report interval now {} ms", new_interval);
                    interval_ms = new_interval;
                }
            }
        }
    }
}

/// Status a notification reports, independent of what the cell says by
/// the time the packet is built
fn notified_status(notification: Notification) -> CycleState {
    match notification {
        Notification::Started => CycleState::Running,
        Notification::Finished => CycleState::Finished,
    }
}

/// Sample, pack and queue one report
async fn send_report(sensor: &'static SharedAccel, port: u8, status: CycleState) {
    let axes = {
        let mut sensor = sensor.lock().await;
        match sensor.read_axes().await {
            Ok(axes) => axes,
            Err(e) => {
                warn!("Accelerometer read failed: {:?}", e);
                (0.0, 0.0, 0.0)
            }
        }
    };

    let reading = Reading {
        battery_mv: BATTERY_MV.load(Ordering::Relaxed),
        axes,
        status,
    };

    let payload = match build_report(&reading) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Report encoding failed: {:?}", e);
            return;
        }
    };

    match Frame::new(port, payload.as_bytes()) {
        Ok(frame) => UPLINK_CHANNEL.send(frame).await,
        Err(e) => warn!("Report does not fit an uplink frame: {:?}", e),
    }
}
