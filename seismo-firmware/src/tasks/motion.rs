//! Motion interrupt task
//!
//! Services the accelerometer's INT1 line. The line is edge-triggered
//! and latched by the sensor: after every edge the latch must be
//! cleared through the sensor or no further edges arrive.
//!
//! The interrupt context itself does nothing but wake this task; all
//! state changes happen in the cycle task, fed through a channel.

use defmt::*;
use embassy_nrf::gpio::Input;

use seismo_core::state::CycleEvent;

use crate::channels::{CycleMessage, SharedAccel, CYCLE_CHANNEL};

/// Motion task - turns INT1 edges into cycle events
#[embassy_executor::task]
pub async fn motion_task(mut int1: Input<'static>, sensor: &'static SharedAccel) {
    info!("Motion task started");

    loop {
        int1.wait_for_rising_edge().await;
        trace!("Motion interrupt");

        {
            let mut sensor = sensor.lock().await;

            match sensor.read_axes().await {
                Ok((x, y, z)) => debug!("x {} y {} z {} g", x, y, z),
                Err(e) => warn!("Accelerometer read failed: {:?}", e),
            }

            // Re-arm the latched interrupt; without this the line stays
            // high and no further edges are delivered
            if let Err(e) = sensor.acknowledge_interrupt().await {
                warn!("Interrupt acknowledge failed: {:?}", e);
            }
        }

        CYCLE_CHANNEL
            .send(CycleMessage::Event(CycleEvent::Motion))
            .await;
    }
}
