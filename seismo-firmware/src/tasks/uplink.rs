//! Uplink task
//!
//! Serializes finished frames onto the UART to the radio co-processor.
//! Everything past that wire - join, session, duty cycle, the air
//! format itself - belongs to the co-processor.

use defmt::*;
use embassy_nrf::uarte::UarteTx;

use crate::channels::UPLINK_CHANNEL;

/// Uplink task - drains the frame channel onto the radio link
#[embassy_executor::task]
pub async fn uplink_task(mut tx: UarteTx<'static>) {
    info!("Uplink task started");

    loop {
        let frame = UPLINK_CHANNEL.receive().await;

        match frame.encode_to_vec() {
            Ok(bytes) => {
                trace!("Uplink: port {}, {} bytes", frame.port, bytes.len());
                if let Err(e) = tx.write(&bytes).await {
                    warn!("Radio UART write failed: {:?}", e);
                }
            }
            Err(e) => warn!("Frame encoding failed: {:?}", e),
        }
    }
}
