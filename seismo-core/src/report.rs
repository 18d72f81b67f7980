//! Telemetry report assembly
//!
//! One report carries the battery level, the instantaneous 3-axis
//! reading, and the cycle status, each on its well-known channel. The
//! same payload is sent on the periodic schedule and on status changes;
//! only the uplink port differs.

use seismo_protocol::{EncodeError, Payload};

use crate::state::CycleState;

/// Channel for battery fields (base board convention)
pub const LPP_CHANNEL_BATT: u8 = 1;

/// Channel for accelerometer and cycle-status fields
pub const LPP_CHANNEL_ACC: u8 = 48;

/// A snapshot of everything a report carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Battery voltage in millivolts
    pub battery_mv: u16,
    /// Acceleration per axis in g
    pub axes: (f32, f32, f32),
    /// Cycle status at sampling time
    pub status: CycleState,
}

/// Build the uplink payload for a reading
pub fn build_report(reading: &Reading) -> Result<Payload, EncodeError> {
    let (x, y, z) = reading.axes;

    let mut payload = Payload::new();
    payload.add_voltage(LPP_CHANNEL_BATT, reading.battery_mv)?;
    payload.add_accelerometer(LPP_CHANNEL_ACC, x, y, z)?;
    payload.add_digital_input(LPP_CHANNEL_ACC, reading.status.as_u8())?;
    Ok(payload)
}
