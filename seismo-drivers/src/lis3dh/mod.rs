//! LIS3DH accelerometer adapter
//!
//! Configures the sensor once for vibration detection and exposes the
//! two operations the rest of the firmware needs: instantaneous axis
//! readout and interrupt acknowledgment.
//!
//! The INT1 line is driven by the sensor's high-threshold interrupt
//! generator and latched: after every service the latch must be cleared
//! by reading INT1_SRC ([`Lis3dh::acknowledge_interrupt`]) or no
//! further rising edges are delivered.

pub mod registers;

use embedded_hal_async::i2c::I2c;

use registers::*;

#[cfg(test)]
mod tests;

/// Default I2C address (SA0 pulled low)
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Full-scale range used by the adapter, in g
const FULL_SCALE_G: f32 = 2.0;

/// Errors from the accelerometer adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus communication error
    I2c(E),
    /// WHO_AM_I returned something other than the LIS3DH device ID
    WrongDevice(u8),
}

/// LIS3DH adapter over an async I2C bus
pub struct Lis3dh<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Lis3dh<I2C> {
    /// Create an adapter at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create an adapter at a specific address (SA0 high: 0x19)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Probe and configure the sensor for vibration detection
    ///
    /// Register values are fixed for the deployment: 10 Hz sample rate,
    /// ±2 g, low-power mode, high-pass-filtered high-threshold interrupt
    /// on all three axes, latched onto INT1. A device that does not
    /// answer with the LIS3DH ID is reported as [`Error::WrongDevice`]
    /// and left untouched.
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let id = self.read_reg(WHO_AM_I).await?;
        if id != DEVICE_ID {
            return Err(Error::WrongDevice(id));
        }

        // 10 Hz, low-power, all axes on
        self.write_reg(CTRL_REG1, ODR_10HZ | LP_EN | XYZ_EN).await?;
        // ±2 g, block data update for coherent axis reads
        self.write_reg(CTRL_REG4, BDU).await?;
        // High-pass filter on the interrupt path only; data output
        // stays unfiltered for telemetry
        self.write_reg(CTRL_REG2, HP_IA1).await?;
        // Route the interrupt generators to the INT1 pin
        self.write_reg(CTRL_REG3, I1_IA1 | I1_IA2).await?;
        // Latch INT1 until INT1_SRC is read
        let ctrl5 = self.read_reg(CTRL_REG5).await?;
        self.write_reg(CTRL_REG5, (ctrl5 & CTRL5_INT1_MASK) | LIR_INT1)
            .await?;
        // Nothing on INT2
        self.write_reg(CTRL_REG6, 0x00).await?;

        // High events on X, Y and Z
        self.write_reg(INT1_CFG, ZHIE | YHIE | XHIE).await?;
        // Threshold 2 LSB (1/8th of range): low, for drum vibration
        self.write_reg(INT1_THS, VIBRATION_THS).await?;
        // 1 sample above threshold (1/ODR minimum event length)
        self.write_reg(INT1_DURATION, VIBRATION_DURATION).await?;

        // Disconnect the SDO pull-up
        self.write_reg(CTRL_REG0, SDO_PU_DISC).await?;

        // Clear any stale latched interrupt before the line is armed
        self.acknowledge_interrupt().await
    }

    /// Read instantaneous acceleration on all three axes, in g
    pub async fn read_axes(&mut self) -> Result<(f32, f32, f32), Error<I2C::Error>> {
        let mut raw = [0u8; 6];
        self.read_regs(OUT_X_L, &mut raw).await?;

        let x = i16::from_le_bytes([raw[0], raw[1]]);
        let y = i16::from_le_bytes([raw[2], raw[3]]);
        let z = i16::from_le_bytes([raw[4], raw[5]]);
        Ok((to_g(x), to_g(y), to_g(z)))
    }

    /// Clear the latched interrupt so the next threshold crossing
    /// produces a fresh rising edge
    pub async fn acknowledge_interrupt(&mut self) -> Result<(), Error<I2C::Error>> {
        // Cleared by reading
        let _ = self.read_reg(INT1_SRC).await?;
        Ok(())
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut value)
            .await
            .map_err(Error::I2c)?;
        Ok(value[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        // MSB of the sub-address enables auto-increment
        self.i2c
            .write_read(self.address, &[reg | AUTO_INCREMENT], buffer)
            .await
            .map_err(Error::I2c)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(Error::I2c)
    }
}

/// Convert a left-justified 16-bit sample to g at the configured range
fn to_g(raw: i16) -> f32 {
    raw as f32 * (FULL_SCALE_G / 32768.0)
}
