//! LIS3DH register map and the bit values this adapter uses
//!
//! Addresses and bitmasks are fixed by the device datasheet; the
//! deployment-specific values (threshold, duration, axis enables) are
//! part of the hardware contract and must not drift between firmware
//! versions.

/// Device identification register
pub const WHO_AM_I: u8 = 0x0F;

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0x33;

/// Control register 0 (SDO pull-up control)
pub const CTRL_REG0: u8 = 0x1E;

/// Control register 1 (data rate, power mode, axis enables)
pub const CTRL_REG1: u8 = 0x20;

/// Control register 2 (high-pass filter routing)
pub const CTRL_REG2: u8 = 0x21;

/// Control register 3 (INT1 pin routing)
pub const CTRL_REG3: u8 = 0x22;

/// Control register 4 (range, resolution, block data update)
pub const CTRL_REG4: u8 = 0x23;

/// Control register 5 (interrupt latching)
pub const CTRL_REG5: u8 = 0x24;

/// Control register 6 (INT2 pin routing)
pub const CTRL_REG6: u8 = 0x25;

/// First output register; read all six with auto-increment
pub const OUT_X_L: u8 = 0x28;

/// Interrupt 1 configuration (per-axis event enables)
pub const INT1_CFG: u8 = 0x30;

/// Interrupt 1 source; reading clears the latch
pub const INT1_SRC: u8 = 0x31;

/// Interrupt 1 threshold (1 LSB = 16 mg at ±2 g)
pub const INT1_THS: u8 = 0x32;

/// Interrupt 1 minimum event duration (1 LSB = 1/ODR)
pub const INT1_DURATION: u8 = 0x33;

/// Sub-address flag enabling register auto-increment
pub const AUTO_INCREMENT: u8 = 0x80;

// CTRL_REG1
/// 10 Hz output data rate
pub const ODR_10HZ: u8 = 0x20;
/// Low-power mode enable
pub const LP_EN: u8 = 0x08;
/// X, Y and Z axis enables
pub const XYZ_EN: u8 = 0x07;

// CTRL_REG2
/// High-pass filter on the interrupt 1 generator
pub const HP_IA1: u8 = 0x01;

// CTRL_REG3
/// Interrupt generator 1 on INT1 pin
pub const I1_IA1: u8 = 0x40;
/// Interrupt generator 2 on INT1 pin
pub const I1_IA2: u8 = 0x20;

// CTRL_REG4
/// Block data update (output registers locked between reads)
pub const BDU: u8 = 0x80;

// CTRL_REG5
/// Latch interrupt 1 until INT1_SRC is read
pub const LIR_INT1: u8 = 0x08;
/// Mask clearing the interrupt-1 latch/4D bits before setting them
pub const CTRL5_INT1_MASK: u8 = 0xF3;

// CTRL_REG0
/// Disconnect SDO pull-up (high nibble; low nibble is fixed per datasheet)
pub const SDO_PU_DISC: u8 = 0x90;

// INT1_CFG
/// Z high event enable
pub const ZHIE: u8 = 0x20;
/// Y high event enable
pub const YHIE: u8 = 0x08;
/// X high event enable
pub const XHIE: u8 = 0x02;

/// Interrupt threshold: 2 LSB, low enough for drum vibration
pub const VIBRATION_THS: u8 = 0x02;

/// Minimum event duration: one sample
pub const VIBRATION_DURATION: u8 = 0x01;
