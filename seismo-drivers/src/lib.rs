//! Hardware driver adapters
//!
//! This crate provides the sensor-side glue for the monitor:
//!
//! - LIS3DH accelerometer adapter (threshold interrupt configuration,
//!   axis readout, interrupt acknowledgment)
//!
//! The raw bus access stays behind `embedded-hal-async` I2C; this crate
//! only owns register values and sequencing.

#![no_std]
#![deny(unsafe_code)]

pub mod lis3dh;
