//! Radio Uplink Protocol
//!
//! This crate defines the two wire formats the monitor produces:
//!
//! - A compact channel-tagged sensor payload ([`lpp`]) in the Cayenne LPP
//!   encoding understood by common LPWAN network servers.
//! - The UART frame ([`frame`]) that carries a finished payload to the
//!   radio co-processor, which owns the LoRaWAN session and air format.
//!
//! # Frame Overview
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ PORT │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–51B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The co-processor forwards PAYLOAD verbatim as the application payload
//! of an uplink on the given port.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod lpp;

pub use frame::{Frame, FrameError, FRAME_START, MAX_PAYLOAD_SIZE};
pub use lpp::{EncodeError, Payload};
