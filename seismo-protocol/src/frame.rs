//! Frame encoding for the radio co-processor link.
//!
//! Frame format:
//! - START (1 byte): 0xC5 synchronization byte
//! - LENGTH (1 byte): payload length (0-51)
//! - PORT (1 byte): uplink application port
//! - PAYLOAD (0-51 bytes): encoded sensor payload
//! - CHECKSUM (1 byte): XOR of LENGTH, PORT, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xC5;

/// Maximum payload size in bytes
///
/// Chosen to fit the smallest LoRaWAN application payload limit the
/// co-processor may be configured for (DR0 in the US915/AU915 plans).
pub const MAX_PAYLOAD_SIZE: usize = 51;

/// Maximum complete frame size (START + LENGTH + PORT + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Uplink port for periodic telemetry reports
pub const PORT_PERIODIC: u8 = 1;

/// Uplink port for cycle status-change reports
pub const PORT_EVENT: u8 = 2;

/// Errors that can occur during frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A frame ready for the radio link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Uplink application port
    pub port: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given port and payload
    pub fn new(port: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            port,
            payload: payload_vec,
        })
    }

    /// Calculate checksum for frame data
    fn calculate_checksum(length: u8, port: u8, payload: &[u8]) -> u8 {
        let mut checksum = length ^ port;
        for &byte in payload {
            checksum ^= byte;
        }
        checksum
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 4 + self.payload.len(); // START + LENGTH + PORT + payload + CHECKSUM
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let checksum = Self::calculate_checksum(length, self.port, &self.payload);

        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.port;
        buffer[3..3 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[3 + self.payload.len()] = checksum;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}
