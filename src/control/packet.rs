//! Control packet wire codec
//!
//! A control datagram is exactly 16 bytes: four 32-bit little-endian IEEE-754
//! floats in the order roll, pitch, yaw, throttle. The layout is fixed by the
//! existing transmitter app and must not change.
//!
//! | Offset | Field          |
//! |--------|----------------|
//! | 0      | roll           |
//! | 4      | pitch          |
//! | 8      | yaw            |
//! | 12     | throttle_norm  |
//!
//! Decoding validates length only. Value ranges are advisory (roll/pitch/yaw
//! in [-1, 1], throttle in [0, 1]) and are sanitized later at the mapper
//! boundary, so a transmitter bug cannot reach the actuators but also cannot
//! make the link look dead.

use core::fmt;

/// Control packet size on the wire (four LE f32 fields)
pub const CONTROL_PACKET_LEN: usize = 16;

/// A decoded control command.
///
/// Constructed only by [`decode`]; consumed by the mapper the same tick it
/// arrives. Values are normalized control inputs, not actuator units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommand {
    /// Roll axis, nominally [-1.0, 1.0]
    pub roll: f32,
    /// Pitch axis, nominally [-1.0, 1.0]
    pub pitch: f32,
    /// Yaw axis, nominally [-1.0, 1.0]
    pub yaw: f32,
    /// Throttle, nominally [0.0, 1.0]
    pub throttle_norm: f32,
}

/// Packet decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico_w", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload is not exactly [`CONTROL_PACKET_LEN`] bytes
    WrongLength,
    /// Reserved for stricter float validation; currently never produced
    MalformedFloat,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::WrongLength => write!(f, "unexpected packet length"),
            DecodeError::MalformedFloat => write!(f, "malformed float field"),
        }
    }
}

/// Decode a control datagram.
///
/// Pure function of its input; rejects any payload that is not exactly
/// 16 bytes. Decoded floats are passed through unmodified, including NaN and
/// infinity.
pub fn decode(buf: &[u8]) -> Result<ControlCommand, DecodeError> {
    if buf.len() != CONTROL_PACKET_LEN {
        return Err(DecodeError::WrongLength);
    }

    Ok(ControlCommand {
        roll: f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        pitch: f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        yaw: f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        throttle_norm: f32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
    })
}

/// Encode a control command into its wire representation.
///
/// Exact inverse of [`decode`]; used by tests and host-side senders.
pub fn encode(cmd: &ControlCommand) -> [u8; CONTROL_PACKET_LEN] {
    let mut buf = [0u8; CONTROL_PACKET_LEN];
    buf[0..4].copy_from_slice(&cmd.roll.to_le_bytes());
    buf[4..8].copy_from_slice(&cmd.pitch.to_le_bytes());
    buf[8..12].copy_from_slice(&cmd.yaw.to_le_bytes());
    buf[12..16].copy_from_slice(&cmd.throttle_norm.to_le_bytes());
    buf
}
