//! Control link core
//!
//! The packet-to-actuator path: wire codec, normalized-to-pulse mapping, the
//! link liveness state machine, and the bridge loop that ties them together.
//! Everything in this module is allocation-free and bounded per tick.

pub mod bridge;
pub mod failsafe;
pub mod mapper;
pub mod packet;

pub use bridge::ControlBridge;
pub use failsafe::{FailsafeMonitor, LinkStatus};
pub use mapper::{map, ActuatorCommand, MapperConfig};
pub use packet::{decode, encode, ControlCommand, DecodeError, CONTROL_PACKET_LEN};
