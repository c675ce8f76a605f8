//! Bridge loop
//!
//! One tick: poll the datagram source with a bounded wait, decode whatever
//! arrived, update the liveness monitor, and pick the actuator output:
//! mapped command, coast (hold last output), or the failsafe preset.
//!
//! All per-tick errors are absorbed here: malformed packets and transient
//! transport faults count as "no command this tick", actuator write faults
//! are logged and dropped. Nothing terminates the loop.

use crate::communication::transport::DatagramSource;
use crate::control::failsafe::{FailsafeMonitor, LinkStatus};
use crate::control::mapper::{self, ActuatorCommand, MapperConfig};
use crate::control::packet;
use crate::core::traits::TimeSource;
use crate::libraries::srv_channel::RcActuators;

/// Receive buffer size. Larger than the packet so oversized datagrams arrive
/// with their real length and fail length validation instead of being
/// silently truncated to a valid-looking 16 bytes.
const RECV_BUF_LEN: usize = 64;

/// Per-tick control state machine.
///
/// Owns the failsafe monitor and mapping configuration; deliberately knows
/// nothing about sockets or PWM so the whole decision path is a pure
/// function of (time, datagram) and can be tested without hardware.
pub struct ControlBridge {
    monitor: FailsafeMonitor,
    config: MapperConfig,
    stale: bool,
}

impl ControlBridge {
    /// Create a bridge whose grace period starts at `now_us`.
    pub fn new(now_us: u64, config: MapperConfig, timeout_ms: u64) -> Self {
        Self {
            monitor: FailsafeMonitor::new(now_us, timeout_ms),
            config,
            stale: false,
        }
    }

    /// Decide this tick's actuator output.
    ///
    /// - `Some(mapped)` when a valid command arrived;
    /// - `None` while coasting (no command, link still live): hold the last
    ///   applied output, write nothing;
    /// - `Some(preset)` on every stale tick.
    ///
    /// Malformed datagrams never touch the monitor, so they age the link
    /// exactly like silence does.
    pub fn process(&mut self, now_us: u64, datagram: Option<&[u8]>) -> Option<ActuatorCommand> {
        if let Some(buf) = datagram {
            match packet::decode(buf) {
                Ok(cmd) => {
                    self.monitor.mark_alive(now_us);
                    if self.stale {
                        self.stale = false;
                        crate::log_info!("control link recovered");
                    }
                    return Some(mapper::map(&cmd, &self.config));
                }
                Err(e) => {
                    crate::log_debug!("control packet dropped: {:?}", e);
                }
            }
        }

        match self.monitor.status(now_us) {
            LinkStatus::Live => None,
            LinkStatus::Stale => {
                if !self.stale {
                    self.stale = true;
                    crate::log_warn!("control link stale, applying failsafe preset");
                }
                Some(self.config.failsafe_preset())
            }
        }
    }

    /// Current liveness as of the last [`process`](Self::process) call.
    pub fn link_status(&self) -> LinkStatus {
        if self.stale {
            LinkStatus::Stale
        } else {
            LinkStatus::Live
        }
    }
}

/// Run one tick of the bridge: bounded poll, process, apply.
///
/// Returns the command applied this tick, if any. Transport errors are
/// absorbed as "no data"; the bounded wait inside the source keeps a single
/// tick's duration capped at the poll timeout.
pub async fn step<S, T>(
    source: &mut S,
    time: &T,
    bridge: &mut ControlBridge,
    actuators: &mut RcActuators<'_>,
) -> Option<ActuatorCommand>
where
    S: DatagramSource,
    T: TimeSource,
{
    let mut buf = [0u8; RECV_BUF_LEN];
    let datagram = match source.recv(&mut buf).await {
        Ok(Some(len)) => Some(&buf[..len]),
        Ok(None) => None,
        Err(e) => {
            crate::log_debug!("transport fault treated as no data: {:?}", e);
            None
        }
    };

    let output = bridge.process(time.now_us(), datagram);

    if let Some(cmd) = output {
        if let Err(e) = actuators.apply(&cmd) {
            crate::log_error!("actuator write failed: {}", e);
        }
    }

    output
}

/// Drive the bridge forever. Terminates only with the process.
pub async fn run<S, T>(
    source: &mut S,
    time: &T,
    bridge: &mut ControlBridge,
    actuators: &mut RcActuators<'_>,
) -> !
where
    S: DatagramSource,
    T: TimeSource,
{
    loop {
        step(source, time, bridge, actuators).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::packet::{encode, ControlCommand};

    const MS: u64 = 1000;

    fn bridge_at(now_us: u64) -> ControlBridge {
        ControlBridge::new(now_us, MapperConfig::default(), 1000)
    }

    fn packet_bytes(roll: f32, pitch: f32, yaw: f32, throttle: f32) -> [u8; 16] {
        encode(&ControlCommand {
            roll,
            pitch,
            yaw,
            throttle_norm: throttle,
        })
    }

    #[test]
    fn test_valid_datagram_maps_to_output() {
        let mut bridge = bridge_at(0);
        let buf = packet_bytes(0.5, -0.5, 0.0, 0.75);

        let out = bridge.process(10 * MS, Some(buf.as_slice())).unwrap();
        assert_eq!(out.roll, 1750);
        assert_eq!(out.pitch, 1250);
        assert_eq!(out.yaw, 1500);
        assert_eq!(out.throttle, 1750);
        assert_eq!(bridge.link_status(), LinkStatus::Live);
    }

    #[test]
    fn test_no_data_while_live_coasts() {
        let mut bridge = bridge_at(0);
        let buf = packet_bytes(0.0, 0.0, 0.0, 0.5);
        bridge.process(0, Some(buf.as_slice()));

        // Silence within the timeout window: no output, hold last values
        assert_eq!(bridge.process(500 * MS, None), None);
        assert_eq!(bridge.process(999 * MS, None), None);
    }

    #[test]
    fn test_silence_past_timeout_yields_preset() {
        let mut bridge = bridge_at(0);
        let buf = packet_bytes(1.0, 1.0, 1.0, 1.0);
        bridge.process(0, Some(buf.as_slice()));

        let out = bridge.process(1_200 * MS, None).unwrap();
        assert_eq!(out, MapperConfig::default().failsafe_preset());
        assert_eq!(bridge.link_status(), LinkStatus::Stale);

        // Preset is re-emitted on every stale tick
        let out = bridge.process(1_300 * MS, None).unwrap();
        assert_eq!(out, MapperConfig::default().failsafe_preset());
    }

    #[test]
    fn test_malformed_datagram_does_not_refresh_link() {
        let mut bridge = bridge_at(0);
        let buf = packet_bytes(0.0, 0.0, 0.0, 0.0);
        bridge.process(0, Some(buf.as_slice()));

        // A stream of malformed packets ages the link like silence
        assert_eq!(bridge.process(400 * MS, Some([0u8; 15].as_slice())), None);
        assert_eq!(bridge.process(800 * MS, Some([0u8; 17].as_slice())), None);
        let out = bridge.process(1_100 * MS, Some([0u8; 3].as_slice()));
        assert_eq!(out, Some(MapperConfig::default().failsafe_preset()));
    }

    #[test]
    fn test_recovery_from_stale() {
        let mut bridge = bridge_at(0);
        assert!(bridge.process(2_000 * MS, None).is_some()); // stale
        assert_eq!(bridge.link_status(), LinkStatus::Stale);

        let buf = packet_bytes(0.0, 0.0, 0.0, 0.25);
        let out = bridge.process(2_100 * MS, Some(buf.as_slice())).unwrap();
        assert_eq!(out.throttle, 1250);
        assert_eq!(bridge.link_status(), LinkStatus::Live);
    }

    #[test]
    fn test_startup_grace_period_then_preset() {
        // Never any packet: live until the timeout from construction expires
        let mut bridge = bridge_at(0);
        assert_eq!(bridge.process(900 * MS, None), None);
        assert!(bridge.process(1_001 * MS, None).is_some());
    }
}
