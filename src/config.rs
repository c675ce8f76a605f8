//! Static configuration
//!
//! All configuration is fixed at build time: access-point credentials and the
//! control port come from environment variables surfaced by `build.rs`, the
//! servo channel table and timing constants are plain constants. Nothing here
//! is mutable at runtime.

use heapless::String;

/// Maximum SSID length (IEEE 802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 63;

/// Failsafe timeout: a link with no accepted command for longer than this is
/// considered lost and the actuators are forced to the safe preset.
pub const FAILSAFE_TIMEOUT_MS: u64 = 1000;

/// Bounded wait for a single datagram poll. Must be strictly smaller than the
/// failsafe timeout so stale-link detection latency stays bounded by one
/// timeout interval.
pub const POLL_TIMEOUT_MS: u64 = 100;

const _: () = assert!(POLL_TIMEOUT_MS < FAILSAFE_TIMEOUT_MS);

/// Servo refresh rate (standard 50 Hz, 20 ms frame)
pub const SERVO_PWM_HZ: u32 = 50;

/// Logical axis to GPIO assignment.
///
/// Each channel owns a full PWM slice, so the pins are spaced on even GPIOs
/// (RP2040 pairs pin 2n/2n+1 on one slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoPins {
    pub roll: u8,
    pub pitch: u8,
    pub yaw: u8,
    pub throttle: u8,
}

/// Default wiring, matching the board silkscreen of the reference airframe.
pub const DEFAULT_SERVO_PINS: ServoPins = ServoPins {
    roll: 0,
    pitch: 2,
    yaw: 4,
    throttle: 6,
};

/// Access-point configuration for the control link.
///
/// The bridge runs its own soft AP; the transmitter joins it and sends
/// control datagrams to `port` on the AP address.
#[derive(Debug, Clone)]
pub struct ApConfig {
    /// Network SSID (max 32 chars)
    pub ssid: String<MAX_SSID_LEN>,
    /// WPA2 passphrase (max 63 chars)
    pub password: String<MAX_PASSWORD_LEN>,
    /// 2.4 GHz channel number
    pub channel: u8,
    /// Static IPv4 address of the AP interface
    pub address: [u8; 4],
    /// UDP port the control link listens on
    pub port: u16,
}

impl ApConfig {
    /// Load the configuration baked in at build time.
    ///
    /// Defaults can be overridden via `WIFI_AP_SSID`, `WIFI_AP_PASSWORD`,
    /// `WIFI_AP_CHANNEL` and `RCLINK_PORT` (see `build.rs`). Malformed
    /// numeric overrides fall back to the defaults rather than failing the
    /// boot.
    pub fn from_env() -> Self {
        let ssid =
            String::try_from(env!("WIFI_AP_SSID")).unwrap_or_else(|_| String::new());
        let password =
            String::try_from(env!("WIFI_AP_PASSWORD")).unwrap_or_else(|_| String::new());
        let channel = env!("WIFI_AP_CHANNEL").parse::<u8>().unwrap_or(5);
        let port = env!("RCLINK_PORT").parse::<u16>().unwrap_or(4444);

        Self {
            ssid,
            password,
            channel,
            address: [192, 168, 4, 1],
            port,
        }
    }

    /// An AP with an empty SSID cannot be brought up.
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }

    /// WPA2 requires a passphrase of at least 8 characters; anything shorter
    /// is treated as a request for an open network.
    pub fn is_secured(&self) -> bool {
        self.password.len() >= 8
    }
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            channel: 5,
            address: [192, 168, 4, 1],
            port: 4444,
        }
    }
}
