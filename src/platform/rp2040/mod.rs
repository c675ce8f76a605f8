//! Raspberry Pi Pico W platform implementation (RP2040 + CYW43439)

pub mod network;
pub mod pwm;
pub mod time;

pub use network::{start_access_point, WifiError, WifiPeripherals};
pub use pwm::Rp2040Pwm;
pub use time::EmbassyTime;
