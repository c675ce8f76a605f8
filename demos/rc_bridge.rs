//! RC bridge firmware for the Raspberry Pi Pico W
//!
//! Brings up the soft access point, binds the control socket and drives the
//! four actuator channels from incoming control datagrams. Flow mirrors the
//! airframe wiring: PWM first (so the failsafe preset is reachable even if
//! the network never comes up), then WiFi, then the bridge loop.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_net::udp::PacketMetadata;
use embassy_rp::pwm::Pwm;
use embassy_time::Timer;

use pico_rclink::communication::transport::udp::UdpDatagramSource;
use pico_rclink::config::{ApConfig, DEFAULT_SERVO_PINS, FAILSAFE_TIMEOUT_MS, POLL_TIMEOUT_MS};
use pico_rclink::control::{bridge, ControlBridge, MapperConfig};
use pico_rclink::core::traits::TimeSource;
use pico_rclink::libraries::RcActuators;
use pico_rclink::platform::rp2040::{
    start_access_point, EmbassyTime, Rp2040Pwm, WifiPeripherals,
};
use pico_rclink::platform::PwmConfig;
use pico_rclink::{log_error, log_info};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let ap = ApConfig::from_env();
    let mapping = MapperConfig::default();

    // One PWM slice per axis; wiring must match DEFAULT_SERVO_PINS (0/2/4/6).
    let pwm_cfg = PwmConfig::default();
    let mut roll = Rp2040Pwm::new(
        Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, Default::default()),
        pwm_cfg,
    )
    .unwrap();
    let mut pitch = Rp2040Pwm::new(
        Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, Default::default()),
        pwm_cfg,
    )
    .unwrap();
    let mut yaw = Rp2040Pwm::new(
        Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, Default::default()),
        pwm_cfg,
    )
    .unwrap();
    let mut throttle = Rp2040Pwm::new(
        Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, Default::default()),
        pwm_cfg,
    )
    .unwrap();

    let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);
    actuators.enable();
    // Hold the safe preset until the link produces a command
    if let Err(e) = actuators.apply(&mapping.failsafe_preset()) {
        log_error!("initial preset write failed: {}", e);
    }
    log_info!(
        "servo channels ready on GPIO {}/{}/{}/{}",
        DEFAULT_SERVO_PINS.roll,
        DEFAULT_SERVO_PINS.pitch,
        DEFAULT_SERVO_PINS.yaw,
        DEFAULT_SERVO_PINS.throttle
    );

    let wifi = WifiPeripherals {
        pwr: p.PIN_23,
        dio: p.PIN_24,
        cs: p.PIN_25,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };
    let (stack, _control) = match start_access_point(spawner, &ap, wifi).await {
        Ok(handles) => handles,
        Err(e) => {
            // No link will ever arrive; park at the preset.
            log_error!("network bring-up failed: {:?}", e);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 512];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0u8; 64];
    let mut source = UdpDatagramSource::new(
        stack,
        ap.port,
        POLL_TIMEOUT_MS,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    let time = EmbassyTime;
    let mut bridge_state = ControlBridge::new(time.now_us(), mapping, FAILSAFE_TIMEOUT_MS);

    log_info!("control bridge running");
    bridge::run(&mut source, &time, &mut bridge_state, &mut actuators).await
}
