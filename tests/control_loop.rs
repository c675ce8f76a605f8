//! End-to-end control loop tests
//!
//! Drive the full poll → decode → failsafe → actuator path over the mock
//! platform: mock datagram source, mock clock, mock PWM channels. Time is
//! advanced explicitly, so timeout behavior is deterministic.

use pico_rclink::communication::transport::mock::MockDatagramSource;
use pico_rclink::communication::transport::TransportError;
use pico_rclink::config::{FAILSAFE_TIMEOUT_MS, POLL_TIMEOUT_MS};
use pico_rclink::control::{bridge, encode, ControlBridge, ControlCommand, MapperConfig};
use pico_rclink::core::traits::{MockTime, TimeSource};
use pico_rclink::libraries::RcActuators;
use pico_rclink::platform::mock::MockPwm;

fn control_packet(roll: f32, pitch: f32, yaw: f32, throttle: f32) -> [u8; 16] {
    encode(&ControlCommand {
        roll,
        pitch,
        yaw,
        throttle_norm: throttle,
    })
}

fn new_bridge(time: &MockTime) -> ControlBridge {
    ControlBridge::new(time.now_us(), MapperConfig::default(), FAILSAFE_TIMEOUT_MS)
}

#[tokio::test]
async fn valid_packet_drives_all_four_channels() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    source.push_datagram(&control_packet(0.5, -0.5, 0.0, 0.75));

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);
        let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators)
            .await
            .expect("a valid packet must produce an output");
        assert_eq!(out.roll, 1750);
        assert_eq!(out.pitch, 1250);
        assert_eq!(out.yaw, 1500);
        assert_eq!(out.throttle, 1750);
    }

    assert_eq!(roll.pulse_us(), 1750);
    assert_eq!(pitch.pulse_us(), 1250);
    assert_eq!(yaw.pulse_us(), 1500);
    assert_eq!(throttle.pulse_us(), 1750);
}

#[tokio::test]
async fn silence_settles_to_failsafe_preset_within_one_timeout() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);

        // Last valid command at t=0, away from neutral everywhere
        source.push_datagram(&control_packet(1.0, 1.0, 1.0, 1.0));
        bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;

        // Sender disappears; poll keeps ticking
        time.advance_ms(1200);
        let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators)
            .await
            .expect("stale link must produce the preset");
        assert_eq!(out, MapperConfig::default().failsafe_preset());
    }

    assert_eq!(roll.pulse_us(), 1500);
    assert_eq!(pitch.pulse_us(), 1500);
    assert_eq!(yaw.pulse_us(), 1500);
    assert_eq!(throttle.pulse_us(), 1000);
}

#[tokio::test]
async fn quiet_ticks_while_live_hold_last_output() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);

        source.push_datagram(&control_packet(0.2, 0.0, 0.0, 0.5));
        bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;

        // Several empty polls inside the timeout window: no writes at all
        for _ in 0..5 {
            time.advance_ms(POLL_TIMEOUT_MS);
            let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;
            assert_eq!(out, None);
        }
    }

    // Exactly one write per channel, from the initial command
    assert_eq!(roll.write_count(), 1);
    assert_eq!(pitch.write_count(), 1);
    assert_eq!(yaw.write_count(), 1);
    assert_eq!(throttle.write_count(), 1);
    assert_eq!(throttle.pulse_us(), 1500);
}

#[tokio::test]
async fn transport_faults_and_garbage_are_absorbed() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);

        source.push_datagram(&control_packet(0.0, 0.0, 0.0, 0.5));
        bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;

        // A transient transport fault is just a quiet tick
        time.advance_ms(100);
        source.fail_next(TransportError::IoError);
        let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;
        assert_eq!(out, None);

        // Undersized, oversized, and way-oversized datagrams are dropped
        time.advance_ms(100);
        source.push_datagram(&[0u8; 15]);
        assert_eq!(
            bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await,
            None
        );

        time.advance_ms(100);
        source.push_datagram(&[0u8; 17]);
        assert_eq!(
            bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await,
            None
        );

        time.advance_ms(100);
        source.push_datagram(&[0u8; 1024]);
        assert_eq!(
            bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await,
            None
        );
    }

    // Garbage never reached the actuators
    assert_eq!(throttle.pulse_us(), 1500);
    assert_eq!(roll.write_count(), 1);
}

#[tokio::test]
async fn link_recovers_immediately_after_failsafe() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);

        // Go stale straight from startup grace
        time.advance_ms(FAILSAFE_TIMEOUT_MS + 200);
        let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;
        assert_eq!(out, Some(MapperConfig::default().failsafe_preset()));

        // One packet brings it back
        time.advance_ms(100);
        source.push_datagram(&control_packet(-1.0, 0.0, 1.0, 0.25));
        let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators)
            .await
            .expect("recovery packet must produce an output");
        assert_eq!(out.roll, 1000);
        assert_eq!(out.yaw, 2000);
        assert_eq!(out.throttle, 1250);
    }

    assert_eq!(roll.pulse_us(), 1000);
    assert_eq!(yaw.pulse_us(), 2000);
    assert_eq!(throttle.pulse_us(), 1250);
}

#[tokio::test]
async fn stale_preset_is_reapplied_every_tick() {
    let time = MockTime::new();
    let mut source = MockDatagramSource::new();
    let mut bridge_state = new_bridge(&time);

    let mut roll = MockPwm::default();
    let mut pitch = MockPwm::default();
    let mut yaw = MockPwm::default();
    let mut throttle = MockPwm::default();

    {
        let mut actuators = RcActuators::new(&mut roll, &mut pitch, &mut yaw, &mut throttle);

        time.advance_ms(FAILSAFE_TIMEOUT_MS + 100);
        for _ in 0..3 {
            let out = bridge::step(&mut source, &time, &mut bridge_state, &mut actuators).await;
            assert_eq!(out, Some(MapperConfig::default().failsafe_preset()));
            time.advance_ms(POLL_TIMEOUT_MS);
        }
    }

    // Repeating the identical preset is harmless
    assert_eq!(roll.write_count(), 3);
    assert_eq!(roll.pulse_us(), 1500);
    assert_eq!(throttle.pulse_us(), 1000);
}
