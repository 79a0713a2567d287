//! Power button scenarios over the built-in flows.

use std::time::{Duration, Instant};

use embedded_graphics::prelude::Size;
use lcd_storyboard::{
    Navigator,
    PowerEvent,
    RecordingSurface,
    config::SHUTDOWN_HOLD_TIME,
    flags::ConnectionPhase,
    led::{LedColor, LedDescriptor},
    screens::{binding, calibration, firmware, power},
};

fn lcd() -> RecordingSurface { RecordingSurface::new(Size::new(160, 80)) }

fn tap(
    nav: &mut Navigator,
    at: Instant,
) {
    nav.handle_power(PowerEvent::PressStart, at);
    nav.handle_power(PowerEvent::PressEnd, at + Duration::from_millis(100));
}

/// Tick until the step index changes. Returns the number of ticks run.
fn ticks_until_transition(
    nav: &mut Navigator,
    surface: &mut RecordingSurface,
    limit: u32,
) -> u32 {
    let start = (nav.current_flow().id, nav.current_index());
    for count in 1..=limit {
        nav.tick(surface);
        if (nav.current_flow().id, nav.current_index()) != start {
            return count;
        }
    }
    panic!("no transition from {start:?} within {limit} ticks");
}

/// Powered on and parked on Fully On.
fn fully_on(t0: Instant) -> Navigator {
    let mut nav = Navigator::builtin(power::FLOW_ID).unwrap();
    tap(&mut nav, t0);
    assert!(nav.jump_to(power::FULLY_ON));
    nav
}

#[test]
fn test_power_on_scenario() {
    let mut nav = Navigator::builtin(power::FLOW_ID).unwrap();
    let mut surface = lcd();

    assert_eq!(nav.current_index(), power::OFF);
    assert!(!nav.flags().powered_on, "Power flow starts off");
    assert_eq!(nav.led(), LedDescriptor::OFF);
    assert!(nav.power_hint_visible(), "Off asks for a power press");

    tap(&mut nav, Instant::now());
    assert_eq!(nav.current_index(), power::POWER_ON);
    assert!(nav.flags().powered_on);
    assert_eq!(nav.led(), LedDescriptor::on(LedColor::White));

    // Ticks 0..=240: the 241st tick hands over
    assert_eq!(ticks_until_transition(&mut nav, &mut surface, 1000), 241);
    assert_eq!(nav.current_index(), power::ON);

    let mut phases = vec![nav.flags().connection_phase];
    while nav.current_index() == power::ON {
        nav.tick(&mut surface);
        let phase = nav.flags().connection_phase;
        if phases.last() != Some(&phase) {
            phases.push(phase);
        }
    }
    assert_eq!(
        phases,
        [ConnectionPhase::Searching, ConnectionPhase::Connecting, ConnectionPhase::Connected]
    );
    assert_eq!(nav.current_index(), power::FULLY_ON);
    assert_eq!(nav.led(), LedDescriptor::on(LedColor::Green));
}

#[test]
fn test_on_step_switches_led_when_connected() {
    let mut nav = fully_on(Instant::now());
    let mut surface = lcd();
    assert!(nav.jump_to(power::ON));

    nav.tick(&mut surface);
    assert_eq!(nav.led(), LedDescriptor::breathing(LedColor::Blue), "Searching breathes blue");

    for _ in 0..600 {
        nav.tick(&mut surface);
    }
    assert_eq!(nav.current_index(), power::ON);
    assert_eq!(nav.led(), LedDescriptor::on(LedColor::Green), "Connected overrides the LED");
}

#[test]
fn test_shutdown_cancel_returns_to_step() {
    let t0 = Instant::now();
    let mut nav = fully_on(t0);

    nav.handle_power(PowerEvent::PressStart, t0);
    assert_eq!(nav.current_index(), power::SHUTDOWN);
    assert!(nav.flags().shutdown_in_progress());

    nav.poll(t0 + Duration::from_millis(300));
    nav.handle_power(PowerEvent::PressEnd, t0 + Duration::from_millis(500));

    assert_eq!(nav.current_index(), power::FULLY_ON, "Back on the pre-shutdown step");
    assert!(nav.flags().powered_on);
    assert!(!nav.flags().shutdown_in_progress());

    // A cancelled countdown never fires later
    nav.poll(t0 + SHUTDOWN_HOLD_TIME * 2);
    assert_eq!(nav.current_index(), power::FULLY_ON);
}

#[test]
fn test_power_pressed_follows_button() {
    let t0 = Instant::now();
    let mut nav = fully_on(t0);
    assert!(!nav.power_pressed());

    nav.handle_power(PowerEvent::PressStart, t0);
    assert!(nav.power_pressed(), "Held while counting down");

    nav.handle_power(PowerEvent::PressEnd, t0 + Duration::from_millis(300));
    assert!(!nav.power_pressed());
    assert_eq!(nav.current_index(), power::FULLY_ON);
}

#[test]
fn test_shutdown_press_cancel_counts_as_release() {
    let t0 = Instant::now();
    let mut nav = fully_on(t0);

    nav.handle_power(PowerEvent::PressStart, t0);
    nav.handle_power(PowerEvent::PressCancel, t0 + Duration::from_millis(200));
    assert_eq!(nav.current_index(), power::FULLY_ON);
}

#[test]
fn test_shutdown_hold_completes() {
    let t0 = Instant::now();
    let mut nav = fully_on(t0);
    let mut surface = lcd();

    nav.handle_power(PowerEvent::PressStart, t0);
    nav.poll(t0 + Duration::from_secs(1));
    assert_eq!(nav.current_index(), power::SHUTDOWN, "Still counting down");
    assert_eq!(nav.flags().shutdown_remaining, Duration::from_secs(1));

    nav.poll(t0 + SHUTDOWN_HOLD_TIME);
    assert_eq!(nav.current_index(), power::SHUTDOWN_COMPLETE);
    assert!(!nav.flags().powered_on);
    assert_eq!(nav.led(), LedDescriptor::OFF);

    // Releasing after completion changes nothing
    nav.handle_power(PowerEvent::PressEnd, t0 + SHUTDOWN_HOLD_TIME + Duration::from_millis(100));
    assert_eq!(nav.current_index(), power::SHUTDOWN_COMPLETE);

    ticks_until_transition(&mut nav, &mut surface, 100);
    assert_eq!(nav.current_index(), power::OFF, "Fade ends on Off");
    assert!(!nav.flags().powered_on);
    assert_eq!(nav.led(), LedDescriptor::OFF);
}

#[test]
fn test_release_past_threshold_completes_without_poll() {
    let t0 = Instant::now();
    let mut nav = fully_on(t0);

    nav.handle_power(PowerEvent::PressStart, t0);
    nav.handle_power(PowerEvent::PressEnd, t0 + SHUTDOWN_HOLD_TIME + Duration::from_millis(10));

    assert_eq!(nav.current_index(), power::SHUTDOWN_COMPLETE);
    assert!(!nav.flags().powered_on);
}

#[test]
fn test_power_press_elsewhere_is_ignored() {
    let mut nav = Navigator::builtin(calibration::FLOW_ID).unwrap();
    tap(&mut nav, Instant::now());

    assert_eq!(nav.current_flow().id, calibration::FLOW_ID);
    assert_eq!(nav.current_index(), 0);
    assert!(nav.flags().powered_on);
}

#[test]
fn test_binding_ready_toggles_serial() {
    let t0 = Instant::now();
    let mut nav = Navigator::builtin(binding::FLOW_ID).unwrap();
    let mut surface = lcd();
    nav.tick(&mut surface);

    tap(&mut nav, t0);
    assert!(nav.flags().show_serial);
    assert!(nav.tick(&mut surface), "Toggle redraws the static step");
    assert!(surface.contains_text(binding::SERIAL));

    tap(&mut nav, t0 + Duration::from_secs(1));
    assert!(!nav.flags().show_serial);
    assert_eq!(nav.current_index(), binding::READY);
}

#[test]
fn test_firmware_progress_completes_update() {
    let mut nav = Navigator::builtin(firmware::FLOW_ID).unwrap();
    assert!(nav.jump_to(firmware::UPDATING));

    nav.set_firmware_progress(0.5);
    assert_eq!(nav.current_index(), firmware::UPDATING);

    nav.set_firmware_progress(1.5);
    assert!((nav.flags().firmware_progress - 1.0).abs() < f32::EPSILON, "Progress is clamped");
    assert_eq!(nav.current_index(), firmware::COMPLETE);
}

#[test]
fn test_updating_restarts_after_charger_disconnected() {
    let mut nav = Navigator::builtin(firmware::FLOW_ID).unwrap();
    let mut surface = lcd();
    assert!(nav.jump_to(firmware::UPDATING));

    // Ticks 0..=900: no charger, so the 901st tick aborts
    assert_eq!(ticks_until_transition(&mut nav, &mut surface, 2000), 901);
    assert_eq!(nav.current_index(), firmware::CHARGER_DISCONNECTED);
    assert!((nav.flags().firmware_progress - 0.5).abs() < 1e-3);

    assert!(nav.jump_to(firmware::UPDATING));
    assert!(nav.flags().firmware_progress.abs() < f32::EPSILON, "Progress starts over");

    for _ in 0..600 {
        nav.tick(&mut surface);
    }
    let progress = nav.flags().firmware_progress;
    assert!(progress > 0.3 && progress < 0.34, "Progress advances again, got {progress}");
    assert_eq!(nav.current_index(), firmware::UPDATING);
}

#[test]
fn test_update_complete_restarts_into_power_flow() {
    let mut nav = Navigator::builtin(firmware::FLOW_ID).unwrap();
    let mut surface = lcd();
    assert!(nav.jump_to(firmware::COMPLETE));

    ticks_until_transition(&mut nav, &mut surface, 1000);
    assert_eq!(nav.current_flow().id, power::FLOW_ID);
    assert_eq!(nav.current_index(), power::POWER_ON);
    assert!(nav.flags().powered_on, "Power On powers the device");
}
