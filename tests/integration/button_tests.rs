//! Physical button: sampler gestures and the service's toggle guard.

use crate::mock_hw::{MockPin, Rig};

use scrollpilot::app::events::{AppEvent, SimSnapshot};
use scrollpilot::app::ports::{Clock, TapSource};
use scrollpilot::drivers::button::ButtonDriver;

fn toggles(rig: &Rig) -> usize {
    rig.sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SimulationChanged(_)))
        .count()
}

#[test]
fn taps_toggle_simulation() {
    let mut rig = Rig::new();
    rig.tap();
    assert!(rig.app.snapshot().active);

    rig.clock.advance(400);
    rig.tap();
    assert!(!rig.app.snapshot().active);
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::SimulationChanged(SimSnapshot {
            active: false,
            speed: 5
        }))
    );
}

#[test]
fn taps_inside_debounce_window_are_ignored() {
    let mut rig = Rig::new();
    rig.tap();
    rig.clock.advance(100);
    rig.tap();
    rig.clock.advance(100);
    rig.tap();
    assert!(rig.app.snapshot().active);
    assert_eq!(toggles(&rig), 1);

    // 250 ms after the accepted tap, not after the rejected ones.
    rig.clock.advance(50);
    rig.tap();
    assert!(!rig.app.snapshot().active);
    assert_eq!(toggles(&rig), 2);
}

/// Drive the pin at 5 ms resolution, routing taps into the service.
fn hold(rig: &mut Rig, button: &mut ButtonDriver<MockPin>, pin: &MockPin, pressed: bool, ms: u32) {
    pin.pressed.set(pressed);
    for _ in 0..ms / 5 {
        rig.clock.advance(5);
        if button.poll_tap(rig.clock.now_ms()) {
            rig.tap();
        }
    }
}

#[test]
fn sampler_click_starts_simulation() {
    let mut rig = Rig::new();
    let pin = MockPin::default();
    let mut button = ButtonDriver::new(pin.clone());

    hold(&mut rig, &mut button, &pin, true, 120);
    assert!(!rig.app.snapshot().active, "press alone must not toggle");
    hold(&mut rig, &mut button, &pin, false, 120);
    assert!(rig.app.snapshot().active);
}

#[test]
fn sampler_long_press_never_toggles() {
    let mut rig = Rig::new();
    let pin = MockPin::default();
    let mut button = ButtonDriver::new(pin.clone());

    hold(&mut rig, &mut button, &pin, true, 2_000);
    hold(&mut rig, &mut button, &pin, false, 200);
    assert!(!rig.app.snapshot().active);
    assert_eq!(toggles(&rig), 0);
}

#[test]
fn sampler_ignores_contact_bounce() {
    let mut rig = Rig::new();
    let pin = MockPin::default();
    let mut button = ButtonDriver::new(pin.clone());

    for _ in 0..5 {
        hold(&mut rig, &mut button, &pin, true, 10);
        hold(&mut rig, &mut button, &pin, false, 10);
    }
    hold(&mut rig, &mut button, &pin, false, 200);
    assert_eq!(toggles(&rig), 0);
}
