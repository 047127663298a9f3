//! Command dispatch: every command kind from record to actuator calls.

use crate::mock_hw::{ActuatorCall, Rig};

use scrollpilot::app::commands::{
    BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT, Command, Modifiers, SimRequest,
};
use scrollpilot::app::events::{AppEvent, SimSnapshot};
use scrollpilot::app::keymap::{KEY_DELETE, KEY_LEFT_ALT, KEY_LEFT_CTRL, KEY_LEFT_SHIFT};
use scrollpilot::app::ports::Clock;
use scrollpilot::config::DeviceConfig;
use scrollpilot::sim::engine::RunState;

use ActuatorCall::{DelayMs, KeyDown, KeyUp, Move, Press, Release, Type, Wheel};

fn key(symbol: &str, modifiers: Modifiers) -> Command {
    Command::key(symbol, modifiers)
}

// ── Pointer ───────────────────────────────────────────────────

#[test]
fn move_is_scaled_and_clamped() {
    let mut rig = Rig::with_config(DeviceConfig {
        pointer_sensitivity: 1.5,
        ..DeviceConfig::default()
    });
    rig.dispatch(Command::Move { dx: 10, dy: -3 });
    rig.dispatch(Command::Move { dx: 500, dy: -500 });
    assert_eq!(
        rig.hw.calls,
        vec![Move { dx: 15, dy: -5 }, Move { dx: 127, dy: -127 }]
    );
}

#[test]
fn click_holds_for_ten_ms() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Click { button: BUTTON_RIGHT });
    assert_eq!(
        rig.hw.calls,
        vec![Press(BUTTON_RIGHT), DelayMs(10), Release(BUTTON_RIGHT)]
    );
}

#[test]
fn click_passes_button_mask_through() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Click {
        button: BUTTON_MIDDLE | BUTTON_LEFT,
    });
    assert_eq!(
        rig.hw.calls,
        vec![Press(0b101), DelayMs(10), Release(0b101)]
    );
}

#[test]
fn tap_clicks_left_only_when_enabled() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Tap);
    assert_eq!(
        rig.hw.calls,
        vec![Press(BUTTON_LEFT), DelayMs(10), Release(BUTTON_LEFT)]
    );

    rig.hw.clear();
    rig.dispatch(Command::Settings(DeviceConfig {
        tap_to_click: false,
        ..DeviceConfig::default()
    }));
    rig.dispatch(Command::Tap);
    assert!(rig.hw.calls.is_empty());
}

// ── Scroll ────────────────────────────────────────────────────

#[test]
fn scroll_uses_scroll_sensitivity_and_clamps() {
    let mut rig = Rig::with_config(DeviceConfig {
        scroll_sensitivity: 2.0,
        ..DeviceConfig::default()
    });
    rig.dispatch(Command::Scroll { steps: -3 });
    rig.dispatch(Command::Scroll { steps: 200 });
    assert_eq!(rig.hw.wheel_ticks(), vec![-6, 127]);
}

#[test]
fn zero_scroll_still_sends_one_report() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Scroll { steps: 0 });
    assert_eq!(rig.hw.calls, vec![Wheel(0)]);
}

// ── Keyboard ──────────────────────────────────────────────────

#[test]
fn shift_digit_emits_shifted_glyph() {
    let mut rig = Rig::new();
    rig.dispatch(key("1", Modifiers::SHIFT));
    assert_eq!(
        rig.hw.calls,
        vec![
            KeyDown(KEY_LEFT_SHIFT),
            KeyDown(b'!'),
            KeyUp(b'!'),
            KeyUp(KEY_LEFT_SHIFT)
        ]
    );
}

#[test]
fn shift_letter_and_dash() {
    let mut rig = Rig::new();
    rig.dispatch(key("a", Modifiers::SHIFT));
    rig.dispatch(key("-", Modifiers::SHIFT));
    let pressed: Vec<u8> = rig
        .hw
        .calls
        .iter()
        .filter_map(|c| match c {
            KeyDown(code) if *code != KEY_LEFT_SHIFT => Some(*code),
            _ => None,
        })
        .collect();
    assert_eq!(pressed, vec![b'A', b'_']);
}

#[test]
fn modifiers_release_in_reverse_order() {
    let mut rig = Rig::new();
    rig.dispatch(key(
        "Delete",
        Modifiers {
            ctrl: true,
            alt: true,
            ..Modifiers::NONE
        },
    ));
    assert_eq!(
        rig.hw.calls,
        vec![
            KeyDown(KEY_LEFT_CTRL),
            KeyDown(KEY_LEFT_ALT),
            KeyDown(KEY_DELETE),
            KeyUp(KEY_DELETE),
            KeyUp(KEY_LEFT_ALT),
            KeyUp(KEY_LEFT_CTRL),
        ]
    );
}

#[test]
fn unknown_key_name_does_nothing() {
    let mut rig = Rig::new();
    rig.dispatch(key(
        "Hyper",
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        },
    ));
    assert!(rig.hw.calls.is_empty());
}

#[test]
fn non_ascii_character_is_typed_inside_modifiers() {
    let mut rig = Rig::new();
    rig.dispatch(key("é", Modifiers::SHIFT));
    assert_eq!(
        rig.hw.calls,
        vec![
            KeyDown(KEY_LEFT_SHIFT),
            Type("é".into()),
            KeyUp(KEY_LEFT_SHIFT)
        ]
    );
}

#[test]
fn text_expands_newline_escapes() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Text {
        text: "hi\\nthere\\n".into(),
    });
    assert_eq!(rig.hw.calls, vec![Type("hi\nthere\n".into())]);
}

// ── Simulation control ────────────────────────────────────────

#[test]
fn simulation_get_reports_without_changing_state() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Simulation {
        active: Some(true),
        speed: Some(9),
        cmd: Some(SimRequest::Get),
    });
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::SnapshotRequested(SimSnapshot {
            active: false,
            speed: 5
        }))
    );
    assert!(!rig.app.snapshot().active);
}

#[test]
fn simulation_start_clamps_speed() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Simulation {
        active: Some(true),
        speed: Some(30),
        cmd: None,
    });
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::SimulationChanged(SimSnapshot {
            active: true,
            speed: 20
        }))
    );
    assert!(rig.app.simulation().run_state().transition_deadline.is_some());
}

/// Pause scheduled by a start record, in ms from now.
fn scheduled_pause_ms(rig: &mut Rig, speed: i32) -> u32 {
    rig.dispatch(Command::Simulation {
        active: Some(true),
        speed: Some(speed),
        cmd: None,
    });
    let deadline = rig
        .app
        .simulation()
        .run_state()
        .transition_deadline
        .expect("start schedules a pause");
    deadline.wrapping_sub(rig.clock.now_ms())
}

#[test]
fn start_record_pauses_at_its_own_speed() {
    // Speed 20 caps the pause at 120 - 40 = 80 s; speed 1 allows up to 118 s.
    let mut rig = Rig::new();
    let mut slow_max = 0;
    for _ in 0..40 {
        let fast = scheduled_pause_ms(&mut rig, 20);
        assert!((15_000..=80_000).contains(&fast), "speed 20 paused {fast} ms");
        let slow = scheduled_pause_ms(&mut rig, 1);
        assert!((28_000..=118_000).contains(&slow), "speed 1 paused {slow} ms");
        slow_max = slow_max.max(slow);
        rig.clock.advance(1);
    }
    assert!(slow_max > 80_000, "speed 1 never exceeded 80 s: {slow_max} ms");
}

#[test]
fn simulation_speed_only_keeps_activity() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Simulation {
        active: None,
        speed: Some(-4),
        cmd: None,
    });
    assert_eq!(
        rig.app.snapshot(),
        SimSnapshot {
            active: false,
            speed: 1
        }
    );
}

#[test]
fn simulation_stop_is_idempotent() {
    let mut rig = Rig::new();
    let stop = Command::Simulation {
        active: Some(false),
        speed: None,
        cmd: None,
    };
    rig.dispatch(Command::Simulation {
        active: Some(true),
        speed: None,
        cmd: None,
    });
    rig.dispatch(stop.clone());
    let first = rig.app.simulation().run_state();
    rig.dispatch(stop);
    assert_eq!(first, RunState::NEUTRAL);
    assert_eq!(rig.app.simulation().run_state(), RunState::NEUTRAL);
    assert!(!rig.app.snapshot().active);
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn settings_replace_whole_snapshot_but_not_sim_speed() {
    let mut rig = Rig::new();
    rig.dispatch(Command::Settings(DeviceConfig {
        tap_to_click: false,
        pointer_sensitivity: 50.0,
        scroll_sensitivity: 3.0,
        sim_speed: 17,
        loop_interval_ms: 10,
    }));
    let s = rig.app.settings();
    assert!(!s.tap_to_click);
    assert!((s.pointer_sensitivity - 10.0).abs() < f32::EPSILON);
    assert!((s.scroll_sensitivity - 3.0).abs() < f32::EPSILON);
    assert_eq!(rig.app.snapshot().speed, 5);
    assert_eq!(rig.sink.last(), Some(&AppEvent::SettingsUpdated));
}

#[test]
fn started_event_carries_initial_snapshot() {
    let rig = Rig::new();
    assert_eq!(
        rig.sink.events.first(),
        Some(&AppEvent::Started(SimSnapshot {
            active: false,
            speed: 5
        }))
    );
}
